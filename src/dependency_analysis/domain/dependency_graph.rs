use super::{DependencyDeclaration, DependencyKind, Project, ProjectType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Directed "depends on" edge from a project to a package name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub version: String,
    pub kind: DependencyKind,
    /// Target is another project of the same discovery result
    pub internal: bool,
}

impl DependencyEdge {
    pub fn declaration(&self) -> DependencyDeclaration {
        DependencyDeclaration::new(&self.from, &self.to, &self.version, self.kind)
    }
}

/// Node kinds exposed when the graph is exported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum GraphNode {
    Project {
        id: String,
        project_type: ProjectType,
    },
    External {
        id: String,
    },
}

impl GraphNode {
    pub fn id(&self) -> &str {
        match self {
            GraphNode::Project { id, .. } | GraphNode::External { id } => id,
        }
    }
}

/// DependencyGraph aggregate: projects plus the declared edges between
/// them and external packages.
///
/// Edges are kept in discovery order of their owning project, then manifest
/// section order (production, dev, peer), then dependency name.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    projects: Vec<Project>,
    edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    pub fn new(projects: Vec<Project>, edges: Vec<DependencyEdge>) -> Self {
        Self { projects, edges }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name() == name)
    }

    pub fn project_names(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn internal_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.iter().filter(|e| e.internal)
    }

    pub fn external_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.iter().filter(|e| !e.internal)
    }

    /// Outgoing edges of one project
    pub fn edges_from<'a>(&'a self, project: &'a str) -> impl Iterator<Item = &'a DependencyEdge> {
        self.edges.iter().filter(move |e| e.from == project)
    }

    /// Edges pointing at a package or project name
    pub fn edges_to<'a>(&'a self, dep_name: &'a str) -> impl Iterator<Item = &'a DependencyEdge> {
        self.edges.iter().filter(move |e| e.to == dep_name)
    }

    /// Every declaration carried by the graph
    pub fn declarations(&self) -> Vec<DependencyDeclaration> {
        self.edges.iter().map(DependencyEdge::declaration).collect()
    }

    /// Distinct external package names, sorted
    pub fn external_dependency_names(&self) -> BTreeSet<String> {
        self.external_edges().map(|e| e.to.clone()).collect()
    }

    /// Projects that declare a dependency on `project`, in discovery order
    pub fn dependents_of(&self, project: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.internal_edges()
            .filter(|e| e.to == project)
            .filter(|e| seen.insert(e.from.clone()))
            .map(|e| e.from.clone())
            .collect()
    }

    /// Internal dependencies of `project`, de-duplicated across kinds
    pub fn internal_dependencies_of(&self, project: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.edges_from(project)
            .filter(|e| e.internal)
            .filter(|e| seen.insert(e.to.clone()))
            .map(|e| e.to.clone())
            .collect()
    }

    /// Nodes = projects followed by external package names (sorted)
    pub fn nodes(&self) -> Vec<GraphNode> {
        let mut nodes: Vec<GraphNode> = self
            .projects
            .iter()
            .map(|p| GraphNode::Project {
                id: p.name().to_string(),
                project_type: p.project_type(),
            })
            .collect();
        let project_names: HashSet<&str> = self.projects.iter().map(|p| p.name()).collect();
        nodes.extend(
            self.external_dependency_names()
                .into_iter()
                .filter(|name| !project_names.contains(name.as_str()))
                .map(|id| GraphNode::External { id }),
        );
        nodes
    }

    pub fn internal_edge_count(&self) -> usize {
        self.internal_edges().count()
    }
}
