use crate::dependency_analysis::domain::{
    DependencyEdge, DependencyGraph, DependencyKind, PackageManifest, Project,
};
use std::collections::{HashMap, HashSet};

/// DependencyGraphBuilder turns discovered projects plus their manifests
/// into a DependencyGraph.
///
/// Pure transform: no I/O, nothing cached between calls. Internal-edge
/// classification is recomputed from the project list handed in.
pub struct DependencyGraphBuilder;

impl DependencyGraphBuilder {
    /// Builds the graph.
    ///
    /// # Arguments
    /// * `projects` - Discovery result, in discovery order
    /// * `manifests` - Manifest per project name; a missing entry means the
    ///   project has no readable manifest and contributes zero edges
    pub fn build(projects: Vec<Project>, manifests: &HashMap<String, PackageManifest>) -> DependencyGraph {
        let project_names: HashSet<&str> = projects.iter().map(|p| p.name()).collect();
        let mut edges = Vec::new();

        for project in &projects {
            let Some(manifest) = manifests.get(project.name()) else {
                continue;
            };

            for kind in DependencyKind::ALL {
                for (dep_name, version) in manifest.declared(kind) {
                    let internal =
                        dep_name != project.name() && project_names.contains(dep_name.as_str());
                    edges.push(DependencyEdge {
                        from: project.name().to_string(),
                        to: dep_name.clone(),
                        version: version.clone(),
                        kind,
                        internal,
                    });
                }
            }
        }

        DependencyGraph::new(projects, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_analysis::domain::ProjectType;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn project(name: &str) -> Project {
        Project::new(name, PathBuf::from(format!("/repo/libs/{}", name)), ProjectType::Library).unwrap()
    }

    fn manifest(deps: &[(&str, &str)], dev: &[(&str, &str)]) -> PackageManifest {
        let to_map = |entries: &[(&str, &str)]| {
            entries
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>()
        };
        PackageManifest {
            dependencies: to_map(deps),
            dev_dependencies: to_map(dev),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_marks_internal_edges() {
        let mut manifests = HashMap::new();
        manifests.insert(
            "web".to_string(),
            manifest(&[("core", "workspace:*"), ("axios", "^1.6.0")], &[("jest", "29.0.0")]),
        );
        manifests.insert("core".to_string(), manifest(&[("lodash", "^4.17.21")], &[]));

        let graph = DependencyGraphBuilder::build(vec![project("web"), project("core")], &manifests);

        assert_eq!(graph.edges().len(), 4);
        let core_edge = graph.edges().iter().find(|e| e.to == "core").unwrap();
        assert!(core_edge.internal);
        assert_eq!(core_edge.version, "workspace:*");
        assert!(graph.edges().iter().filter(|e| e.to != "core").all(|e| !e.internal));
    }

    #[test]
    fn test_project_without_manifest_contributes_no_edges() {
        let manifests = HashMap::new();
        let graph = DependencyGraphBuilder::build(vec![project("empty")], &manifests);
        assert_eq!(graph.projects().len(), 1);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_self_reference_is_not_internal() {
        let mut manifests = HashMap::new();
        manifests.insert("core".to_string(), manifest(&[("core", "1.0.0")], &[]));
        let graph = DependencyGraphBuilder::build(vec![project("core")], &manifests);
        assert_eq!(graph.internal_edge_count(), 0);
    }

    #[test]
    fn test_edges_follow_project_then_kind_order() {
        let mut manifests = HashMap::new();
        manifests.insert("b".to_string(), manifest(&[("z", "1")], &[("a", "1")]));
        manifests.insert("a".to_string(), manifest(&[("y", "1")], &[]));

        let graph = DependencyGraphBuilder::build(vec![project("b"), project("a")], &manifests);
        let order: Vec<(&str, &str)> = graph
            .edges()
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(order, vec![("b", "z"), ("b", "a"), ("a", "y")]);
        // "a" is a project name, so b -> a (dev) is internal
        assert!(graph.edges()[1].internal);
    }

    #[test]
    fn test_classification_depends_only_on_given_projects() {
        let mut manifests = HashMap::new();
        manifests.insert("web".to_string(), manifest(&[("core", "1.0.0")], &[]));

        let with_core = DependencyGraphBuilder::build(vec![project("web"), project("core")], &manifests);
        let without_core = DependencyGraphBuilder::build(vec![project("web")], &manifests);

        assert_eq!(with_core.internal_edge_count(), 1);
        assert_eq!(without_core.internal_edge_count(), 0);
    }
}
