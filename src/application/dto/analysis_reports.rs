use crate::dependency_analysis::domain::{
    Cycle, DependencyEdge, DependencyKind, DirectVulnerability, GraphNode, ProjectType,
    VersionInconsistency,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Returned instead of an error when a project or dependency name is unknown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundReport {
    pub error: String,
    pub available_projects: Vec<String>,
    /// Close matches for the requested name
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InconsistencyReport {
    pub count: usize,
    pub inconsistencies: BTreeMap<String, VersionInconsistency>,
}

/// Where cycle-detection edges came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeSource {
    /// Project graph reported by the workspace tool
    ProjectGraphTool,
    /// Declared internal manifest dependencies
    DeclaredDependencies,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularReport {
    pub source: EdgeSource,
    pub count: usize,
    pub cycles: Vec<Cycle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphReport {
    /// Set when the graph was restricted to one project's outgoing edges
    pub project: Option<String>,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<DependencyEdge>,
}

/// How a project's unused dependencies were determined, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnusedSource {
    /// Unused-dependency tool output
    Tool,
    /// Built-in import scan reconciled against declarations
    ImportScan,
    /// Nothing could be scanned; every declared dependency is a candidate
    DeclaredOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUnusedReport {
    pub project: String,
    pub source: UnusedSource,
    pub unused_dependencies: Vec<String>,
    pub unused_dev_dependencies: Vec<String>,
    /// Imported but not declared
    pub missing: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caveat: Option<String>,
}

impl ProjectUnusedReport {
    pub fn has_findings(&self) -> bool {
        !self.unused_dependencies.is_empty()
            || !self.unused_dev_dependencies.is_empty()
            || !self.missing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedReport {
    pub projects: Vec<ProjectUnusedReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutdatedStatus {
    UpToDate,
    Outdated,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutdatedDependency {
    pub name: String,
    pub current: Option<String>,
    pub wanted: Option<String>,
    pub latest: Option<String>,
    pub location: Option<String>,
    pub status: OutdatedStatus,
}

/// Where outdated information came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutdatedSource {
    Tool,
    Registry,
    /// No tool and no registry: every dependency is unknown
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutdatedReport {
    pub source: OutdatedSource,
    pub outdated_count: usize,
    pub unknown_count: usize,
    pub dependencies: Vec<OutdatedDependency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    /// False when the audit could not run
    pub audited: bool,
    pub total: u64,
    pub severity_counts: BTreeMap<String, u64>,
    pub direct_vulnerabilities: Vec<DirectVulnerability>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyUsage {
    pub project: String,
    pub version: String,
    pub kind: DependencyKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsedByReport {
    pub dependency: String,
    pub count: usize,
    pub used_by: Vec<DependencyUsage>,
    /// Distinct version strings requested, sorted
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDependenciesReport {
    pub project: String,
    pub root: String,
    pub project_type: ProjectType,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub peer_dependencies: BTreeMap<String, String>,
    pub internal_dependencies: Vec<String>,
    pub dependents: Vec<String>,
}
