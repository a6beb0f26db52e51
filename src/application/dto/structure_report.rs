use crate::dependency_analysis::domain::ProjectType;
use serde::{Deserialize, Serialize};

/// Declaration counts per manifest section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationCounts {
    pub production: usize,
    pub dev: usize,
    pub peer: usize,
}

/// ProjectSummary - one row of the structure overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub name: String,
    /// Root relative to the repository root
    pub root: String,
    pub project_type: ProjectType,
    pub has_manifest: bool,
    pub declarations: DeclarationCounts,
    pub internal_dependencies: Vec<String>,
    pub dependents: Vec<String>,
}

/// StructureReport - overview of the whole repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    pub repository_root: String,
    /// Name of the discovery strategy that produced the project list
    pub discovery_strategy: String,
    pub project_count: usize,
    pub external_dependency_count: usize,
    pub internal_edge_count: usize,
    pub projects: Vec<ProjectSummary>,
}
