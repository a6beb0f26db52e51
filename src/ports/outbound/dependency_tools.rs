use super::ProjectConfig;
use crate::dependency_analysis::domain::AuditReport;
use crate::dependency_analysis::services::Adjacency;
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Output of an unused-dependency detector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedToolReport {
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub dev_dependencies: Vec<String>,
    /// missing package -> files importing it
    #[serde(default)]
    pub missing: BTreeMap<String, Vec<String>>,
}

/// One row of an outdated-dependency report. Treated opaquely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutdatedEntry {
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub wanted: Option<String>,
    #[serde(default)]
    pub latest: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Workspace-aware project listing (e.g. `nx show projects`)
///
/// Failure of either method sends discovery to its next strategy.
#[async_trait]
pub trait ProjectListingTool: Send + Sync {
    /// Canonical project names, in tool order
    async fn list_projects(&self, repo_root: &Path) -> Result<Vec<String>>;

    /// Root and type of one project, or `None` if the tool knows nothing about it
    async fn project_config(&self, repo_root: &Path, name: &str) -> Result<Option<ProjectConfig>>;
}

#[async_trait]
pub trait UnusedDependencyTool: Send + Sync {
    async fn find_unused(&self, project_path: &Path) -> Result<UnusedToolReport>;
}

#[async_trait]
pub trait OutdatedDependencyTool: Send + Sync {
    /// package name -> outdated entry; an empty map means everything is current
    async fn find_outdated(&self, repo_root: &Path) -> Result<BTreeMap<String, OutdatedEntry>>;
}

#[async_trait]
pub trait AuditTool: Send + Sync {
    async fn audit(&self, repo_root: &Path) -> Result<AuditReport>;
}

/// Project-to-project dependency edges as computed by a workspace tool
#[async_trait]
pub trait ProjectGraphTool: Send + Sync {
    async fn project_graph(&self, repo_root: &Path) -> Result<Adjacency>;
}
