use crate::shared::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Per-project configuration as reported by a workspace tool or a
/// `project.json` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
}

/// One entry of a workspace manifest's project map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceEntry {
    pub name: String,
    /// Project root relative to the repository root
    pub root: PathBuf,
    pub project_type: Option<String>,
}

/// WorkspaceReader port for the local, file-based discovery strategies
pub trait WorkspaceReader: Send + Sync {
    /// Reads the project map of the workspace manifest `file_name` under `repo_root`
    ///
    /// Returns `Ok(None)` when the file does not exist.
    fn read_workspace_entries(
        &self,
        repo_root: &Path,
        file_name: &str,
    ) -> Result<Option<Vec<WorkspaceEntry>>>;

    /// Lists immediate, non-hidden subdirectories of `directory`, sorted by name.
    /// A missing directory yields an empty list.
    fn list_subdirectories(&self, directory: &Path) -> Result<Vec<PathBuf>>;

    /// Reads `project.json` in a project root, if there is one
    fn read_project_config(&self, project_root: &Path) -> Result<Option<ProjectConfig>>;
}
