use crate::dependency_analysis::domain::{Project, ProjectType};
use crate::ports::outbound::{ProjectListingTool, WorkspaceReader};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// One way of enumerating the projects of a repository
///
/// Returning `Err` hands over to the next strategy in the chain.
#[async_trait]
pub trait DiscoveryStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn discover(&self, repo_root: &Path) -> Result<Vec<Project>>;
}

/// Accumulates projects keyed by name
#[derive(Default)]
struct ProjectSet {
    seen: HashSet<String>,
    projects: Vec<Project>,
}

impl ProjectSet {
    fn push(&mut self, name: &str, root: PathBuf, project_type: ProjectType) {
        if self.seen.contains(name.trim()) {
            warn!(project = name, root = %root.display(), "duplicate project name, keeping the first");
            return;
        }
        match Project::new(name, root, project_type) {
            Ok(project) => {
                self.seen.insert(project.name().to_string());
                self.projects.push(project);
            }
            Err(e) => warn!(project = name, error = %e, "skipping invalid project"),
        }
    }

    /// Like `push`, but a taken name falls back to `qualified` so that
    /// same-named directories under different parents all survive
    fn push_qualified(
        &mut self,
        name: &str,
        qualified: &str,
        root: PathBuf,
        project_type: ProjectType,
    ) {
        if self.seen.contains(name.trim()) {
            warn!(project = name, renamed = qualified, "duplicate directory name, using its relative root");
            self.push(qualified, root, project_type);
        } else {
            self.push(name, root, project_type);
        }
    }

    fn into_projects(self) -> Vec<Project> {
        self.projects
    }
}

/// Type from `project.json`, if the project root has one that says
fn configured_type(reader: &dyn WorkspaceReader, project_root: &Path) -> Option<ProjectType> {
    match reader.read_project_config(project_root) {
        Ok(Some(config)) => config.project_type.as_deref().map(ProjectType::parse),
        Ok(None) => None,
        Err(e) => {
            debug!(root = %project_root.display(), error = %e, "ignoring unreadable project.json");
            None
        }
    }
}

/// Workspace-aware listing tool plus its per-project config lookup
pub struct ToolListingStrategy {
    tool: Box<dyn ProjectListingTool>,
    reader: Arc<dyn WorkspaceReader>,
    project_dirs: Vec<String>,
}

impl ToolListingStrategy {
    pub fn new(
        tool: Box<dyn ProjectListingTool>,
        reader: Arc<dyn WorkspaceReader>,
        project_dirs: Vec<String>,
    ) -> Self {
        Self {
            tool,
            reader,
            project_dirs,
        }
    }

    /// Root for a project the tool has no config for: the first configured
    /// project directory containing a folder of that name, else the repo root
    fn guess_root(&self, repo_root: &Path, name: &str) -> PathBuf {
        for dir in &self.project_dirs {
            let base = repo_root.join(dir);
            let candidate = base.join(name);
            let present = self
                .reader
                .list_subdirectories(&base)
                .map(|dirs| dirs.contains(&candidate))
                .unwrap_or(false);
            if present {
                return candidate;
            }
        }
        repo_root.join(name)
    }
}

#[async_trait]
impl DiscoveryStrategy for ToolListingStrategy {
    fn name(&self) -> &'static str {
        "project-listing-tool"
    }

    async fn discover(&self, repo_root: &Path) -> Result<Vec<Project>> {
        let names = self.tool.list_projects(repo_root).await?;
        if names.is_empty() {
            anyhow::bail!("project listing tool returned no projects");
        }

        let mut set = ProjectSet::default();
        for name in names {
            let config = match self.tool.project_config(repo_root, &name).await {
                Ok(config) => config,
                Err(e) => {
                    debug!(project = %name, error = %e, "project config lookup failed");
                    None
                }
            };

            let (root, project_type) = match config {
                Some(config) => {
                    let root = config
                        .root
                        .as_deref()
                        .map(|r| repo_root.join(r))
                        .unwrap_or_else(|| self.guess_root(repo_root, &name));
                    let project_type = config
                        .project_type
                        .as_deref()
                        .map(ProjectType::parse)
                        .unwrap_or_default();
                    (root, project_type)
                }
                None => (self.guess_root(repo_root, &name), ProjectType::Unknown),
            };
            set.push(&name, root, project_type);
        }
        Ok(set.into_projects())
    }
}

/// Project map of the workspace manifest file
pub struct WorkspaceManifestStrategy {
    reader: Arc<dyn WorkspaceReader>,
    file_name: String,
}

impl WorkspaceManifestStrategy {
    pub fn new(reader: Arc<dyn WorkspaceReader>, file_name: impl Into<String>) -> Self {
        Self {
            reader,
            file_name: file_name.into(),
        }
    }
}

#[async_trait]
impl DiscoveryStrategy for WorkspaceManifestStrategy {
    fn name(&self) -> &'static str {
        "workspace-manifest"
    }

    async fn discover(&self, repo_root: &Path) -> Result<Vec<Project>> {
        let entries = self
            .reader
            .read_workspace_entries(repo_root, &self.file_name)?
            .ok_or_else(|| anyhow::anyhow!("{} not found", self.file_name))?;
        if entries.is_empty() {
            anyhow::bail!("{} declares no projects", self.file_name);
        }

        let mut set = ProjectSet::default();
        for entry in entries {
            let root = repo_root.join(&entry.root);
            let project_type = match entry.project_type.as_deref() {
                Some(t) => ProjectType::parse(t),
                None => configured_type(self.reader.as_ref(), &root).unwrap_or_default(),
            };
            set.push(&entry.name, root, project_type);
        }
        Ok(set.into_projects())
    }
}

/// Every immediate subdirectory of the configured project directories
///
/// Never fails: missing directories contribute nothing, so the result
/// is always the (possibly empty) set of directories present. A name seen
/// under an earlier directory is qualified with its parent (`libs/shared`).
pub struct DirectoryScanStrategy {
    reader: Arc<dyn WorkspaceReader>,
    project_dirs: Vec<String>,
}

impl DirectoryScanStrategy {
    pub fn new(reader: Arc<dyn WorkspaceReader>, project_dirs: Vec<String>) -> Self {
        Self {
            reader,
            project_dirs,
        }
    }

    /// "apps" -> application, "libs" -> library
    fn type_from_dir(dir: &str) -> ProjectType {
        ProjectType::parse(dir.trim_end_matches('/').trim_end_matches('s'))
    }
}

#[async_trait]
impl DiscoveryStrategy for DirectoryScanStrategy {
    fn name(&self) -> &'static str {
        "directory-scan"
    }

    async fn discover(&self, repo_root: &Path) -> Result<Vec<Project>> {
        let mut set = ProjectSet::default();
        for dir in &self.project_dirs {
            let subdirectories = match self.reader.list_subdirectories(&repo_root.join(dir)) {
                Ok(dirs) => dirs,
                Err(e) => {
                    warn!(directory = %dir, error = %e, "cannot list project directory");
                    continue;
                }
            };
            for root in subdirectories {
                let Some(name) = root.file_name().and_then(|n| n.to_str()).map(str::to_string)
                else {
                    continue;
                };
                let project_type = configured_type(self.reader.as_ref(), &root)
                    .filter(|t| *t != ProjectType::Unknown)
                    .unwrap_or_else(|| Self::type_from_dir(dir));
                let qualified = format!("{}/{}", dir.trim_end_matches('/'), name);
                set.push_qualified(&name, &qualified, root, project_type);
            }
        }
        Ok(set.into_projects())
    }
}
