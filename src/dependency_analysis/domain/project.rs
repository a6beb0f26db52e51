use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum length for project names (security limit)
const MAX_PROJECT_NAME_LENGTH: usize = 214;

/// Type tag attached to a discovered project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Application,
    Library,
    #[default]
    Unknown,
}

impl ProjectType {
    /// Lenient parse of the type strings used by workspace tooling.
    /// Anything unrecognised maps to `Unknown` rather than failing.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "application" | "app" => ProjectType::Application,
            "library" | "lib" => ProjectType::Library,
            _ => ProjectType::Unknown,
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectType::Application => write!(f, "application"),
            ProjectType::Library => write!(f, "library"),
            ProjectType::Unknown => write!(f, "unknown"),
        }
    }
}

/// A package/project discovered inside the repository.
///
/// Identity is the name; projects are immutable once discovery returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    name: String,
    root: PathBuf,
    project_type: ProjectType,
}

impl Project {
    pub fn new(name: impl Into<String>, root: PathBuf, project_type: ProjectType) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            anyhow::bail!("Project name cannot be empty");
        }
        if trimmed.len() > MAX_PROJECT_NAME_LENGTH {
            anyhow::bail!(
                "Project name is too long ({} bytes). Maximum allowed: {} bytes",
                trimmed.len(),
                MAX_PROJECT_NAME_LENGTH
            );
        }

        Ok(Self {
            name: trimmed.to_string(),
            root,
            project_type,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    /// Root relative to the repository root, falling back to the absolute root
    pub fn relative_root(&self, repo_root: &Path) -> PathBuf {
        self.root
            .strip_prefix(repo_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.root.clone())
    }
}
