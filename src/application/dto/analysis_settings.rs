use std::path::PathBuf;
use std::time::Duration;

/// Which manifest supplies a project's declared set during usage reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyMode {
    /// The project's own manifest if it has one, otherwise the root manifest
    #[default]
    Auto,
    /// Always the repository root manifest (single-version policy)
    Root,
    /// Always the project's own manifest
    Project,
}

impl std::str::FromStr for DependencyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(DependencyMode::Auto),
            "root" => Ok(DependencyMode::Root),
            "project" => Ok(DependencyMode::Project),
            _ => Err(format!(
                "Invalid dependency mode: {}. Please specify 'auto', 'root' or 'project'",
                s
            )),
        }
    }
}

impl std::fmt::Display for DependencyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyMode::Auto => write!(f, "auto"),
            DependencyMode::Root => write!(f, "root"),
            DependencyMode::Project => write!(f, "project"),
        }
    }
}

/// Batching parameters for per-package registry lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSettings {
    pub batch_size: usize,
    pub batch_delay: Duration,
    /// Per-item timeout
    pub timeout: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_delay: Duration::from_millis(100),
            timeout: Duration::from_secs(5),
        }
    }
}

/// AnalysisSettings - resolved runtime settings for one repository
///
/// Built from defaults, the optional config file and CLI flags, in that
/// order of precedence (later wins).
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// Repository root (absolute)
    pub repo_root: PathBuf,
    /// Top-level directories scanned by the directory fallback
    pub project_dirs: Vec<String>,
    /// Workspace manifest file name, relative to the root
    pub workspace_manifest: String,
    pub dependency_mode: DependencyMode,
    pub lookup: LookupSettings,
}

impl AnalysisSettings {
    pub fn new(repo_root: PathBuf) -> Self {
        Self {
            repo_root,
            project_dirs: vec!["apps".to_string(), "libs".to_string()],
            workspace_manifest: "workspace.json".to_string(),
            dependency_mode: DependencyMode::default(),
            lookup: LookupSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_dependency_mode_from_str() {
        assert_eq!(DependencyMode::from_str("auto").unwrap(), DependencyMode::Auto);
        assert_eq!(DependencyMode::from_str("ROOT").unwrap(), DependencyMode::Root);
        assert_eq!(
            DependencyMode::from_str(" project ").unwrap(),
            DependencyMode::Project
        );
    }

    #[test]
    fn test_dependency_mode_invalid() {
        let err = DependencyMode::from_str("hoisted").unwrap_err();
        assert!(err.contains("Invalid dependency mode"));
    }

    #[test]
    fn test_settings_defaults() {
        let settings = AnalysisSettings::new(PathBuf::from("/repo"));
        assert_eq!(settings.project_dirs, vec!["apps", "libs"]);
        assert_eq!(settings.workspace_manifest, "workspace.json");
        assert_eq!(settings.dependency_mode, DependencyMode::Auto);
        assert_eq!(settings.lookup.batch_size, 10);
        assert_eq!(settings.lookup.timeout, Duration::from_secs(5));
    }
}
