use crate::dependency_analysis::domain::PackageManifest;
use crate::ports::outbound::{ManifestReader, ProjectConfig, WorkspaceEntry, WorkspaceReader};
use crate::shared::error::AnalysisError;
use crate::shared::security::{read_checked, MAX_MANIFEST_SIZE};
use crate::shared::Result;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const MANIFEST_FILE: &str = "package.json";
const PROJECT_CONFIG_FILE: &str = "project.json";

#[derive(Debug, Deserialize)]
struct WorkspaceFile {
    #[serde(default)]
    projects: BTreeMap<String, Value>,
}

/// FileSystemReader adapter for reading manifests and workspace files
///
/// This adapter implements both ManifestReader and WorkspaceReader ports.
/// Every read goes through the same checks: no symlinks, regular files
/// only, bounded size.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemReader {
    /// Reads and parses a JSON file, `Ok(None)` when it does not exist
    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &Path, description: &str) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = read_checked(path, description, MAX_MANIFEST_SIZE).map_err(|e| {
            AnalysisError::ManifestUnreadable {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;

        let parsed = serde_json::from_str(&content).map_err(|e| AnalysisError::ManifestUnreadable {
            path: path.to_path_buf(),
            details: format!("Invalid JSON: {}", e),
        })?;
        Ok(Some(parsed))
    }

    /// A workspace project map value is either a root path or a config object
    fn workspace_entry(name: &str, value: Value) -> Option<WorkspaceEntry> {
        match value {
            Value::String(root) => Some(WorkspaceEntry {
                name: name.to_string(),
                root: PathBuf::from(root),
                project_type: None,
            }),
            Value::Object(_) => {
                let config: ProjectConfig = serde_json::from_value(value).ok()?;
                Some(WorkspaceEntry {
                    name: name.to_string(),
                    root: PathBuf::from(config.root.unwrap_or_else(|| name.to_string())),
                    project_type: config.project_type,
                })
            }
            _ => {
                warn!(project = name, "ignoring workspace entry that is neither a path nor an object");
                None
            }
        }
    }
}

impl ManifestReader for FileSystemReader {
    fn read_manifest(&self, directory: &Path) -> Result<Option<PackageManifest>> {
        self.read_json(&directory.join(MANIFEST_FILE), MANIFEST_FILE)
    }
}

impl WorkspaceReader for FileSystemReader {
    fn read_workspace_entries(
        &self,
        repo_root: &Path,
        file_name: &str,
    ) -> Result<Option<Vec<WorkspaceEntry>>> {
        let Some(workspace) = self.read_json::<WorkspaceFile>(&repo_root.join(file_name), file_name)?
        else {
            return Ok(None);
        };

        Ok(Some(
            workspace
                .projects
                .into_iter()
                .filter_map(|(name, value)| Self::workspace_entry(&name, value))
                .collect(),
        ))
    }

    fn list_subdirectories(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        if !directory.is_dir() {
            return Ok(Vec::new());
        }

        let mut subdirectories = Vec::new();
        let entries = fs::read_dir(directory).map_err(|e| AnalysisError::FileReadError {
            path: directory.to_path_buf(),
            details: e.to_string(),
        })?;
        for entry in entries.flatten() {
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            // file_type() does not follow symlinks
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir && !hidden {
                subdirectories.push(entry.path());
            }
        }
        subdirectories.sort();
        Ok(subdirectories)
    }

    fn read_project_config(&self, project_root: &Path) -> Result<Option<ProjectConfig>> {
        self.read_json(&project_root.join(PROJECT_CONFIG_FILE), PROJECT_CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_manifest_success() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("package.json"),
            r#"{"name": "web", "dependencies": {"react": "^18.2.0"}, "devDependencies": {"vite": "5"}}"#,
        )
        .unwrap();

        let reader = FileSystemReader::new();
        let manifest = reader.read_manifest(temp_dir.path()).unwrap().unwrap();

        assert_eq!(manifest.name.as_deref(), Some("web"));
        assert_eq!(manifest.dependencies["react"], "^18.2.0");
        assert_eq!(manifest.dev_dependencies["vite"], "5");
    }

    #[test]
    fn test_read_manifest_absent() {
        let temp_dir = TempDir::new().unwrap();
        let reader = FileSystemReader::new();
        assert!(reader.read_manifest(temp_dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_read_manifest_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("package.json"), "{ not json").unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_manifest(temp_dir.path()).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("Failed to read manifest"));
        assert!(message.contains("Invalid JSON"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_manifest_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real.json");
        fs::write(&real, "{}").unwrap();
        std::os::unix::fs::symlink(&real, temp_dir.path().join("package.json")).unwrap();

        let reader = FileSystemReader::new();
        let err = reader.read_manifest(temp_dir.path()).unwrap_err();
        assert!(format!("{}", err).contains("symbolic link"));
    }

    #[test]
    fn test_read_workspace_entries() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("workspace.json"),
            r#"{"version": 2, "projects": {
                "api": "apps/api",
                "core": {"root": "libs/core", "projectType": "library"},
                "broken": 42
            }}"#,
        )
        .unwrap();

        let reader = FileSystemReader::new();
        let entries = reader
            .read_workspace_entries(temp_dir.path(), "workspace.json")
            .unwrap()
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "api");
        assert_eq!(entries[0].root, PathBuf::from("apps/api"));
        assert_eq!(entries[1].project_type.as_deref(), Some("library"));
    }

    #[test]
    fn test_read_workspace_entries_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader = FileSystemReader::new();
        assert!(reader
            .read_workspace_entries(temp_dir.path(), "workspace.json")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_list_subdirectories_skips_hidden_and_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("web")).unwrap();
        fs::create_dir(temp_dir.path().join("admin")).unwrap();
        fs::create_dir(temp_dir.path().join(".cache")).unwrap();
        fs::write(temp_dir.path().join("README.md"), "# apps").unwrap();

        let reader = FileSystemReader::new();
        let dirs = reader.list_subdirectories(temp_dir.path()).unwrap();

        let names: Vec<_> = dirs
            .iter()
            .map(|d| d.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["admin", "web"]);
    }

    #[test]
    fn test_list_subdirectories_missing_dir() {
        let reader = FileSystemReader::new();
        let dirs = reader
            .list_subdirectories(Path::new("/nonexistent/apps"))
            .unwrap();
        assert!(dirs.is_empty());
    }

    #[test]
    fn test_read_project_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("project.json"),
            r#"{"name": "web", "projectType": "application", "sourceRoot": "apps/web/src"}"#,
        )
        .unwrap();

        let reader = FileSystemReader::new();
        let config = reader.read_project_config(temp_dir.path()).unwrap().unwrap();
        assert_eq!(config.project_type.as_deref(), Some("application"));
        assert!(config.root.is_none());
    }
}
