use crate::dependency_analysis::services::ImportScanner;
use crate::ports::outbound::SourceScanner;
use crate::shared::security::{read_checked, MAX_SOURCE_FILE_SIZE};
use crate::shared::Result;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

pub const DEFAULT_IGNORED_DIRS: &[&str] = &["node_modules", "dist", "build", "coverage", ".git"];

/// Walks a project's source tree and collects import specifiers.
///
/// Ignored directories are pruned before descent. Files that are too large,
/// unreadable or behind a symlink are skipped rather than failing the scan.
pub struct FileSystemSourceScanner {
    extensions: Vec<String>,
    ignored_dirs: Vec<String>,
}

impl FileSystemSourceScanner {
    pub fn new(extensions: Vec<String>, ignored_dirs: Vec<String>) -> Self {
        Self {
            extensions,
            ignored_dirs,
        }
    }

    fn should_ignore(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .map(|name| self.ignored_dirs.iter().any(|ignored| ignored == name))
                .unwrap_or(false)
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }
}

impl Default for FileSystemSourceScanner {
    fn default() -> Self {
        Self::new(
            DEFAULT_SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl SourceScanner for FileSystemSourceScanner {
    fn scan_specifiers(&self, project_root: &Path) -> Result<BTreeSet<String>> {
        let mut specifiers = BTreeSet::new();
        if !project_root.is_dir() {
            return Ok(specifiers);
        }

        let files = WalkDir::new(project_root)
            .into_iter()
            .filter_entry(|e| !self.should_ignore(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.is_source_file(e.path()));

        let mut scanned = 0usize;
        for entry in files {
            match read_checked(entry.path(), "source file", MAX_SOURCE_FILE_SIZE) {
                Ok(content) => {
                    specifiers.extend(ImportScanner::extract_specifiers(&content));
                    scanned += 1;
                }
                Err(e) => debug!(path = %entry.path().display(), error = %e, "skipping source file"),
            }
        }

        debug!(
            root = %project_root.display(),
            files = scanned,
            specifiers = specifiers.len(),
            "scanned project sources"
        );
        Ok(specifiers)
    }
}
