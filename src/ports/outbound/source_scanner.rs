use crate::shared::Result;
use std::collections::BTreeSet;
use std::path::Path;

/// SourceScanner port for collecting import specifiers under a project root
pub trait SourceScanner: Send + Sync {
    /// Returns every distinct import specifier found in the recognised
    /// source files below `project_root`
    ///
    /// # Errors
    /// Returns an error only if the root itself cannot be walked. Unreadable
    /// individual files are skipped.
    fn scan_specifiers(&self, project_root: &Path) -> Result<BTreeSet<String>>;
}
