use crate::dependency_analysis::domain::PackageManifest;
use crate::shared::Result;
use std::path::Path;

/// ManifestReader port for loading a package manifest
///
/// This port abstracts where declared dependencies come from. The
/// analysis core only needs the parsed manifest, never the raw file.
pub trait ManifestReader: Send + Sync {
    /// Reads the manifest located directly in `directory`
    ///
    /// # Returns
    /// * `Ok(Some(manifest))` - manifest present and parsed
    /// * `Ok(None)` - no manifest in this directory
    ///
    /// # Errors
    /// Returns an error if the manifest exists but cannot be read or parsed.
    /// Callers treat such a project as declaring nothing.
    fn read_manifest(&self, directory: &Path) -> Result<Option<PackageManifest>>;
}
