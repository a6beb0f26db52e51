use crate::shared::Result;
use async_trait::async_trait;

/// LatestVersionRepository port for looking up the newest published
/// version of an external package (e.g. the npm registry)
///
/// Implementations must be `Send + Sync`; lookups run concurrently
/// within a batch.
#[async_trait]
pub trait LatestVersionRepository: Send + Sync {
    /// Fetches the latest published version string of `package_name`
    ///
    /// # Errors
    /// Returns an error if the request fails, the registry answers with a
    /// non-success status or the response carries no version.
    async fn fetch_latest_version(&self, package_name: &str) -> Result<String>;
}
