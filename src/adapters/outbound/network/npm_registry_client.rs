use crate::ports::outbound::LatestVersionRepository;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: Option<String>,
}

/// npm registry adapter for the `LatestVersionRepository` port.
///
/// Queries `<registry>/<name>/latest` and reads the `version` field. Callers
/// bound each lookup with their own timeout; the client timeout is only a
/// backstop.
pub struct NpmRegistryClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl NpmRegistryClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_REGISTRY_URL)
    }

    /// Creates a client against a custom registry (mirrors, tests)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let user_agent = format!("monorepo-deps/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 2,
        })
    }

    /// Rejects names that could escape the package path
    fn validate_package_name(package_name: &str) -> Result<()> {
        if package_name.is_empty() {
            anyhow::bail!("Package name is empty");
        }
        if package_name.contains("..") || package_name.contains('\\') {
            anyhow::bail!("Security: package name contains '..' or '\\' which is not allowed");
        }
        if package_name.contains('#') || package_name.contains('?') {
            anyhow::bail!("Security: package name contains URL-unsafe characters");
        }

        let slashes = package_name.matches('/').count();
        let scoped = package_name.starts_with('@');
        if (scoped && slashes != 1) || (!scoped && slashes != 0) {
            anyhow::bail!(
                "Security: package name '{}' contains path separators which are not allowed",
                package_name
            );
        }
        Ok(())
    }

    /// `@scope/name` keeps its `@`; the separator is encoded as the registry expects
    fn package_path(package_name: &str) -> String {
        match package_name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
            Some((scope, name)) => format!(
                "@{}%2F{}",
                urlencoding::encode(scope),
                urlencoding::encode(name)
            ),
            None => urlencoding::encode(package_name).into_owned(),
        }
    }

    fn latest_url(&self, package_name: &str) -> String {
        format!("{}/{}/latest", self.base_url, Self::package_path(package_name))
    }

    async fn fetch_once(&self, package_name: &str) -> Result<String> {
        let response = self.client.get(self.latest_url(package_name)).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("npm registry returned status code {}", response.status());
        }

        let manifest: LatestManifest = response.json().await?;
        manifest
            .version
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow::anyhow!("npm registry response has no version for {}", package_name))
    }
}

#[async_trait]
impl LatestVersionRepository for NpmRegistryClient {
    async fn fetch_latest_version(&self, package_name: &str) -> Result<String> {
        Self::validate_package_name(package_name)?;

        let mut attempt = 1;
        loop {
            match self.fetch_once(package_name).await {
                Ok(version) => return Ok(version),
                Err(e) if attempt >= self.max_retries => return Err(e),
                Err(e) => {
                    tracing::debug!(package = package_name, attempt, error = %e, "registry lookup failed, retrying");
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
            }
        }
    }
}
