use async_trait::async_trait;
use monorepo_deps::ports::outbound::LatestVersionRepository;
use monorepo_deps::shared::Result;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mock LatestVersionRepository: fixed answers, optional slow or failing names
#[derive(Default)]
pub struct MockLatestVersionRepository {
    versions: HashMap<String, String>,
    slow: HashMap<String, Duration>,
    pub calls: Arc<AtomicUsize>,
}

impl MockLatestVersionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, package: &str, latest: &str) -> Self {
        self.versions.insert(package.to_string(), latest.to_string());
        self
    }

    pub fn with_delay(mut self, package: &str, delay: Duration) -> Self {
        self.slow.insert(package.to_string(), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LatestVersionRepository for MockLatestVersionRepository {
    async fn fetch_latest_version(&self, package_name: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.slow.get(package_name) {
            tokio::time::sleep(*delay).await;
        }
        match self.versions.get(package_name) {
            Some(version) => Ok(version.clone()),
            None => anyhow::bail!("Mock registry: {} not found", package_name),
        }
    }
}
