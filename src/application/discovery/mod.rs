mod strategies;

pub use strategies::{
    DirectoryScanStrategy, DiscoveryStrategy, ToolListingStrategy, WorkspaceManifestStrategy,
};

use crate::dependency_analysis::domain::Project;
use std::path::Path;
use tracing::{debug, info};

/// Outcome of discovery: the projects and the strategy that found them
#[derive(Debug, Clone)]
pub struct DiscoveryResult {
    pub strategy: String,
    pub projects: Vec<Project>,
}

/// ProjectDiscovery - ordered fallback chain of discovery strategies
///
/// Strategies are tried in order until one succeeds. If all of them fail
/// the result is empty rather than an error; deciding whether an empty
/// repository is fatal is left to the caller.
pub struct ProjectDiscovery {
    strategies: Vec<Box<dyn DiscoveryStrategy>>,
}

impl ProjectDiscovery {
    pub fn new(strategies: Vec<Box<dyn DiscoveryStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub async fn discover(&self, repo_root: &Path) -> DiscoveryResult {
        for strategy in &self.strategies {
            match strategy.discover(repo_root).await {
                Ok(projects) => {
                    info!(
                        strategy = strategy.name(),
                        count = projects.len(),
                        "projects discovered"
                    );
                    return DiscoveryResult {
                        strategy: strategy.name().to_string(),
                        projects,
                    };
                }
                Err(e) => {
                    debug!(strategy = strategy.name(), error = %e, "discovery strategy failed, falling back");
                }
            }
        }

        DiscoveryResult {
            strategy: "none".to_string(),
            projects: Vec::new(),
        }
    }
}
