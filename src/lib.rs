//! monorepo-deps - dependency structure analysis for JavaScript/TypeScript monorepos
//!
//! Discovers the projects of a monorepo, builds one dependency graph from
//! their package manifests and answers questions about it: version drift,
//! circular project dependencies, unused or missing declarations, outdated
//! and vulnerable packages, and who depends on what.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_analysis`): value types and pure analyses
//! - **Application Layer** (`application`): discovery, query routing and the analysis service
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use monorepo_deps::prelude::*;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! let reader: Arc<dyn WorkspaceReader> = Arc::new(FileSystemReader::new());
//! let discovery = ProjectDiscovery::new(vec![
//!     Box::new(WorkspaceManifestStrategy::new(Arc::clone(&reader), "workspace.json")),
//!     Box::new(DirectoryScanStrategy::new(reader, vec!["apps".into(), "libs".into()])),
//! ]);
//!
//! let service = DependencyAnalysisService::new(
//!     AnalysisSettings::new(PathBuf::from(".")),
//!     discovery,
//!     FileSystemReader::new(),
//!     FileSystemSourceScanner::default(),
//!     StderrProgressReporter::new(),
//!     Arc::new(InMemoryAnalysisCache::default()),
//!     ExternalTools::none(),
//! );
//!
//! let answer = service.query("which packages use lodash").await?;
//! println!("{}", serde_json::to_string_pretty(&answer)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod dependency_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::cache::InMemoryAnalysisCache;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemSourceScanner, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::application::discovery::{
        DirectoryScanStrategy, ProjectDiscovery, WorkspaceManifestStrategy,
    };
    pub use crate::application::dto::{AnalysisSettings, QueryResponse, RoutedResponse};
    pub use crate::application::query::{QueryRouter, Route};
    pub use crate::application::use_cases::{DependencyAnalysisService, ExternalTools};
    pub use crate::dependency_analysis::domain::{DependencyGraph, Project, ProjectType};
    pub use crate::dependency_analysis::services::{
        ConsistencyAnalyzer, CycleDetector, DependencyGraphBuilder, UsageReconciler,
    };
    pub use crate::ports::inbound::DependencyQueryPort;
    pub use crate::ports::outbound::{AnalysisCache, ManifestReader, WorkspaceReader};
    pub use crate::shared::Result;
}
