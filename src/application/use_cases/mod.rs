/// Use cases module containing application business logic orchestration
mod analyze_dependencies;

pub use analyze_dependencies::{DependencyAnalysisService, ExternalTools};
