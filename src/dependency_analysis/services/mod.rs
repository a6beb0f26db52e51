pub mod advisory_extractor;
pub mod consistency_analyzer;
pub mod cycle_detector;
pub mod graph_builder;
pub mod import_scanner;
pub mod usage_reconciler;

pub use advisory_extractor::AdvisoryExtractor;
pub use consistency_analyzer::ConsistencyAnalyzer;
pub use cycle_detector::{Adjacency, CycleDetector};
pub use graph_builder::DependencyGraphBuilder;
pub use import_scanner::ImportScanner;
pub use usage_reconciler::UsageReconciler;
