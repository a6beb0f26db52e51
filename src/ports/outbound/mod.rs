/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, external tools,
/// package registry, cache, console).
pub mod analysis_cache;
pub mod dependency_tools;
pub mod latest_version_repository;
pub mod manifest_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod source_scanner;
pub mod workspace_reader;

pub use analysis_cache::AnalysisCache;
pub use dependency_tools::{
    AuditTool, OutdatedDependencyTool, OutdatedEntry, ProjectGraphTool, ProjectListingTool,
    UnusedDependencyTool, UnusedToolReport,
};
pub use latest_version_repository::LatestVersionRepository;
pub use manifest_reader::ManifestReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use source_scanner::SourceScanner;
pub use workspace_reader::{ProjectConfig, WorkspaceEntry, WorkspaceReader};
