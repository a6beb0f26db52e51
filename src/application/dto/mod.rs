/// Data Transfer Objects for application layer
///
/// DTOs carry settings into the analysis service and reports out of it,
/// keeping the domain layer isolated from presentation.
mod analysis_reports;
mod analysis_settings;
mod query_response;
mod structure_report;

pub use analysis_reports::{
    CircularReport, DependencyUsage, EdgeSource, GraphReport, InconsistencyReport,
    NotFoundReport, OutdatedDependency, OutdatedReport, OutdatedSource, OutdatedStatus,
    ProjectDependenciesReport, ProjectUnusedReport, SecurityReport, UnusedReport, UnusedSource,
    UsedByReport,
};
pub use analysis_settings::{AnalysisSettings, DependencyMode, LookupSettings};
pub use query_response::{CacheInvalidation, QueryResponse, RoutedResponse};
pub use structure_report::{DeclarationCounts, ProjectSummary, StructureReport};
