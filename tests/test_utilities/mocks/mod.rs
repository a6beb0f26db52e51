/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_registry;
mod mock_tools;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_registry::MockLatestVersionRepository;
pub use mock_tools::{MockAuditTool, MockOutdatedTool, MockProjectGraphTool, MockUnusedTool};
