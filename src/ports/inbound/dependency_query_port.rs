use crate::application::dto::{QueryResponse, RoutedResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// DependencyQueryPort - Inbound port for dependency analysis
///
/// This port is the logical query surface that front ends (CLI, a server
/// transport) drive. Every operation rebuilds its result from the current
/// file-system state unless a cached value is still fresh, and none of
/// them has side effects beyond cache population.
///
/// Recoverable conditions (unknown names, unavailable tools) come back as
/// reports. Only an unreadable repository root or a repository without
/// any discoverable project is an `Err`.
#[async_trait]
pub trait DependencyQueryPort: Send + Sync {
    /// Repository overview: projects, declaration counts, internal links
    async fn get_structure(&self) -> Result<QueryResponse>;

    /// Dependency names requested with more than one version string
    async fn get_version_inconsistencies(&self) -> Result<QueryResponse>;

    /// Unused and missing dependencies, for one project or all of them
    async fn get_unused_dependencies(&self, project: Option<&str>) -> Result<QueryResponse>;

    async fn get_outdated_dependencies(&self) -> Result<QueryResponse>;

    /// Exportable graph, optionally restricted to one project's outgoing edges
    async fn get_dependency_graph(&self, project: Option<&str>) -> Result<QueryResponse>;

    async fn get_circular_dependencies(&self) -> Result<QueryResponse>;

    async fn get_security_vulnerabilities(&self) -> Result<QueryResponse>;

    /// Projects declaring `dependency`
    async fn get_packages_using_dependency(&self, dependency: &str) -> Result<QueryResponse>;

    /// Declarations, internal dependencies and dependents of one project
    async fn get_project_dependencies(&self, project: &str) -> Result<QueryResponse>;

    /// Routes free text to exactly one of the operations above.
    /// Text that matches nothing yields the structure overview.
    async fn query(&self, text: &str) -> Result<RoutedResponse>;

    /// Dispatches by operation name (`getStructure`, `getProjectDependencies`, ...)
    ///
    /// # Errors
    /// Returns `AnalysisError::UnknownOperation` for names outside the query
    /// surface and `AnalysisError::Validation` when a required argument is missing.
    async fn call(&self, operation: &str, argument: Option<&str>) -> Result<QueryResponse>;

    /// Drops one cached key (and its `key:*` children) or the whole cache
    fn invalidate_cache(&self, key: Option<&str>);
}
