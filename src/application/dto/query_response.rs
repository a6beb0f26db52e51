use super::{
    CircularReport, GraphReport, InconsistencyReport, NotFoundReport, OutdatedReport,
    ProjectDependenciesReport, SecurityReport, StructureReport, UnusedReport, UsedByReport,
};
use serde::Serialize;

/// Result of any query-surface operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Structure(StructureReport),
    Inconsistencies(InconsistencyReport),
    Unused(UnusedReport),
    Outdated(OutdatedReport),
    Graph(GraphReport),
    Circular(CircularReport),
    Security(SecurityReport),
    UsedBy(UsedByReport),
    ProjectDependencies(ProjectDependenciesReport),
    NotFound(NotFoundReport),
    CacheInvalidated(CacheInvalidation),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheInvalidation {
    /// Invalidated key, `None` for the whole cache
    pub invalidated: Option<String>,
}

impl QueryResponse {
    /// True when the report carries findings worth failing a CI run over
    pub fn has_issues(&self) -> bool {
        match self {
            QueryResponse::Inconsistencies(r) => r.count > 0,
            QueryResponse::Unused(r) => r.projects.iter().any(|p| p.has_findings()),
            QueryResponse::Outdated(r) => r.outdated_count > 0,
            QueryResponse::Circular(r) => r.count > 0,
            QueryResponse::Security(r) => r.total > 0 || !r.direct_vulnerabilities.is_empty(),
            QueryResponse::Structure(_)
            | QueryResponse::Graph(_)
            | QueryResponse::UsedBy(_)
            | QueryResponse::ProjectDependencies(_)
            | QueryResponse::NotFound(_)
            | QueryResponse::CacheInvalidated(_) => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryResponse::NotFound(_))
    }
}

/// A free-text query answer together with the operation it was routed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedResponse {
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
    pub result: QueryResponse,
}
