pub mod declaration;
pub mod dependency_graph;
pub mod findings;
pub mod manifest;
pub mod project;
pub mod vulnerability;

pub use declaration::{DependencyDeclaration, DependencyKind};
pub use dependency_graph::{DependencyEdge, DependencyGraph, GraphNode};
pub use findings::{Cycle, ReconciliationResult, VersionInconsistency, VersionOccurrence};
pub use manifest::PackageManifest;
pub use project::{Project, ProjectType};
pub use vulnerability::{
    Advisory, AdvisoryFinding, AuditMetadata, AuditReport, DirectVulnerability, Severity,
};
