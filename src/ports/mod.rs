/// Ports: the seams between the analysis core and the outside world
///
/// `inbound` is the query surface the CLI drives; `outbound` holds the
/// contracts for files, external tools, the registry, cache and console.
pub mod inbound;
pub mod outbound;
