/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// filesystem, child-process tools, the npm registry, cache and console.
pub mod outbound;
