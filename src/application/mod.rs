/// Application layer - Use cases and DTOs
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod discovery;
pub mod dto;
pub mod latest_version_checker;
pub mod query;
pub mod use_cases;
