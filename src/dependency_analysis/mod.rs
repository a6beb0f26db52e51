//! Dependency analysis domain: pure types and services with no I/O.

pub mod domain;
pub mod services;
