use super::DependencyKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One place a dependency is declared with a given version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionOccurrence {
    pub project: String,
    pub version: String,
    pub kind: DependencyKind,
}

/// A dependency name requested with more than one distinct version string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInconsistency {
    pub dep_name: String,
    pub occurrences: Vec<VersionOccurrence>,
    pub distinct_version_count: usize,
}

impl VersionInconsistency {
    /// Distinct version strings, sorted
    pub fn versions(&self) -> BTreeSet<&str> {
        self.occurrences.iter().map(|o| o.version.as_str()).collect()
    }
}

/// Closed chain of internal edges, listed from the node where the loop
/// was entered. The last member depends on the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle(Vec<String>);

impl Cycle {
    pub fn new(members: Vec<String>) -> Self {
        Self(members)
    }

    pub fn members(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|m| m == name)
    }

    /// Deduplication key: sorted member names joined with ','.
    /// Two cycles over the same node set share a key whatever their edge order.
    pub fn canonical_key(&self) -> String {
        let mut sorted: Vec<&str> = self.0.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.join(",")
    }
}

/// Outcome of comparing declared dependencies against scanned imports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    pub project: String,
    /// Declared names that some import resolved to
    pub matched_declared: BTreeSet<String>,
    /// Import candidates with no declared counterpart (used but undeclared)
    pub unmatched_imports: BTreeSet<String>,
    /// Declared names no import resolved to (declared but seemingly unused)
    pub unused_declared: BTreeSet<String>,
}
