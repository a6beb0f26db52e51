use serde::{Deserialize, Serialize};
use std::fmt;

/// Manifest section a dependency is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Production,
    Dev,
    Peer,
}

impl DependencyKind {
    pub const ALL: [DependencyKind; 3] = [
        DependencyKind::Production,
        DependencyKind::Dev,
        DependencyKind::Peer,
    ];
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Production => write!(f, "production"),
            DependencyKind::Dev => write!(f, "dev"),
            DependencyKind::Peer => write!(f, "peer"),
        }
    }
}

/// One manifest entry: `owner` declares `dep_name` at `version` under `kind`.
///
/// The version string is opaque (ranges, tags and `workspace:` markers are kept verbatim).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyDeclaration {
    pub owner: String,
    pub dep_name: String,
    pub version: String,
    pub kind: DependencyKind,
}

impl DependencyDeclaration {
    pub fn new(
        owner: impl Into<String>,
        dep_name: impl Into<String>,
        version: impl Into<String>,
        kind: DependencyKind,
    ) -> Self {
        Self {
            owner: owner.into(),
            dep_name: dep_name.into(),
            version: version.into(),
            kind,
        }
    }
}
