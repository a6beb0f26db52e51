use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Advisory severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// Parses audit severity strings; "medium" is accepted as an alias of "moderate"
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "info" => Some(Severity::Info),
            "low" => Some(Severity::Low),
            "moderate" | "medium" => Some(Severity::Moderate),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        write!(f, "{}", label)
    }
}

/// Structured output of the audit tool
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuditReport {
    #[serde(default)]
    pub metadata: AuditMetadata,
    #[serde(default)]
    pub advisories: BTreeMap<String, Advisory>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuditMetadata {
    /// severity name -> count
    #[serde(default)]
    pub vulnerabilities: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Advisory {
    #[serde(default)]
    pub id: Option<u64>,
    pub module_name: String,
    pub severity: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub vulnerable_versions: Option<String>,
    #[serde(default)]
    pub patched_versions: Option<String>,
    #[serde(default)]
    pub findings: Vec<AdvisoryFinding>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdvisoryFinding {
    #[serde(default)]
    pub version: Option<String>,
    /// '>'-delimited ancestry chains, e.g. "express>body-parser>qs"
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Advisory affecting a direct dependency of the root project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectVulnerability {
    pub package: String,
    pub severity: Severity,
    pub advisory_id: String,
    pub title: Option<String>,
    pub vulnerable_versions: Option<String>,
    pub patched_versions: Option<String>,
}
