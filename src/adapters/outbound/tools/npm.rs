use super::command_runner::CommandRunner;
use crate::dependency_analysis::domain::AuditReport;
use crate::ports::outbound::{AuditTool, OutdatedDependencyTool, OutdatedEntry};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// In workspaces npm may list one package several times, once per dependent
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OutdatedValue {
    // Listed first: a struct would also accept a sequence
    Many(Vec<OutdatedEntry>),
    One(OutdatedEntry),
}

/// `npm outdated --json` at the repository root
pub struct NpmOutdatedTool {
    runner: CommandRunner,
}

impl NpmOutdatedTool {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    fn flatten(raw: BTreeMap<String, OutdatedValue>) -> BTreeMap<String, OutdatedEntry> {
        raw.into_iter()
            .filter_map(|(name, value)| match value {
                OutdatedValue::One(entry) => Some((name, entry)),
                OutdatedValue::Many(entries) => entries.into_iter().next().map(|e| (name, e)),
            })
            .collect()
    }
}

#[async_trait]
impl OutdatedDependencyTool for NpmOutdatedTool {
    async fn find_outdated(&self, repo_root: &Path) -> Result<BTreeMap<String, OutdatedEntry>> {
        let output = self
            .runner
            .run("npm", &["outdated", "--json"], repo_root)
            .await?;
        // Exit 0 with empty output: nothing is outdated
        if output.success && output.stdout.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(Self::flatten(output.parse_json()?))
    }
}

/// `npm audit --json` at the repository root
pub struct NpmAuditTool {
    runner: CommandRunner,
}

impl NpmAuditTool {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl AuditTool for NpmAuditTool {
    async fn audit(&self, repo_root: &Path) -> Result<AuditReport> {
        let output = self
            .runner
            .run("npm", &["audit", "--json"], repo_root)
            .await?;
        output.parse_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_outdated_output() {
        let json = r#"{
            "react": {"current": "17.0.2", "wanted": "17.0.2", "latest": "18.3.1", "location": "node_modules/react"},
            "axios": [
                {"current": "0.27.0", "wanted": "0.27.2", "latest": "1.7.2", "dependent": "api"},
                {"current": "1.6.0", "wanted": "1.7.2", "latest": "1.7.2", "dependent": "web"}
            ],
            "ghost": []
        }"#;
        let raw: BTreeMap<String, OutdatedValue> = serde_json::from_str(json).unwrap();
        let flat = NpmOutdatedTool::flatten(raw);

        assert_eq!(flat.len(), 2);
        assert_eq!(flat["react"].latest.as_deref(), Some("18.3.1"));
        assert_eq!(flat["axios"].current.as_deref(), Some("0.27.0"));
    }

    #[test]
    fn test_parse_audit_output() {
        let json = r#"{
            "advisories": {
                "1179": {
                    "id": 1179,
                    "module_name": "minimist",
                    "severity": "critical",
                    "title": "Prototype Pollution",
                    "findings": [{"version": "0.0.8", "paths": ["mkdirp>minimist"]}]
                }
            },
            "metadata": {"vulnerabilities": {"info": 0, "low": 0, "moderate": 0, "high": 0, "critical": 1}}
        }"#;
        let report: AuditReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.advisories["1179"].module_name, "minimist");
        assert_eq!(report.metadata.vulnerabilities["critical"], 1);
    }
}
