use async_trait::async_trait;
use monorepo_deps::dependency_analysis::domain::AuditReport;
use monorepo_deps::dependency_analysis::services::Adjacency;
use monorepo_deps::ports::outbound::{
    AuditTool, OutdatedDependencyTool, OutdatedEntry, ProjectGraphTool, UnusedDependencyTool,
    UnusedToolReport,
};
use monorepo_deps::shared::error::AnalysisError;
use monorepo_deps::shared::Result;
use std::collections::BTreeMap;
use std::path::Path;

fn unavailable(tool: &str) -> anyhow::Error {
    AnalysisError::ToolUnavailable {
        tool: tool.to_string(),
        details: "mock failure".to_string(),
    }
    .into()
}

/// Mock AuditTool returning a parsed audit document, or failing
pub struct MockAuditTool {
    report: Option<AuditReport>,
}

impl MockAuditTool {
    pub fn from_json(json: &str) -> Self {
        Self {
            report: Some(serde_json::from_str(json).unwrap()),
        }
    }

    pub fn with_failure() -> Self {
        Self { report: None }
    }
}

#[async_trait]
impl AuditTool for MockAuditTool {
    async fn audit(&self, _repo_root: &Path) -> Result<AuditReport> {
        self.report.clone().ok_or_else(|| unavailable("npm audit"))
    }
}

/// Mock ProjectGraphTool with a fixed adjacency list
pub struct MockProjectGraphTool {
    adjacency: Option<Adjacency>,
}

impl MockProjectGraphTool {
    pub fn new(edges: &[(&str, &[&str])]) -> Self {
        Self {
            adjacency: Some(
                edges
                    .iter()
                    .map(|(from, to)| {
                        (from.to_string(), to.iter().map(|t| t.to_string()).collect())
                    })
                    .collect(),
            ),
        }
    }

    pub fn with_failure() -> Self {
        Self { adjacency: None }
    }
}

#[async_trait]
impl ProjectGraphTool for MockProjectGraphTool {
    async fn project_graph(&self, _repo_root: &Path) -> Result<Adjacency> {
        self.adjacency.clone().ok_or_else(|| unavailable("nx graph"))
    }
}

/// Mock UnusedDependencyTool keyed by the last path component of the project root
#[derive(Default)]
pub struct MockUnusedTool {
    reports: BTreeMap<String, UnusedToolReport>,
    fail: bool,
}

impl MockUnusedTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(mut self, project_dir: &str, unused: &[&str], missing: &[&str]) -> Self {
        self.reports.insert(
            project_dir.to_string(),
            UnusedToolReport {
                dependencies: unused.iter().map(|s| s.to_string()).collect(),
                dev_dependencies: Vec::new(),
                missing: missing
                    .iter()
                    .map(|m| (m.to_string(), vec!["src/index.ts".to_string()]))
                    .collect(),
            },
        );
        self
    }

    pub fn with_failure() -> Self {
        Self {
            reports: BTreeMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl UnusedDependencyTool for MockUnusedTool {
    async fn find_unused(&self, project_path: &Path) -> Result<UnusedToolReport> {
        if self.fail {
            return Err(unavailable("depcheck"));
        }
        let key = project_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(self.reports.get(&key).cloned().unwrap_or_default())
    }
}

/// Mock OutdatedDependencyTool
pub struct MockOutdatedTool {
    entries: Option<BTreeMap<String, OutdatedEntry>>,
}

impl MockOutdatedTool {
    pub fn new(rows: &[(&str, &str, &str)]) -> Self {
        Self {
            entries: Some(
                rows.iter()
                    .map(|(name, current, latest)| {
                        (
                            name.to_string(),
                            OutdatedEntry {
                                current: Some(current.to_string()),
                                wanted: Some(current.to_string()),
                                latest: Some(latest.to_string()),
                                location: None,
                            },
                        )
                    })
                    .collect(),
            ),
        }
    }

    pub fn with_failure() -> Self {
        Self { entries: None }
    }
}

#[async_trait]
impl OutdatedDependencyTool for MockOutdatedTool {
    async fn find_outdated(&self, _repo_root: &Path) -> Result<BTreeMap<String, OutdatedEntry>> {
        self.entries.clone().ok_or_else(|| unavailable("npm outdated"))
    }
}
