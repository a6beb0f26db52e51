use super::command_runner::CommandRunner;
use crate::dependency_analysis::services::Adjacency;
use crate::ports::outbound::{ProjectConfig, ProjectGraphTool, ProjectListingTool};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Nx project listing: `nx show projects` and `nx show project <name>`
pub struct NxProjectLister {
    runner: CommandRunner,
}

impl NxProjectLister {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl ProjectListingTool for NxProjectLister {
    async fn list_projects(&self, repo_root: &Path) -> Result<Vec<String>> {
        let output = self
            .runner
            .run("npx", &["nx", "show", "projects", "--json"], repo_root)
            .await?
            .require_success()?;
        output.parse_json()
    }

    async fn project_config(&self, repo_root: &Path, name: &str) -> Result<Option<ProjectConfig>> {
        let output = self
            .runner
            .run("npx", &["nx", "show", "project", name, "--json"], repo_root)
            .await?;
        if !output.success {
            return Ok(None);
        }
        output.parse_json().map(Some)
    }
}

#[derive(Debug, Deserialize)]
struct GraphFile {
    graph: ProjectGraph,
}

#[derive(Debug, Deserialize)]
struct ProjectGraph {
    #[serde(default)]
    nodes: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    dependencies: BTreeMap<String, Vec<GraphDependency>>,
}

#[derive(Debug, Deserialize)]
struct GraphDependency {
    target: String,
}

/// Nx project graph exported with `nx graph --file=<tmp>.json`
pub struct NxProjectGraphTool {
    runner: CommandRunner,
}

impl NxProjectGraphTool {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    /// Keeps edges between workspace projects; `npm:` externals are dropped
    fn adjacency(graph: ProjectGraph) -> Adjacency {
        graph
            .dependencies
            .into_iter()
            .filter(|(source, _)| graph.nodes.contains_key(source))
            .map(|(source, deps)| {
                let mut targets: Vec<String> = Vec::new();
                for dep in deps {
                    if graph.nodes.contains_key(&dep.target)
                        && dep.target != source
                        && !targets.contains(&dep.target)
                    {
                        targets.push(dep.target);
                    }
                }
                (source, targets)
            })
            .collect()
    }
}

#[async_trait]
impl ProjectGraphTool for NxProjectGraphTool {
    async fn project_graph(&self, repo_root: &Path) -> Result<Adjacency> {
        let out_dir = tempfile::tempdir()?;
        let out_file = out_dir.path().join("project-graph.json");
        let file_arg = format!("--file={}", out_file.display());

        self.runner
            .run("npx", &["nx", "graph", &file_arg], repo_root)
            .await?
            .require_success()?;

        Self::read_graph_file(&out_file).await
    }
}

impl NxProjectGraphTool {
    /// Reads an exported graph file into project adjacency
    async fn read_graph_file(path: &Path) -> Result<Adjacency> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AnalysisError::ToolUnavailable {
                tool: "npx nx graph".to_string(),
                details: format!("graph file was not written: {}", e),
            }
        })?;
        let graph: GraphFile = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::ToolUnavailable {
                tool: "npx nx graph".to_string(),
                details: format!("unparseable graph file: {}", e),
            }
        })?;
        Ok(Self::adjacency(graph.graph))
    }
}
