use super::command_runner::CommandRunner;
use crate::ports::outbound::{UnusedDependencyTool, UnusedToolReport};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// `depcheck --json` run inside one project directory.
///
/// depcheck exits non-zero whenever it reports something, so only the
/// JSON on stdout decides success.
pub struct DepcheckTool {
    runner: CommandRunner,
}

impl DepcheckTool {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl UnusedDependencyTool for DepcheckTool {
    async fn find_unused(&self, project_path: &Path) -> Result<UnusedToolReport> {
        let output = self
            .runner
            .run("npx", &["depcheck", "--json"], project_path)
            .await?;
        output.parse_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_depcheck_output() {
        let json = r#"{
            "dependencies": ["left-pad"],
            "devDependencies": ["jest"],
            "missing": {"zod": ["/repo/libs/core/src/schema.ts"]},
            "using": {"react": ["/repo/apps/web/src/main.tsx"]},
            "invalidFiles": {},
            "invalidDirs": {}
        }"#;
        let report: UnusedToolReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.dependencies, vec!["left-pad"]);
        assert_eq!(report.dev_dependencies, vec!["jest"]);
        assert!(report.missing.contains_key("zod"));
    }
}
