/// Integration tests for the application layer: real filesystem adapters
/// over a temporary monorepo, mocked external tools.
mod test_utilities;

use monorepo_deps::application::dto::{
    EdgeSource, OutdatedSource, OutdatedStatus, UnusedSource,
};
use monorepo_deps::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use test_utilities::fixtures::{sample_monorepo, write};
use test_utilities::mocks::*;

type Service = DependencyAnalysisService<
    FileSystemReader,
    FileSystemSourceScanner,
    MockProgressReporter,
    InMemoryAnalysisCache,
>;

fn service_with(root: &Path, tools: ExternalTools, reporter: MockProgressReporter) -> Service {
    let reader: Arc<dyn WorkspaceReader> = Arc::new(FileSystemReader::new());
    let discovery = ProjectDiscovery::new(vec![
        Box::new(WorkspaceManifestStrategy::new(Arc::clone(&reader), "workspace.json")),
        Box::new(DirectoryScanStrategy::new(
            reader,
            vec!["apps".to_string(), "libs".to_string()],
        )),
    ]);
    let mut settings = AnalysisSettings::new(root.to_path_buf());
    settings.lookup.batch_size = 2;
    settings.lookup.batch_delay = Duration::from_millis(1);
    settings.lookup.timeout = Duration::from_millis(200);

    DependencyAnalysisService::new(
        settings,
        discovery,
        FileSystemReader::new(),
        FileSystemSourceScanner::default(),
        reporter,
        Arc::new(InMemoryAnalysisCache::default()),
        tools,
    )
}

fn service(root: &Path) -> Service {
    service_with(root, ExternalTools::none(), MockProgressReporter::new())
}

#[tokio::test]
async fn test_structure_of_sample_monorepo() {
    let repo = sample_monorepo();
    let response = service(repo.path()).get_structure().await.unwrap();

    let QueryResponse::Structure(report) = response else {
        panic!("expected structure report");
    };
    assert_eq!(report.discovery_strategy, "directory-scan");
    assert_eq!(report.project_count, 4);
    let names: Vec<_> = report.projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["api", "web", "core", "utils"]);
    assert_eq!(report.projects[0].project_type, ProjectType::Application);
    assert_eq!(report.projects[2].project_type, ProjectType::Library);
    // react, axios, express, lodash
    assert_eq!(report.external_dependency_count, 4);
    // web->core, api->utils, core->utils, utils->core
    assert_eq!(report.internal_edge_count, 4);
}

#[tokio::test]
async fn test_workspace_manifest_takes_precedence() {
    let repo = sample_monorepo();
    write(
        repo.path(),
        "workspace.json",
        r#"{"version": 2, "projects": {"web": "apps/web", "core": {"root": "libs/core", "projectType": "library"}}}"#,
    );

    let QueryResponse::Structure(report) = service(repo.path()).get_structure().await.unwrap()
    else {
        panic!("expected structure report");
    };
    assert_eq!(report.discovery_strategy, "workspace-manifest");
    assert_eq!(report.project_count, 2);
}

#[tokio::test]
async fn test_version_inconsistency_is_reported() {
    let repo = sample_monorepo();
    let QueryResponse::Inconsistencies(report) = service(repo.path())
        .get_version_inconsistencies()
        .await
        .unwrap()
    else {
        panic!("expected inconsistency report");
    };

    assert_eq!(report.count, 1);
    let axios = &report.inconsistencies["axios"];
    assert_eq!(axios.distinct_version_count, 2);
    let versions: Vec<_> = axios.versions().into_iter().collect();
    assert_eq!(versions, vec!["^0.27.0", "^1.6.0"]);
}

#[tokio::test]
async fn test_circular_dependency_from_declared_edges() {
    let repo = sample_monorepo();
    let QueryResponse::Circular(report) = service(repo.path())
        .get_circular_dependencies()
        .await
        .unwrap()
    else {
        panic!("expected circular report");
    };

    assert_eq!(report.source, EdgeSource::DeclaredDependencies);
    assert_eq!(report.count, 1);
    let members: BTreeSet<_> = report.cycles[0].members().iter().cloned().collect();
    assert_eq!(members, BTreeSet::from(["core".to_string(), "utils".to_string()]));
}

#[tokio::test]
async fn test_circular_dependency_tool_failure_falls_back() {
    let repo = sample_monorepo();
    let tools = ExternalTools {
        project_graph: Some(Box::new(MockProjectGraphTool::with_failure())),
        ..ExternalTools::none()
    };
    let QueryResponse::Circular(report) = service_with(repo.path(), tools, MockProgressReporter::new())
        .get_circular_dependencies()
        .await
        .unwrap()
    else {
        panic!("expected circular report");
    };

    assert_eq!(report.source, EdgeSource::DeclaredDependencies);
    assert_eq!(report.count, 1);
    assert_eq!(report.notes.len(), 1);
}

#[tokio::test]
async fn test_circular_dependency_from_graph_tool() {
    let repo = sample_monorepo();
    let tools = ExternalTools {
        project_graph: Some(Box::new(MockProjectGraphTool::new(&[
            ("web", &["api"]),
            ("api", &["web"]),
            ("core", &[]),
        ]))),
        ..ExternalTools::none()
    };
    let QueryResponse::Circular(report) = service_with(repo.path(), tools, MockProgressReporter::new())
        .get_circular_dependencies()
        .await
        .unwrap()
    else {
        panic!("expected circular report");
    };

    assert_eq!(report.source, EdgeSource::ProjectGraphTool);
    let members: BTreeSet<_> = report.cycles[0].members().iter().cloned().collect();
    assert_eq!(members, BTreeSet::from(["api".to_string(), "web".to_string()]));
}

#[tokio::test]
async fn test_unused_dependencies_from_import_scan() {
    let repo = sample_monorepo();
    let QueryResponse::Unused(report) = service(repo.path())
        .get_unused_dependencies(None)
        .await
        .unwrap()
    else {
        panic!("expected unused report");
    };

    let by_name = |name: &str| report.projects.iter().find(|p| p.project == name).unwrap();

    let core = by_name("core");
    assert_eq!(core.source, UnusedSource::ImportScan);
    assert_eq!(core.unused_dependencies, vec!["lodash"]);

    let api = by_name("api");
    // node:path is a builtin and never reported
    assert_eq!(api.missing, vec!["zod"]);
    assert_eq!(api.unused_dependencies, vec!["utils"]);

    let web = by_name("web");
    assert!(!web.has_findings());
}

#[tokio::test]
async fn test_unused_dependencies_prefers_tool() {
    let repo = sample_monorepo();
    let tools = ExternalTools {
        unused: Some(Box::new(
            MockUnusedTool::new().with_report("web", &["react"], &["dayjs"]),
        )),
        ..ExternalTools::none()
    };
    let QueryResponse::Unused(report) = service_with(repo.path(), tools, MockProgressReporter::new())
        .get_unused_dependencies(Some("web"))
        .await
        .unwrap()
    else {
        panic!("expected unused report");
    };

    assert_eq!(report.projects.len(), 1);
    assert_eq!(report.projects[0].source, UnusedSource::Tool);
    assert_eq!(report.projects[0].unused_dependencies, vec!["react"]);
    assert_eq!(report.projects[0].missing, vec!["dayjs"]);
}

#[tokio::test]
async fn test_unused_dependencies_unknown_project() {
    let repo = sample_monorepo();
    let response = service(repo.path())
        .get_unused_dependencies(Some("Cor"))
        .await
        .unwrap();

    let QueryResponse::NotFound(report) = response else {
        panic!("expected not found");
    };
    assert_eq!(report.suggestions, vec!["core"]);
    assert_eq!(report.available_projects.len(), 4);
}

#[tokio::test]
async fn test_outdated_via_registry() {
    let repo = sample_monorepo();
    let registry = MockLatestVersionRepository::new()
        .with_version("react", "18.2.0")
        .with_version("express", "5.0.0")
        .with_version("lodash", "4.17.21")
        .with_delay("lodash", Duration::from_secs(5));
    let reporter = MockProgressReporter::new();
    let tools = ExternalTools {
        outdated: Some(Box::new(MockOutdatedTool::with_failure())),
        registry: Some(Box::new(registry)),
        ..ExternalTools::none()
    };
    let QueryResponse::Outdated(report) = service_with(repo.path(), tools, reporter.clone())
        .get_outdated_dependencies()
        .await
        .unwrap()
    else {
        panic!("expected outdated report");
    };

    assert_eq!(report.source, OutdatedSource::Registry);
    let status = |name: &str| {
        report
            .dependencies
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.status)
            .unwrap()
    };
    assert_eq!(status("react"), OutdatedStatus::UpToDate);
    assert_eq!(status("express"), OutdatedStatus::Outdated);
    // lodash times out, axios is unknown to the registry
    assert_eq!(status("lodash"), OutdatedStatus::Unknown);
    assert_eq!(status("axios"), OutdatedStatus::Unknown);
    assert_eq!(report.outdated_count, 1);
    assert_eq!(report.unknown_count, 2);
    assert_eq!(report.notes.len(), 1);
    assert!(!reporter.warnings().is_empty());
}

#[tokio::test]
async fn test_outdated_via_tool() {
    let repo = sample_monorepo();
    let tools = ExternalTools {
        outdated: Some(Box::new(MockOutdatedTool::new(&[("react", "17.0.2", "18.3.1")]))),
        ..ExternalTools::none()
    };
    let QueryResponse::Outdated(report) = service_with(repo.path(), tools, MockProgressReporter::new())
        .get_outdated_dependencies()
        .await
        .unwrap()
    else {
        panic!("expected outdated report");
    };

    assert_eq!(report.source, OutdatedSource::Tool);
    assert_eq!(report.outdated_count, 1);
    assert_eq!(report.dependencies[0].latest.as_deref(), Some("18.3.1"));
}

#[tokio::test]
async fn test_security_report_from_audit() {
    let repo = sample_monorepo();
    let audit = MockAuditTool::from_json(
        r#"{
            "advisories": {
                "1": {"id": 1, "module_name": "axios", "severity": "high", "title": "SSRF",
                      "findings": [{"version": "0.27.2", "paths": ["axios"]}]},
                "2": {"id": 2, "module_name": "follow-redirects", "severity": "moderate",
                      "findings": [{"version": "1.14.0", "paths": ["axios>form-data>follow-redirects"]}]}
            },
            "metadata": {"vulnerabilities": {"info": 0, "low": 0, "moderate": 1, "high": 1, "critical": 0}}
        }"#,
    );
    let tools = ExternalTools {
        audit: Some(Box::new(audit)),
        ..ExternalTools::none()
    };
    let QueryResponse::Security(report) = service_with(repo.path(), tools, MockProgressReporter::new())
        .get_security_vulnerabilities()
        .await
        .unwrap()
    else {
        panic!("expected security report");
    };

    assert!(report.audited);
    assert_eq!(report.total, 2);
    assert_eq!(report.direct_vulnerabilities.len(), 1);
    assert_eq!(report.direct_vulnerabilities[0].package, "axios");
}

#[tokio::test]
async fn test_security_report_without_audit_tool() {
    let repo = sample_monorepo();
    let QueryResponse::Security(report) = service(repo.path())
        .get_security_vulnerabilities()
        .await
        .unwrap()
    else {
        panic!("expected security report");
    };

    assert!(!report.audited);
    assert_eq!(report.total, 0);
    assert_eq!(report.notes.len(), 1);
}

#[tokio::test]
async fn test_free_text_queries_route_to_reports() {
    let repo = sample_monorepo();
    let service = service(repo.path());

    let routed = service.query("which packages use axios?").await.unwrap();
    assert_eq!(routed.operation, "getPackagesUsingDependency");
    let QueryResponse::UsedBy(report) = routed.result else {
        panic!("expected used-by report");
    };
    assert_eq!(report.count, 2);
    assert_eq!(report.versions, vec!["^0.27.0", "^1.6.0"]);

    let routed = service.query("dependencies of project web").await.unwrap();
    let QueryResponse::ProjectDependencies(report) = routed.result else {
        panic!("expected project dependencies report");
    };
    assert_eq!(report.internal_dependencies, vec!["core"]);

    let routed = service.query("are there circular dependencies").await.unwrap();
    assert_eq!(routed.operation, "getCircularDependencies");

    let routed = service.query("tell me about this repo").await.unwrap();
    assert_eq!(routed.operation, "getStructure");
}

#[tokio::test]
async fn test_graph_for_one_project() {
    let repo = sample_monorepo();
    let QueryResponse::Graph(report) = service(repo.path())
        .get_dependency_graph(Some("web"))
        .await
        .unwrap()
    else {
        panic!("expected graph report");
    };

    assert_eq!(report.project.as_deref(), Some("web"));
    assert_eq!(report.edges.len(), 3);
    assert_eq!(report.nodes.len(), 4);
    assert!(report.edges.iter().all(|e| e.from == "web"));
}

#[tokio::test]
async fn test_cached_report_survives_file_changes_until_invalidated() {
    let repo = sample_monorepo();
    let service = service(repo.path());

    let first = service.get_version_inconsistencies().await.unwrap();
    write(
        repo.path(),
        "apps/api/package.json",
        r#"{"name": "api", "dependencies": {"axios": "^1.6.0"}}"#,
    );

    let cached = service.get_version_inconsistencies().await.unwrap();
    assert_eq!(first, cached);

    service.invalidate_cache(Some("inconsistencies"));
    let QueryResponse::Inconsistencies(fresh) = service.get_version_inconsistencies().await.unwrap()
    else {
        panic!("expected inconsistency report");
    };
    assert_eq!(fresh.count, 0);
}

#[tokio::test]
async fn test_empty_repository_has_no_projects() {
    let repo = tempfile::TempDir::new().unwrap();
    let err = service(repo.path()).get_structure().await.unwrap_err();
    assert!(err.to_string().contains("No projects discovered"));
}

#[tokio::test]
async fn test_call_by_operation_name() {
    let repo = sample_monorepo();
    let service = service(repo.path());

    let response = service
        .call("getPackagesUsingDependency", Some("left-pad"))
        .await
        .unwrap();
    assert!(response.is_not_found());

    let err = service.call("getEverything", None).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Unknown operation: getEverything"));
    assert!(message.contains("invalidateCache"));
}
