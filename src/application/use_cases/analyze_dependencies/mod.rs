use crate::application::discovery::ProjectDiscovery;
use crate::application::dto::{
    AnalysisSettings, CacheInvalidation, CircularReport, DeclarationCounts, DependencyMode,
    DependencyUsage, EdgeSource, GraphReport, InconsistencyReport, NotFoundReport,
    OutdatedDependency, OutdatedReport, OutdatedSource, OutdatedStatus,
    ProjectDependenciesReport, ProjectSummary, ProjectUnusedReport, QueryResponse,
    RoutedResponse, SecurityReport, StructureReport, UnusedReport, UnusedSource, UsedByReport,
};
use crate::application::latest_version_checker::LatestVersionChecker;
use crate::application::query::{QueryRouter, Route, ROUTE_OPERATIONS};
use crate::dependency_analysis::domain::{
    DependencyGraph, DependencyKind, GraphNode, PackageManifest, Project,
};
use crate::dependency_analysis::services::{
    AdvisoryExtractor, ConsistencyAnalyzer, CycleDetector, DependencyGraphBuilder,
    ImportScanner, UsageReconciler,
};
use crate::ports::inbound::DependencyQueryPort;
use crate::ports::outbound::{
    AnalysisCache, AuditTool, LatestVersionRepository, ManifestReader, OutdatedDependencyTool,
    ProgressReporter, ProjectGraphTool, SourceScanner, UnusedDependencyTool,
};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum number of name suggestions attached to a NotFound report
const MAX_SUGGESTIONS: usize = 5;

/// Optional external collaborators. A missing tool means the built-in
/// fallback is used straight away.
#[derive(Default)]
pub struct ExternalTools {
    pub unused: Option<Box<dyn UnusedDependencyTool>>,
    pub outdated: Option<Box<dyn OutdatedDependencyTool>>,
    pub audit: Option<Box<dyn AuditTool>>,
    pub project_graph: Option<Box<dyn ProjectGraphTool>>,
    pub registry: Option<Box<dyn LatestVersionRepository>>,
}

impl ExternalTools {
    /// No tools at all: every analysis takes its built-in path
    pub fn none() -> Self {
        Self::default()
    }
}

/// Discovery output plus everything derived from the manifests
struct RepositorySnapshot {
    discovery_strategy: String,
    graph: DependencyGraph,
    manifests: HashMap<String, PackageManifest>,
}

/// Cacheable outcome of a lookup by name
#[derive(Serialize, Deserialize)]
enum Lookup<T> {
    Found(T),
    NotFound(NotFoundReport),
}

impl<T> Lookup<T> {
    fn into_response(self, found: fn(T) -> QueryResponse) -> QueryResponse {
        match self {
            Lookup::Found(report) => found(report),
            Lookup::NotFound(report) => QueryResponse::NotFound(report),
        }
    }
}

/// DependencyAnalysisService - orchestrates discovery, graph construction
/// and every analysis of the query surface.
///
/// All infrastructure is injected; the graph is rebuilt from the file
/// system for each computation and only finished reports are cached.
///
/// # Type Parameters
/// * `MR` - ManifestReader implementation
/// * `SS` - SourceScanner implementation
/// * `PR` - ProgressReporter implementation
/// * `C` - AnalysisCache implementation (shared)
pub struct DependencyAnalysisService<MR, SS, PR, C> {
    settings: AnalysisSettings,
    discovery: ProjectDiscovery,
    manifest_reader: MR,
    source_scanner: SS,
    progress_reporter: PR,
    cache: Arc<C>,
    tools: ExternalTools,
    router: QueryRouter,
}

impl<MR, SS, PR, C> DependencyAnalysisService<MR, SS, PR, C>
where
    MR: ManifestReader,
    SS: SourceScanner,
    PR: ProgressReporter,
    C: AnalysisCache,
{
    pub fn new(
        settings: AnalysisSettings,
        discovery: ProjectDiscovery,
        manifest_reader: MR,
        source_scanner: SS,
        progress_reporter: PR,
        cache: Arc<C>,
        tools: ExternalTools,
    ) -> Self {
        Self {
            settings,
            discovery,
            manifest_reader,
            source_scanner,
            progress_reporter,
            cache,
            tools,
            router: QueryRouter::new(),
        }
    }

    fn repo_root(&self) -> &Path {
        &self.settings.repo_root
    }

    /// Runs one route
    pub async fn execute(&self, route: &Route) -> Result<QueryResponse> {
        match route {
            Route::Structure => self.get_structure().await,
            Route::Inconsistencies => self.get_version_inconsistencies().await,
            Route::Unused(project) => self.get_unused_dependencies(project.as_deref()).await,
            Route::Outdated => self.get_outdated_dependencies().await,
            Route::Graph(project) => self.get_dependency_graph(project.as_deref()).await,
            Route::Circular => self.get_circular_dependencies().await,
            Route::Security => self.get_security_vulnerabilities().await,
            Route::UsedBy(dep) => self.get_packages_using_dependency(dep).await,
            Route::ProjectDeps(name) => self.get_project_dependencies(name).await,
        }
    }

    // ---- cache ----

    fn cache_get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.cache.get(key)?;
        match serde_json::from_value(value) {
            Ok(report) => {
                debug!(key, "cache hit");
                Some(report)
            }
            Err(e) => {
                debug!(key, error = %e, "discarding undecodable cache entry");
                None
            }
        }
    }

    fn cache_put<T: Serialize>(&self, key: &str, report: &T) {
        match serde_json::to_value(report) {
            Ok(value) => self.cache.set(key, value),
            Err(e) => warn!(key, error = %e, "report not cacheable"),
        }
    }

    // ---- snapshot ----

    /// Discovers projects, reads their manifests and builds the graph
    ///
    /// # Errors
    /// * `InvalidRepositoryPath` if the root is not a readable directory
    /// * `NoProjectsDiscovered` if no strategy found a single project
    async fn load_snapshot(&self) -> Result<RepositorySnapshot> {
        let root = self.repo_root();
        if !root.is_dir() {
            return Err(AnalysisError::InvalidRepositoryPath {
                path: root.to_path_buf(),
                reason: "Directory does not exist or is not readable".to_string(),
            }
            .into());
        }

        self.progress_reporter
            .report(&format!("🔍 Discovering projects in {}", root.display()));
        let discovery = self.discovery.discover(root).await;
        if discovery.projects.is_empty() {
            return Err(AnalysisError::NoProjectsDiscovered {
                root: root.to_path_buf(),
            }
            .into());
        }

        let manifests = self.read_manifests(&discovery.projects);
        let graph = DependencyGraphBuilder::build(discovery.projects, &manifests);
        self.progress_reporter.report(&format!(
            "✅ Found {} project(s) via {}",
            graph.projects().len(),
            discovery.strategy
        ));

        Ok(RepositorySnapshot {
            discovery_strategy: discovery.strategy,
            graph,
            manifests,
        })
    }

    /// Manifests by project name; unreadable manifests count as absent
    fn read_manifests(&self, projects: &[Project]) -> HashMap<String, PackageManifest> {
        let mut manifests = HashMap::new();
        for project in projects {
            if let Some(manifest) = self.read_manifest_lenient(project.root()) {
                manifests.insert(project.name().to_string(), manifest);
            }
        }
        manifests
    }

    fn read_manifest_lenient(&self, directory: &Path) -> Option<PackageManifest> {
        match self.manifest_reader.read_manifest(directory) {
            Ok(manifest) => manifest,
            Err(e) => {
                let error = AnalysisError::ManifestUnreadable {
                    path: directory.to_path_buf(),
                    details: format!("{:#}", e),
                };
                warn!("{}", error);
                None
            }
        }
    }

    fn not_found_project(&self, graph: &DependencyGraph, name: &str) -> NotFoundReport {
        let available = graph.project_names();
        NotFoundReport {
            error: format!("Project '{}' not found", name),
            suggestions: suggest(name, available.iter().map(String::as_str)),
            available_projects: available,
        }
    }

    // ---- analyses ----

    async fn structure_report(&self) -> Result<StructureReport> {
        if let Some(report) = self.cache_get(&Route::Structure.cache_key()) {
            return Ok(report);
        }

        let snapshot = self.load_snapshot().await?;
        let graph = &snapshot.graph;
        let projects = graph
            .projects()
            .iter()
            .map(|project| {
                let manifest = snapshot.manifests.get(project.name());
                let count = |kind| manifest.map(|m| m.declared(kind).len()).unwrap_or(0);
                ProjectSummary {
                    name: project.name().to_string(),
                    root: project.relative_root(self.repo_root()).display().to_string(),
                    project_type: project.project_type(),
                    has_manifest: manifest.is_some(),
                    declarations: DeclarationCounts {
                        production: count(DependencyKind::Production),
                        dev: count(DependencyKind::Dev),
                        peer: count(DependencyKind::Peer),
                    },
                    internal_dependencies: graph.internal_dependencies_of(project.name()),
                    dependents: graph.dependents_of(project.name()),
                }
            })
            .collect::<Vec<_>>();

        let report = StructureReport {
            repository_root: self.repo_root().display().to_string(),
            discovery_strategy: snapshot.discovery_strategy.clone(),
            project_count: projects.len(),
            external_dependency_count: graph.external_dependency_names().len(),
            internal_edge_count: graph.internal_edge_count(),
            projects,
        };
        self.cache_put(&Route::Structure.cache_key(), &report);
        Ok(report)
    }

    async fn inconsistency_report(&self) -> Result<InconsistencyReport> {
        let key = Route::Inconsistencies.cache_key();
        if let Some(report) = self.cache_get(&key) {
            return Ok(report);
        }

        let snapshot = self.load_snapshot().await?;
        let inconsistencies = ConsistencyAnalyzer::find_version_inconsistencies(&snapshot.graph);
        let report = InconsistencyReport {
            count: inconsistencies.len(),
            inconsistencies,
        };
        self.cache_put(&key, &report);
        Ok(report)
    }

    async fn unused_report(&self, project: Option<&str>) -> Result<Lookup<UnusedReport>> {
        let key = Route::Unused(project.map(str::to_string)).cache_key();
        if let Some(report) = self.cache_get(&key) {
            return Ok(report);
        }

        let snapshot = self.load_snapshot().await?;
        let targets: Vec<&Project> = match project {
            Some(name) => match snapshot.graph.project(name) {
                Some(p) => vec![p],
                None => {
                    return Ok(Lookup::NotFound(
                        self.not_found_project(&snapshot.graph, name),
                    ))
                }
            },
            None => snapshot.graph.projects().iter().collect(),
        };

        let root_manifest = self.read_manifest_lenient(self.repo_root());
        let mut projects = Vec::with_capacity(targets.len());
        for target in targets {
            let declared_from = self.declaring_manifest(
                snapshot.manifests.get(target.name()),
                root_manifest.as_ref(),
            );
            projects.push(self.project_unused(target, declared_from).await);
        }

        let report = Lookup::Found(UnusedReport { projects });
        self.cache_put(&key, &report);
        Ok(report)
    }

    /// Manifest whose declarations a project is reconciled against
    fn declaring_manifest<'m>(
        &self,
        own: Option<&'m PackageManifest>,
        root: Option<&'m PackageManifest>,
    ) -> Option<&'m PackageManifest> {
        match self.settings.dependency_mode {
            DependencyMode::Auto => own.or(root),
            DependencyMode::Root => root,
            DependencyMode::Project => own,
        }
    }

    /// Tool -> import scan -> declared-only, first that works
    async fn project_unused(
        &self,
        project: &Project,
        manifest: Option<&PackageManifest>,
    ) -> ProjectUnusedReport {
        if let Some(tool) = &self.tools.unused {
            match tool.find_unused(project.root()).await {
                Ok(found) => {
                    return ProjectUnusedReport {
                        project: project.name().to_string(),
                        source: UnusedSource::Tool,
                        unused_dependencies: sorted(found.dependencies),
                        unused_dev_dependencies: sorted(found.dev_dependencies),
                        missing: found.missing.into_keys().collect(),
                        caveat: None,
                    }
                }
                Err(e) => {
                    warn!(project = project.name(), error = %e, "unused-dependency tool failed, scanning imports");
                }
            }
        }

        let empty = PackageManifest::default();
        let manifest = manifest.unwrap_or(&empty);
        let declared = manifest.declared_names();

        match self.source_scanner.scan_specifiers(project.root()) {
            Ok(specifiers) => {
                let external = specifiers
                    .into_iter()
                    .filter(|s| !ImportScanner::is_builtin(s));
                let result = UsageReconciler::reconcile(project.name(), &declared, external);
                let (unused_dependencies, unused_dev_dependencies) =
                    split_by_kind(manifest, result.unused_declared);
                ProjectUnusedReport {
                    project: project.name().to_string(),
                    source: UnusedSource::ImportScan,
                    unused_dependencies,
                    unused_dev_dependencies,
                    missing: result.unmatched_imports.into_iter().collect(),
                    caveat: None,
                }
            }
            Err(e) => {
                warn!(project = project.name(), error = %e, "import scan failed");
                let (unused_dependencies, unused_dev_dependencies) =
                    split_by_kind(manifest, declared);
                ProjectUnusedReport {
                    project: project.name().to_string(),
                    source: UnusedSource::DeclaredOnly,
                    unused_dependencies,
                    unused_dev_dependencies,
                    missing: Vec::new(),
                    caveat: Some(
                        "Sources could not be scanned; every declared dependency is listed as a candidate"
                            .to_string(),
                    ),
                }
            }
        }
    }

    async fn outdated_report(&self) -> Result<OutdatedReport> {
        let key = Route::Outdated.cache_key();
        if let Some(report) = self.cache_get(&key) {
            return Ok(report);
        }

        let mut notes = Vec::new();
        if let Some(tool) = &self.tools.outdated {
            match tool.find_outdated(self.repo_root()).await {
                Ok(entries) => {
                    let dependencies: Vec<OutdatedDependency> = entries
                        .into_iter()
                        .map(|(name, entry)| OutdatedDependency {
                            name,
                            current: entry.current,
                            wanted: entry.wanted,
                            latest: entry.latest,
                            location: entry.location,
                            status: OutdatedStatus::Outdated,
                        })
                        .collect();
                    let report = OutdatedReport {
                        source: OutdatedSource::Tool,
                        outdated_count: dependencies.len(),
                        unknown_count: 0,
                        dependencies,
                        notes,
                    };
                    self.cache_put(&key, &report);
                    return Ok(report);
                }
                Err(e) => {
                    warn!(error = %e, "outdated tool failed, checking the registry");
                    notes.push(format!("Outdated tool unavailable ({}); used registry lookups", e));
                }
            }
        }

        let snapshot = self.load_snapshot().await?;
        let declared = first_declared_versions(&snapshot.graph);
        let names: Vec<String> = declared.keys().cloned().collect();

        let (source, latest) = match &self.tools.registry {
            Some(registry) => {
                self.progress_reporter.report(&format!(
                    "🌐 Looking up latest versions of {} package(s)...",
                    names.len()
                ));
                let checker = LatestVersionChecker::new(registry.as_ref(), &self.settings.lookup);
                let latest = checker.check_all(&names, &self.progress_reporter).await;
                (OutdatedSource::Registry, latest)
            }
            None => {
                notes.push("Registry lookups disabled; latest versions are unknown".to_string());
                (OutdatedSource::None, BTreeMap::new())
            }
        };

        let dependencies: Vec<OutdatedDependency> = declared
            .into_iter()
            .map(|(name, version)| {
                let latest = latest.get(&name).cloned().flatten();
                let current = strip_range(&version);
                OutdatedDependency {
                    status: outdated_status(&current, latest.as_deref()),
                    name,
                    current: Some(current),
                    wanted: None,
                    latest,
                    location: None,
                }
            })
            .collect();

        let report = OutdatedReport {
            source,
            outdated_count: count_status(&dependencies, OutdatedStatus::Outdated),
            unknown_count: count_status(&dependencies, OutdatedStatus::Unknown),
            dependencies,
            notes,
        };
        self.cache_put(&key, &report);
        Ok(report)
    }

    async fn graph_report(&self, project: Option<&str>) -> Result<Lookup<GraphReport>> {
        let key = Route::Graph(project.map(str::to_string)).cache_key();
        if let Some(report) = self.cache_get(&key) {
            return Ok(report);
        }

        let snapshot = self.load_snapshot().await?;
        let graph = &snapshot.graph;
        let report = match project {
            None => Lookup::Found(GraphReport {
                project: None,
                nodes: graph.nodes(),
                edges: graph.edges().to_vec(),
            }),
            Some(name) => match graph.project(name) {
                None => Lookup::NotFound(self.not_found_project(graph, name)),
                Some(root_project) => {
                    let edges: Vec<_> = graph.edges_from(name).cloned().collect();
                    let mut nodes = vec![GraphNode::Project {
                        id: root_project.name().to_string(),
                        project_type: root_project.project_type(),
                    }];
                    let mut seen = BTreeSet::from([root_project.name().to_string()]);
                    for edge in &edges {
                        if !seen.insert(edge.to.clone()) {
                            continue;
                        }
                        nodes.push(match graph.project(&edge.to) {
                            Some(p) if edge.internal => GraphNode::Project {
                                id: p.name().to_string(),
                                project_type: p.project_type(),
                            },
                            _ => GraphNode::External {
                                id: edge.to.clone(),
                            },
                        });
                    }
                    Lookup::Found(GraphReport {
                        project: Some(name.to_string()),
                        nodes,
                        edges,
                    })
                }
            },
        };
        self.cache_put(&key, &report);
        Ok(report)
    }

    async fn circular_report(&self) -> Result<CircularReport> {
        let key = Route::Circular.cache_key();
        if let Some(report) = self.cache_get(&key) {
            return Ok(report);
        }

        let mut notes = Vec::new();
        let mut from_tool = None;
        if let Some(tool) = &self.tools.project_graph {
            match tool.project_graph(self.repo_root()).await {
                Ok(adjacency) => from_tool = Some(CycleDetector::find_cycles(&adjacency)),
                Err(e) => {
                    warn!(error = %e, "project graph tool failed, using declared dependencies");
                    notes.push(format!(
                        "Project graph tool unavailable ({}); cycles computed from declared dependencies",
                        e
                    ));
                }
            }
        }

        let (source, cycles) = match from_tool {
            Some(cycles) => (EdgeSource::ProjectGraphTool, cycles),
            None => {
                let snapshot = self.load_snapshot().await?;
                (
                    EdgeSource::DeclaredDependencies,
                    CycleDetector::find_circular_dependencies(&snapshot.graph),
                )
            }
        };

        let report = CircularReport {
            source,
            count: cycles.len(),
            cycles,
            notes,
        };
        self.cache_put(&key, &report);
        Ok(report)
    }

    async fn security_report(&self) -> Result<SecurityReport> {
        let key = Route::Security.cache_key();
        if let Some(report) = self.cache_get(&key) {
            return Ok(report);
        }

        let unaudited = |note: String| SecurityReport {
            audited: false,
            total: 0,
            severity_counts: BTreeMap::new(),
            direct_vulnerabilities: Vec::new(),
            notes: vec![note],
        };

        let report = match &self.tools.audit {
            None => unaudited("Audit disabled; no vulnerability data".to_string()),
            Some(tool) => match tool.audit(self.repo_root()).await {
                Ok(audit) => {
                    let severity_counts = AdvisoryExtractor::severity_counts(&audit);
                    SecurityReport {
                        audited: true,
                        total: severity_counts.values().sum(),
                        severity_counts,
                        direct_vulnerabilities: AdvisoryExtractor::direct_vulnerabilities(&audit),
                        notes: Vec::new(),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "audit tool failed");
                    unaudited(format!("Audit tool unavailable ({})", e))
                }
            },
        };
        self.cache_put(&key, &report);
        Ok(report)
    }

    async fn used_by_report(&self, dependency: &str) -> Result<Lookup<UsedByReport>> {
        let key = Route::UsedBy(dependency.to_string()).cache_key();
        if let Some(report) = self.cache_get(&key) {
            return Ok(report);
        }

        let snapshot = self.load_snapshot().await?;
        let graph = &snapshot.graph;
        let used_by: Vec<DependencyUsage> = graph
            .edges_to(dependency)
            .map(|edge| DependencyUsage {
                project: edge.from.clone(),
                version: edge.version.clone(),
                kind: edge.kind,
            })
            .collect();

        let report = if used_by.is_empty() {
            let mut known: BTreeSet<String> = graph.external_dependency_names();
            known.extend(graph.project_names());
            Lookup::NotFound(NotFoundReport {
                error: format!("No project depends on '{}'", dependency),
                available_projects: graph.project_names(),
                suggestions: suggest(dependency, known.iter().map(String::as_str)),
            })
        } else {
            let versions: BTreeSet<&str> = used_by.iter().map(|u| u.version.as_str()).collect();
            Lookup::Found(UsedByReport {
                dependency: dependency.to_string(),
                count: used_by.len(),
                versions: versions.into_iter().map(str::to_string).collect(),
                used_by,
            })
        };
        self.cache_put(&key, &report);
        Ok(report)
    }

    async fn project_dependencies_report(
        &self,
        name: &str,
    ) -> Result<Lookup<ProjectDependenciesReport>> {
        let key = Route::ProjectDeps(name.to_string()).cache_key();
        if let Some(report) = self.cache_get(&key) {
            return Ok(report);
        }

        let snapshot = self.load_snapshot().await?;
        let graph = &snapshot.graph;
        let report = match graph.project(name) {
            None => Lookup::NotFound(self.not_found_project(graph, name)),
            Some(project) => {
                let manifest = snapshot.manifests.get(name).cloned().unwrap_or_default();
                Lookup::Found(ProjectDependenciesReport {
                    project: project.name().to_string(),
                    root: project.relative_root(self.repo_root()).display().to_string(),
                    project_type: project.project_type(),
                    dependencies: manifest.dependencies,
                    dev_dependencies: manifest.dev_dependencies,
                    peer_dependencies: manifest.peer_dependencies,
                    internal_dependencies: graph.internal_dependencies_of(name),
                    dependents: graph.dependents_of(name),
                })
            }
        };
        self.cache_put(&key, &report);
        Ok(report)
    }
}

#[async_trait]
impl<MR, SS, PR, C> DependencyQueryPort for DependencyAnalysisService<MR, SS, PR, C>
where
    MR: ManifestReader,
    SS: SourceScanner,
    PR: ProgressReporter,
    C: AnalysisCache,
{
    async fn get_structure(&self) -> Result<QueryResponse> {
        Ok(QueryResponse::Structure(self.structure_report().await?))
    }

    async fn get_version_inconsistencies(&self) -> Result<QueryResponse> {
        Ok(QueryResponse::Inconsistencies(
            self.inconsistency_report().await?,
        ))
    }

    async fn get_unused_dependencies(&self, project: Option<&str>) -> Result<QueryResponse> {
        Ok(self
            .unused_report(project)
            .await?
            .into_response(QueryResponse::Unused))
    }

    async fn get_outdated_dependencies(&self) -> Result<QueryResponse> {
        Ok(QueryResponse::Outdated(self.outdated_report().await?))
    }

    async fn get_dependency_graph(&self, project: Option<&str>) -> Result<QueryResponse> {
        Ok(self
            .graph_report(project)
            .await?
            .into_response(QueryResponse::Graph))
    }

    async fn get_circular_dependencies(&self) -> Result<QueryResponse> {
        Ok(QueryResponse::Circular(self.circular_report().await?))
    }

    async fn get_security_vulnerabilities(&self) -> Result<QueryResponse> {
        Ok(QueryResponse::Security(self.security_report().await?))
    }

    async fn get_packages_using_dependency(&self, dependency: &str) -> Result<QueryResponse> {
        Ok(self
            .used_by_report(dependency)
            .await?
            .into_response(QueryResponse::UsedBy))
    }

    async fn get_project_dependencies(&self, project: &str) -> Result<QueryResponse> {
        Ok(self
            .project_dependencies_report(project)
            .await?
            .into_response(QueryResponse::ProjectDependencies))
    }

    async fn query(&self, text: &str) -> Result<RoutedResponse> {
        let route = self.router.route(text);
        debug!(query = text, operation = route.operation_name(), "query routed");
        let result = self.execute(&route).await?;
        Ok(RoutedResponse {
            operation: route.operation_name().to_string(),
            argument: route.argument().map(str::to_string),
            result,
        })
    }

    async fn call(&self, operation: &str, argument: Option<&str>) -> Result<QueryResponse> {
        match operation.trim() {
            "query" => {
                let text = argument.ok_or_else(|| AnalysisError::Validation {
                    message: "Operation 'query' requires the question text".to_string(),
                })?;
                Ok(self.query(text).await?.result)
            }
            "invalidateCache" => {
                self.invalidate_cache(argument);
                Ok(QueryResponse::CacheInvalidated(CacheInvalidation {
                    invalidated: argument.map(str::to_string),
                }))
            }
            name => match Route::from_operation(name, argument) {
                Ok(route) => self.execute(&route).await,
                Err(e) => match e.downcast::<AnalysisError>() {
                    Ok(AnalysisError::UnknownOperation { name, .. }) => {
                        let mut valid = ROUTE_OPERATIONS.to_vec();
                        valid.extend(["query", "invalidateCache"]);
                        Err(AnalysisError::UnknownOperation {
                            name,
                            valid: valid.join(", "),
                        }
                        .into())
                    }
                    Ok(other) => Err(other.into()),
                    Err(other) => Err(other),
                },
            },
        }
    }

    fn invalidate_cache(&self, key: Option<&str>) {
        debug!(key = key.unwrap_or("*"), "invalidating cache");
        self.cache.invalidate(key);
    }
}

// ---- helpers ----

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names.dedup();
    names
}

/// Splits unused names into (production + peer, dev-only)
fn split_by_kind(manifest: &PackageManifest, unused: BTreeSet<String>) -> (Vec<String>, Vec<String>) {
    unused.into_iter().partition(|name| {
        manifest.dependencies.contains_key(name)
            || manifest.peer_dependencies.contains_key(name)
            || !manifest.dev_dependencies.contains_key(name)
    })
}

/// External dependency name -> first declared version in graph order
fn first_declared_versions(graph: &DependencyGraph) -> BTreeMap<String, String> {
    let mut versions = BTreeMap::new();
    for edge in graph.external_edges() {
        versions
            .entry(edge.to.clone())
            .or_insert_with(|| edge.version.clone());
    }
    versions
}

/// Declared range without its leading operator (`^1.2.0` -> `1.2.0`)
fn strip_range(version: &str) -> String {
    version
        .trim()
        .trim_start_matches(['^', '~', '>', '<', '=', 'v', ' '])
        .to_string()
}

fn outdated_status(current: &str, latest: Option<&str>) -> OutdatedStatus {
    match latest {
        None => OutdatedStatus::Unknown,
        // tags, workspace markers and urls cannot be compared
        Some(_) if !current.starts_with(|c: char| c.is_ascii_digit()) => OutdatedStatus::Unknown,
        Some(latest) if latest == current => OutdatedStatus::UpToDate,
        Some(_) => OutdatedStatus::Outdated,
    }
}

fn count_status(dependencies: &[OutdatedDependency], status: OutdatedStatus) -> usize {
    dependencies.iter().filter(|d| d.status == status).count()
}

/// Case-insensitive substring matches in either direction, sorted
fn suggest<'a>(wanted: &str, candidates: impl Iterator<Item = &'a str>) -> Vec<String> {
    let wanted = wanted.trim().to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }
    let mut matches: Vec<String> = candidates
        .filter(|c| {
            let c = c.to_lowercase();
            c.contains(&wanted) || wanted.contains(&c)
        })
        .map(str::to_string)
        .collect();
    matches.sort();
    matches.dedup();
    matches.truncate(MAX_SUGGESTIONS);
    matches
}
