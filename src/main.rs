mod cli;

use cli::{Args, Invocation};
use monorepo_deps::adapters::outbound::cache::{InMemoryAnalysisCache, DEFAULT_CACHE_TTL};
use monorepo_deps::adapters::outbound::console::StderrProgressReporter;
use monorepo_deps::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemSourceScanner, FileSystemWriter, StdoutPresenter,
    DEFAULT_IGNORED_DIRS, DEFAULT_SOURCE_EXTENSIONS,
};
use monorepo_deps::adapters::outbound::network::NpmRegistryClient;
use monorepo_deps::adapters::outbound::tools::{
    CommandRunner, DepcheckTool, NpmAuditTool, NpmOutdatedTool, NxProjectGraphTool,
    NxProjectLister,
};
use monorepo_deps::application::discovery::{
    DirectoryScanStrategy, DiscoveryStrategy, ProjectDiscovery, ToolListingStrategy,
    WorkspaceManifestStrategy,
};
use monorepo_deps::application::dto::AnalysisSettings;
use monorepo_deps::application::use_cases::{DependencyAnalysisService, ExternalTools};
use monorepo_deps::config::{discover_config, load_config_from_path, ConfigFile};
use monorepo_deps::ports::inbound::DependencyQueryPort;
use monorepo_deps::ports::outbound::{OutputPresenter, WorkspaceReader};
use monorepo_deps::shared::error::{AnalysisError, ExitCode};
use monorepo_deps::shared::Result;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose);

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n{} An error occurred:\n", "❌".red());
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let repo_dir = args.path.as_deref().unwrap_or(".");
    let repo_root = validate_repository_path(Path::new(repo_dir))?;

    let config = match args.config.as_deref() {
        Some(path) => load_config_from_path(Path::new(path))?,
        None => discover_config(&repo_root)?.unwrap_or_default(),
    };

    let mut settings = AnalysisSettings::new(repo_root.clone());
    config.apply(&mut settings)?;
    if let Some(mode) = args.dependency_mode {
        settings.dependency_mode = mode;
    }

    let use_tools = !args.no_tools && config.external_tools.unwrap_or(true);
    let cache_ttl = args
        .cache_ttl
        .or(config.cache_ttl_secs)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_CACHE_TTL);
    debug!(root = %repo_root.display(), use_tools, ttl_secs = cache_ttl.as_secs(), "settings resolved");

    let service = build_service(settings, &config, use_tools, cache_ttl)?;

    let (output, has_issues) = match args.command.invocation() {
        Invocation::Route(route) => {
            let response = service.execute(&route).await?;
            (serde_json::to_string_pretty(&response)?, response.has_issues())
        }
        Invocation::Query(text) => {
            let routed = service.query(&text).await?;
            (serde_json::to_string_pretty(&routed)?, routed.result.has_issues())
        }
        Invocation::Call {
            operation,
            argument,
        } => {
            let response = service.call(&operation, argument.as_deref()).await?;
            (serde_json::to_string_pretty(&response)?, response.has_issues())
        }
    };

    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(output_path) => Box::new(FileSystemWriter::new(PathBuf::from(output_path))),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&output)?;

    if args.fail_on_issues && has_issues {
        warn!("report contains issues");
        return Ok(ExitCode::IssuesDetected);
    }
    Ok(ExitCode::Success)
}

type CliService = DependencyAnalysisService<
    FileSystemReader,
    FileSystemSourceScanner,
    StderrProgressReporter,
    InMemoryAnalysisCache,
>;

/// Wires adapters into the analysis service (dependency injection)
fn build_service(
    settings: AnalysisSettings,
    config: &ConfigFile,
    use_tools: bool,
    cache_ttl: Duration,
) -> Result<CliService> {
    let reader: Arc<dyn WorkspaceReader> = Arc::new(FileSystemReader::new());
    let runner = CommandRunner::new(
        config
            .tool_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| CommandRunner::default().timeout()),
    );

    let mut strategies: Vec<Box<dyn DiscoveryStrategy>> = Vec::new();
    if use_tools {
        strategies.push(Box::new(ToolListingStrategy::new(
            Box::new(NxProjectLister::new(runner.clone())),
            Arc::clone(&reader),
            settings.project_dirs.clone(),
        )));
    }
    strategies.push(Box::new(WorkspaceManifestStrategy::new(
        Arc::clone(&reader),
        settings.workspace_manifest.clone(),
    )));
    strategies.push(Box::new(DirectoryScanStrategy::new(
        Arc::clone(&reader),
        settings.project_dirs.clone(),
    )));

    let tools = if use_tools {
        ExternalTools {
            unused: Some(Box::new(DepcheckTool::new(runner.clone()))),
            outdated: Some(Box::new(NpmOutdatedTool::new(runner.clone()))),
            audit: Some(Box::new(NpmAuditTool::new(runner.clone()))),
            project_graph: Some(Box::new(NxProjectGraphTool::new(runner))),
            registry: Some(Box::new(NpmRegistryClient::new()?)),
        }
    } else {
        ExternalTools::none()
    };

    let source_scanner = FileSystemSourceScanner::new(
        config.source_extensions.clone().unwrap_or_else(|| {
            DEFAULT_SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect()
        }),
        config
            .ignored_dirs
            .clone()
            .unwrap_or_else(|| DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect()),
    );

    Ok(DependencyAnalysisService::new(
        settings,
        ProjectDiscovery::new(strategies),
        FileSystemReader::new(),
        source_scanner,
        StderrProgressReporter::new(),
        Arc::new(InMemoryAnalysisCache::new(cache_ttl)),
        tools,
    ))
}

/// Checks the repository root and returns its canonical form
fn validate_repository_path(path: &Path) -> Result<PathBuf> {
    let invalid = |reason: String| AnalysisError::InvalidRepositoryPath {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(invalid("Directory does not exist".to_string()).into());
    }

    // Security check: Reject symbolic links for the repository root
    let metadata = std::fs::symlink_metadata(path)
        .map_err(|e| invalid(format!("Failed to read path metadata: {}", e)))?;
    if metadata.is_symlink() {
        return Err(invalid(
            "Security: Repository path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        )
        .into());
    }

    if !path.is_dir() {
        return Err(invalid("Not a directory".to_string()).into());
    }

    path.canonicalize()
        .map_err(|e| invalid(format!("Failed to canonicalize path: {}", e)).into())
}
