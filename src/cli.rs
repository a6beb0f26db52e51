use clap::{ArgAction, Parser, Subcommand};

use monorepo_deps::application::dto::DependencyMode;
use monorepo_deps::application::query::Route;

/// Analyze the dependency structure of a JavaScript/TypeScript monorepo
#[derive(Parser, Debug)]
#[command(name = "monorepo-deps")]
#[command(version)]
#[command(
    about = "Analyze the dependency structure of a JavaScript/TypeScript monorepo",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the monorepo root (defaults to current directory)
    #[arg(short, long, global = true)]
    pub path: Option<String>,

    /// Path to a config file (defaults to monorepo-deps.config.yml in the repository root)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Never run external tools or query the registry; use built-in analysis only
    #[arg(long, global = true)]
    pub no_tools: bool,

    /// Exit with code 1 when the report contains issues
    #[arg(long, global = true)]
    pub fail_on_issues: bool,

    /// Cache time-to-live in seconds (0 disables caching)
    #[arg(long, global = true, value_name = "SECONDS")]
    pub cache_ttl: Option<u64>,

    /// Which manifest declares a project's dependencies: auto, root or project
    #[arg(long, global = true, value_name = "MODE")]
    pub dependency_mode: Option<DependencyMode>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Overview of discovered projects and their dependencies
    Structure,
    /// External packages declared with more than one version
    Inconsistencies,
    /// Declared but unused (and used but undeclared) dependencies
    Unused {
        /// Restrict to one project
        #[arg(long)]
        project: Option<String>,
    },
    /// External dependencies with a newer published version
    Outdated,
    /// Dependency graph as nodes and edges
    Graph {
        /// Restrict to one project's outgoing edges
        #[arg(long)]
        project: Option<String>,
    },
    /// Circular dependencies between projects
    Circular,
    /// Vulnerabilities reported by the audit tool
    Security,
    /// Projects that declare a dependency
    UsedBy {
        /// External package name
        dependency: String,
    },
    /// Dependencies of one project
    Project {
        /// Project name
        name: String,
    },
    /// Answer a free-text question, e.g. "which packages use lodash"
    Query {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Invoke an operation by name, e.g. getVersionInconsistencies
    Call {
        operation: String,
        argument: Option<String>,
    },
}

/// What the command line asks the analysis service to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Route(Route),
    Query(String),
    Call {
        operation: String,
        argument: Option<String>,
    },
}

impl Command {
    pub fn invocation(&self) -> Invocation {
        match self {
            Command::Structure => Invocation::Route(Route::Structure),
            Command::Inconsistencies => Invocation::Route(Route::Inconsistencies),
            Command::Unused { project } => Invocation::Route(Route::Unused(project.clone())),
            Command::Outdated => Invocation::Route(Route::Outdated),
            Command::Graph { project } => Invocation::Route(Route::Graph(project.clone())),
            Command::Circular => Invocation::Route(Route::Circular),
            Command::Security => Invocation::Route(Route::Security),
            Command::UsedBy { dependency } => Invocation::Route(Route::UsedBy(dependency.clone())),
            Command::Project { name } => Invocation::Route(Route::ProjectDeps(name.clone())),
            Command::Query { text } => Invocation::Query(text.join(" ")),
            Command::Call {
                operation,
                argument,
            } => Invocation::Call {
                operation: operation.clone(),
                argument: argument.clone(),
            },
        }
    }
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
