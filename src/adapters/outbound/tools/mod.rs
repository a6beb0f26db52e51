/// External tool adapters (Nx, depcheck, npm) run as child processes
mod command_runner;
mod depcheck;
mod npm;
mod nx;

pub use command_runner::{CommandOutput, CommandRunner, DEFAULT_TOOL_TIMEOUT};
pub use depcheck::DepcheckTool;
pub use npm::{NpmAuditTool, NpmOutdatedTool};
pub use nx::{NxProjectGraphTool, NxProjectLister};
