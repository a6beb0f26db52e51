//! Configuration file support for monorepo-deps.
//!
//! Provides YAML-based configuration through `monorepo-deps.config.yml`
//! files in the repository root, including data structures, file loading,
//! validation and merging into [`AnalysisSettings`].

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::application::dto::{AnalysisSettings, DependencyMode};
use crate::shared::error::AnalysisError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "monorepo-deps.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub project_dirs: Option<Vec<String>>,
    pub workspace_manifest: Option<String>,
    pub dependency_mode: Option<String>,
    pub source_extensions: Option<Vec<String>>,
    pub ignored_dirs: Option<Vec<String>>,
    pub cache_ttl_secs: Option<u64>,
    pub tool_timeout_secs: Option<u64>,
    pub lookup: Option<LookupConfig>,
    pub external_tools: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Registry lookup batching.
#[derive(Debug, Deserialize, Default)]
pub struct LookupConfig {
    pub batch_size: Option<usize>,
    pub batch_delay_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Overrides `settings` with every field present in the file
    pub fn apply(&self, settings: &mut AnalysisSettings) -> Result<()> {
        if let Some(ref dirs) = self.project_dirs {
            settings.project_dirs = dirs.clone();
        }
        if let Some(ref manifest) = self.workspace_manifest {
            settings.workspace_manifest = manifest.clone();
        }
        if let Some(ref mode) = self.dependency_mode {
            settings.dependency_mode = parse_dependency_mode(mode)?;
        }
        if let Some(ref lookup) = self.lookup {
            if let Some(size) = lookup.batch_size {
                settings.lookup.batch_size = size;
            }
            if let Some(ms) = lookup.batch_delay_ms {
                settings.lookup.batch_delay = Duration::from_millis(ms);
            }
            if let Some(secs) = lookup.timeout_secs {
                settings.lookup.timeout = Duration::from_secs(secs);
            }
        }
        Ok(())
    }
}

fn parse_dependency_mode(value: &str) -> Result<DependencyMode> {
    DependencyMode::from_str(value).map_err(|message| AnalysisError::Validation { message }.into())
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(message: impl Into<String>) -> anyhow::Error {
    AnalysisError::Validation {
        message: message.into(),
    }
    .into()
}

fn validate_names(field: &str, values: &Option<Vec<String>>) -> Result<()> {
    if let Some(values) = values {
        for (i, value) in values.iter().enumerate() {
            if value.trim().is_empty() {
                return Err(invalid(format!("{}[{}] must not be empty", field, i)));
            }
        }
    }
    Ok(())
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    validate_names("project_dirs", &config.project_dirs)?;
    validate_names("source_extensions", &config.source_extensions)?;
    validate_names("ignored_dirs", &config.ignored_dirs)?;

    if let Some(ref manifest) = config.workspace_manifest {
        if manifest.trim().is_empty() {
            return Err(invalid("workspace_manifest must not be empty"));
        }
    }
    if let Some(ref mode) = config.dependency_mode {
        parse_dependency_mode(mode)?;
    }
    if config.tool_timeout_secs == Some(0) {
        return Err(invalid("tool_timeout_secs must be greater than 0"));
    }
    if let Some(ref lookup) = config.lookup {
        if lookup.batch_size == Some(0) {
            return Err(invalid("lookup.batch_size must be greater than 0"));
        }
        if lookup.timeout_secs == Some(0) {
            return Err(invalid("lookup.timeout_secs must be greater than 0"));
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!(field = %key, "unknown config field will be ignored");
    }
}
