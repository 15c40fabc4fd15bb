//! CLI configuration management
//!
//! Settings come from, in increasing priority: defaults, a `tabula.toml`
//! file, `TABULA_*` environment variables, command line flags.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::{CliError, Result};

/// Default configuration file, read when present and `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "tabula.toml";

/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "TABULA_LOG_LEVEL";

/// Environment variable overriding the output format.
pub const ENV_FORMAT: &str = "TABULA_FORMAT";

/// Log levels accepted by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::Config(format!(
                "invalid log level '{}': expected trace, debug, info, warn or error",
                s
            ))),
        }
    }
}

impl LogLevel {
    /// Tracing filter directive for this level.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Result output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(CliError::InvalidArgument(format!(
                "unknown format '{}': supported formats are table, json",
                s
            ))),
        }
    }
}

/// Effective CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Log level when `RUST_LOG` is not set
    pub log_level: LogLevel,
    /// Output format of the `price` command
    pub format: OutputFormat,
}

/// Overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Output format override
    pub format: Option<String>,
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level.parse()?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = format.parse()?;
        }
        Ok(())
    }

    /// Apply command line overrides.
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) -> Result<()> {
        if let Some(level) = &cli.log_level {
            self.log_level = level.parse()?;
        }
        if let Some(format) = &cli.format {
            self.format = format.parse()?;
        }
        Ok(())
    }
}

/// Build configuration from all sources.
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (`--config`, else `tabula.toml` when present)
/// 4. Default values
pub fn build_config(cli: &CliOverrides) -> Result<CliConfig> {
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            CliConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => CliConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok())?;
    config.merge_with_cli(cli)?;
    Ok(config)
}
