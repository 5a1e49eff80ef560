//! Configuration file support for the callouts CLI
//!
//! Loads settings from a `_callouts.toml` configuration file found next to
//! the input path. Command-line flags take precedence over file values.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name (following Quarto's `_quarto.yml` convention)
pub const CONFIG_FILE_NAME: &str = "_callouts.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Output configuration
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
    /// Parallelism configuration
    #[serde(skip_serializing_if = "JobsConfig::is_empty")]
    pub jobs: JobsConfig,
    /// Usage report configuration
    #[serde(skip_serializing_if = "ReportConfig::is_empty")]
    pub report: ReportConfig,
}

/// Output configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the output JSON (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.pretty.is_none()
    }
}

/// Parallelism configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct JobsConfig {
    /// Number of parallel jobs (default: number of CPUs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<usize>,
}

impl JobsConfig {
    fn is_empty(&self) -> bool {
        self.parallel.is_none()
    }
}

/// Usage report configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ReportConfig {
    /// Path the callout usage report is written to (directory mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ReportConfig {
    fn is_empty(&self) -> bool {
        self.path.is_none()
    }
}

impl Config {
    /// Load configuration from the directory containing `input`.
    ///
    /// Returns the default configuration when no `_callouts.toml` is
    /// present.
    pub fn load_near(input: &Path) -> Result<Self> {
        let dir = if input.is_dir() {
            input
        } else {
            input.parent().unwrap_or(Path::new("."))
        };

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load_from(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}
