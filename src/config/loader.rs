// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::consts::{
    DEFAULT_FALLBACK_MESSAGE, DEFAULT_HANDLER_COMPONENT, DEFAULT_MAX_LOG_ENTRIES,
    DEFAULT_MAX_MONITORED_ERRORS, DEFAULT_OPERATION_COMPONENT, DEFAULT_RETRY_COUNT,
    DEFAULT_RETRY_DELAY_MS,
};
use crate::config::Environment;
use crate::errors::ConfigError;
use crate::handler::HandlerLogLevel;

/// Main configuration structure.
///
/// Every section is optional; a missing section takes its defaults.
///
/// # Fields
/// * `environment` - `development` or `production` (detected from the environment when absent)
/// * `logging` - log buffer settings
/// * `operation` - defaults for async operations
/// * `handler` - defaults for error handlers
/// * `monitoring` - where ERROR entries are forwarded outside development
///
/// # Example
/// ```yaml
/// environment: production
/// logging:
///   max_entries: 1000
/// operation:
///   component: NewChoreModal
///   retry_count: 2
///   retry_delay_ms: 500
/// handler:
///   fallback_message: "Something went wrong"
///   log_level: warn
/// monitoring:
///   sink: file
///   path: /var/log/home-soldier/app_errors.json
///   max_errors: 50
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub environment: Option<Environment>,
    pub logging: LoggingConfig,
    pub operation: OperationConfig,
    pub handler: HandlerConfig,
    pub monitoring: MonitoringConfig,
}

impl Config {
    /// Configured environment, or the one detected from `HOME_SOLDIER_ENV`.
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_else(Environment::from_env)
    }
}

/// Log buffer settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub max_entries: Option<usize>,
}

impl LoggingConfig {
    pub fn get_max_entries(&self) -> usize {
        self.max_entries.unwrap_or(DEFAULT_MAX_LOG_ENTRIES)
    }
}

/// Defaults applied to async operations built from configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct OperationConfig {
    pub component: Option<String>,
    pub retry_count: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

impl OperationConfig {
    pub fn get_component(&self) -> &str {
        self.component.as_deref().unwrap_or(DEFAULT_OPERATION_COMPONENT)
    }

    pub fn get_retry_count(&self) -> u32 {
        self.retry_count.unwrap_or(DEFAULT_RETRY_COUNT)
    }

    pub fn get_retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS))
    }
}

/// Defaults applied to error handlers built from configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct HandlerConfig {
    pub component: Option<String>,
    pub fallback_message: Option<String>,
    pub log_level: Option<HandlerLogLevel>,
}

impl HandlerConfig {
    pub fn get_component(&self) -> &str {
        self.component.as_deref().unwrap_or(DEFAULT_HANDLER_COMPONENT)
    }

    pub fn get_fallback_message(&self) -> &str {
        self.fallback_message.as_deref().unwrap_or(DEFAULT_FALLBACK_MESSAGE)
    }

    pub fn get_log_level(&self) -> HandlerLogLevel {
        self.log_level.unwrap_or_default()
    }
}

/// Destination for ERROR entries outside development mode.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    #[default]
    Tracing,
    File,
    #[serde(rename = "none")]
    Disabled,
}

/// Monitoring settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonitoringConfig {
    pub sink: SinkKind,
    pub path: Option<PathBuf>,
    pub max_errors: Option<usize>,
}

impl MonitoringConfig {
    pub fn get_max_errors(&self) -> usize {
        self.max_errors.unwrap_or(DEFAULT_MAX_MONITORED_ERRORS)
    }
}

/// Load a config from a YAML (`.yaml`/`.yml`) or TOML (`.toml`) file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        "toml" => Ok(toml::from_str(&content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

/// Load and validate a config from a YAML or TOML file
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg)?;
    Ok(cfg)
}
