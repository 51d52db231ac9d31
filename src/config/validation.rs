// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation.
//!
//! Parsing guarantees shape; this module checks the values that parse but
//! cannot be honored:
//!
//! 1. `logging.max_entries` must retain at least one entry
//! 2. `handler.fallback_message` must not be blank, since it is the last
//!    resort for a non-empty display message
//! 3. a `file` monitoring sink needs a `path` and room for at least one error
//!
//! # Examples
//!
//! ```rust
//! use home_soldier::config::{validate_config, Config};
//!
//! let mut config = Config::default();
//! assert!(validate_config(&config).is_ok());
//!
//! config.logging.max_entries = Some(0);
//! let error = validate_config(&config).unwrap_err();
//! assert!(error.to_string().contains("logging.max_entries"));
//! ```

use crate::config::{Config, SinkKind};
use crate::errors::ConfigError;

/// Validate a parsed configuration, reporting the first invalid value.
pub fn validate_config(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.logging.max_entries == Some(0) {
        return Err(ConfigError::Invalid {
            field: "logging.max_entries",
            reason: "must retain at least one entry".to_string(),
        });
    }

    if let Some(message) = &cfg.handler.fallback_message {
        if message.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "handler.fallback_message",
                reason: "must not be blank".to_string(),
            });
        }
    }

    if let Some(component) = &cfg.operation.component {
        if component.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "operation.component",
                reason: "must not be blank".to_string(),
            });
        }
    }

    if cfg.monitoring.sink == SinkKind::File {
        if cfg.monitoring.path.is_none() {
            return Err(ConfigError::Invalid {
                field: "monitoring.path",
                reason: "required when monitoring.sink is file".to_string(),
            });
        }
        if cfg.monitoring.max_errors == Some(0) {
            return Err(ConfigError::Invalid {
                field: "monitoring.max_errors",
                reason: "must retain at least one error".to_string(),
            });
        }
    }

    Ok(())
}
