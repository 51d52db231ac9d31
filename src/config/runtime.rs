// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::{Config, SinkKind};
use crate::errors::ConfigError;
use crate::logging::{Logger, PrincipalProvider};
use crate::monitoring::{FileSink, MonitoringSink, TracingSink};

/// Runtime builder - wires the shared logger from configuration.
///
/// The composition root calls this once and hands the resulting
/// `Arc<Logger>` to every error handler and async operation.
///
/// # Examples
///
/// ```
/// use home_soldier::config::{Config, Environment, RuntimeBuilder};
///
/// let mut config = Config::default();
/// config.environment = Some(Environment::Development);
///
/// let logger = RuntimeBuilder::from_config(&config, None).unwrap();
/// assert_eq!(logger.capacity(), 1000);
/// assert!(logger.environment().is_development());
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the shared logger from configuration.
    ///
    /// # Arguments
    /// * `cfg` - validated configuration
    /// * `principal` - accessor for the signed-in user, if the host has one
    pub fn from_config(
        cfg: &Config,
        principal: Option<Arc<dyn PrincipalProvider>>,
    ) -> Result<Arc<Logger>, ConfigError> {
        crate::config::validate_config(cfg)?;

        let mut builder = Logger::builder()
            .capacity(cfg.logging.get_max_entries())
            .environment(cfg.environment());

        if let Some(principal) = principal {
            builder = builder.principal(principal);
        }
        if let Some(sink) = Self::monitoring_sink(cfg)? {
            builder = builder.monitoring(sink);
        }

        Ok(Arc::new(builder.build()))
    }

    fn monitoring_sink(cfg: &Config) -> Result<Option<Arc<dyn MonitoringSink>>, ConfigError> {
        match cfg.monitoring.sink {
            SinkKind::Tracing => Ok(Some(Arc::new(TracingSink))),
            SinkKind::Disabled => Ok(None),
            SinkKind::File => {
                let path = cfg.monitoring.path.clone().ok_or(ConfigError::Invalid {
                    field: "monitoring.path",
                    reason: "required when monitoring.sink is file".to_string(),
                })?;
                Ok(Some(Arc::new(FileSink::with_capacity(
                    path,
                    cfg.monitoring.get_max_errors(),
                ))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::logging::SessionPrincipal;

    #[test]
    fn file_sink_receives_production_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_errors.json");

        let mut cfg = Config::default();
        cfg.environment = Some(Environment::Production);
        cfg.monitoring.sink = SinkKind::File;
        cfg.monitoring.path = Some(path.clone());

        let session = Arc::new(SessionPrincipal::new());
        session.sign_in("parent-9");
        let logger = RuntimeBuilder::from_config(&cfg, Some(session)).unwrap();
        logger.error("chore insert failed", None);

        let stored = FileSink::new(&path).read_entries().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].user_id.as_deref(), Some("parent-9"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = Config::default();
        cfg.logging.max_entries = Some(0);
        assert!(RuntimeBuilder::from_config(&cfg, None).is_err());
    }
}
