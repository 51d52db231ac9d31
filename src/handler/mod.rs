// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Failure-to-message translation.
//!
//! An [`ErrorHandler`] turns any [`Failure`] into a short, non-empty display
//! string and records it in the shared [`Logger`]. It never retries.
//!
//! * [`ErrorHandler::handle`] is terminal: it logs and returns the message.
//! * [`ErrorHandler::handle_async`] is for propagation: it awaits a unit of
//!   work, logs a failure, and hands the original failure back to the caller.

use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;

use crate::config::consts::{DEFAULT_FALLBACK_MESSAGE, DEFAULT_HANDLER_COMPONENT};
use crate::config::HandlerConfig;
use crate::errors::{describe, Failure};
use crate::logging::{Context, Logger};
use crate::observability::messages::handler::FailureWarning;

/// Severity a handler records failures at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerLogLevel {
    #[default]
    Error,
    Warn,
}

/// Handler settings. `Default` matches the built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerOptions {
    pub component: String,
    pub fallback_message: String,
    pub log_level: HandlerLogLevel,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            component: DEFAULT_HANDLER_COMPONENT.to_string(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            log_level: HandlerLogLevel::Error,
        }
    }
}

impl HandlerOptions {
    pub fn for_component(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            ..Self::default()
        }
    }

    pub fn from_config(cfg: &HandlerConfig) -> Self {
        Self {
            component: cfg.get_component().to_string(),
            fallback_message: cfg.get_fallback_message().to_string(),
            log_level: cfg.get_log_level(),
        }
    }
}

/// Translates failures into display messages and log entries.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use home_soldier::handler::{ErrorHandler, HandlerOptions};
/// use home_soldier::logging::{Logger, LogLevel};
/// use serde_json::json;
///
/// let logger = Arc::new(Logger::builder().build());
/// let handler = ErrorHandler::new(logger.clone(), HandlerOptions::for_component("Rewards"));
///
/// assert_eq!(handler.handle(&json!({"message": "boom"}), None), "boom");
/// assert_eq!(handler.handle(&serde_json::Value::Null, None), "An unexpected error occurred");
/// assert_eq!(logger.get_logs(Some(LogLevel::Error)).len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ErrorHandler {
    logger: Arc<Logger>,
    options: HandlerOptions,
}

impl ErrorHandler {
    pub fn new(logger: Arc<Logger>, mut options: HandlerOptions) -> Self {
        if options.fallback_message.trim().is_empty() {
            options.fallback_message = DEFAULT_FALLBACK_MESSAGE.to_string();
        }
        Self { logger, options }
    }

    pub fn component(&self) -> &str {
        &self.options.component
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    /// Derive the display message without logging anything.
    ///
    /// Explicit message, else string rendering, else the fallback message.
    /// Never empty.
    pub fn message_for<E: Failure + ?Sized>(&self, error: &E) -> String {
        describe(error).unwrap_or_else(|| self.options.fallback_message.clone())
    }

    /// Log a terminal failure and return its display message.
    pub fn handle<E: Failure + ?Sized>(&self, error: &E, context: Option<Context>) -> String {
        let message = self.message_for(error);

        match self.options.log_level {
            HandlerLogLevel::Error => {
                self.logger
                    .component_error(&self.options.component, error, context);
            }
            HandlerLogLevel::Warn => {
                let trace = error.trace();
                self.logger.record(
                    &FailureWarning {
                        component: &self.options.component,
                        message: &message,
                        trace: trace.as_deref(),
                    },
                    context,
                );
            }
        }

        message
    }

    /// Await `work`; on failure log it through [`handle`](Self::handle) and
    /// return the very same failure value to the caller.
    pub async fn handle_async<T, E, Fut>(&self, work: Fut, context: Option<Context>) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        E: Failure,
    {
        match work.await {
            Ok(value) => Ok(value),
            Err(error) => {
                self.handle(&error, context);
                Err(error)
            }
        }
    }
}
