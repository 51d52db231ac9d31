// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::consts::DEFAULT_MAX_LOG_ENTRIES;
use crate::config::Environment;
use crate::errors::{describe, Failure};
use crate::logging::{Context, LogEntry, LogLevel, PrincipalProvider};
use crate::monitoring::MonitoringSink;
use crate::observability::messages::backend::MonitoringForwardFailed;
use crate::observability::messages::logger::{ApiError, ComponentError, UserAction};
use crate::observability::messages::StructuredLog;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Bounded, append-only record of leveled events.
///
/// One instance is built by the application's composition root and shared
/// (`Arc<Logger>`) with every handler and operation. Append and capacity
/// trim happen under one lock, so concurrent writers never lose entries or
/// double-trim. No method panics or returns an error.
///
/// # Examples
///
/// ```
/// use home_soldier::logging::{Logger, LogLevel};
///
/// let logger = Logger::builder().capacity(2).build();
/// logger.info("one", None);
/// logger.warn("two", None);
/// logger.error("three", None);
///
/// let logs = logger.get_logs(None);
/// assert_eq!(logs.len(), 2);
/// assert_eq!(logs[0].message, "two");
/// assert_eq!(logger.get_logs(Some(LogLevel::Error)).len(), 1);
/// ```
pub struct Logger {
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
    environment: Environment,
    principal: Option<Arc<dyn PrincipalProvider>>,
    monitoring: Option<Arc<dyn MonitoringSink>>,
}

/// Builder for [`Logger`]. Defaults: 1000 entries, production mode, no
/// principal, no monitoring sink.
pub struct LoggerBuilder {
    capacity: usize,
    environment: Environment,
    principal: Option<Arc<dyn PrincipalProvider>>,
    monitoring: Option<Arc<dyn MonitoringSink>>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_MAX_LOG_ENTRIES,
            environment: Environment::Production,
            principal: None,
            monitoring: None,
        }
    }
}

impl LoggerBuilder {
    /// Maximum retained entries. Clamped to at least one.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn principal(mut self, principal: Arc<dyn PrincipalProvider>) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn monitoring(mut self, sink: Arc<dyn MonitoringSink>) -> Self {
        self.monitoring = Some(sink);
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            entries: Mutex::new(VecDeque::with_capacity(self.capacity.min(DEFAULT_MAX_LOG_ENTRIES))),
            capacity: self.capacity,
            environment: self.environment,
            principal: self.principal,
            monitoring: self.monitoring,
        }
    }
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn debug(&self, message: impl Into<String>, context: Option<Context>) {
        self.log(LogLevel::Debug, message, context);
    }

    pub fn info(&self, message: impl Into<String>, context: Option<Context>) {
        self.log(LogLevel::Info, message, context);
    }

    pub fn warn(&self, message: impl Into<String>, context: Option<Context>) {
        self.log(LogLevel::Warn, message, context);
    }

    pub fn error(&self, message: impl Into<String>, context: Option<Context>) {
        self.log(LogLevel::Error, message, context);
    }

    /// Record an entry at `level`.
    pub fn log(&self, level: LogLevel, message: impl Into<String>, context: Option<Context>) {
        let user_id = self
            .principal
            .as_ref()
            .and_then(|principal| principal.current_principal());
        self.append(LogEntry::new(level, message, context, user_id));
    }

    /// Record a structured message, its fields merged over `context`.
    pub fn record<M: StructuredLog + ?Sized>(&self, message: &M, context: Option<Context>) {
        let mut merged = context.unwrap_or_default();
        merged.extend(message.fields());
        self.log(message.level(), message.to_string(), Some(merged));
    }

    /// A backend endpoint failed. Tagged `action = "api_call"`.
    pub fn api_error<E: Failure + ?Sized>(&self, endpoint: &str, error: &E, context: Option<Context>) {
        let text = describe(error).unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        let trace = error.trace();
        self.record(
            &ApiError {
                endpoint,
                error: &text,
                trace: trace.as_deref(),
            },
            context,
        );
    }

    /// A user interaction. Tagged `action = "user_interaction"`.
    pub fn user_action(&self, action: &str, context: Option<Context>) {
        self.record(&UserAction { action }, context);
    }

    /// A component failure. Tagged `action = "component_error"`.
    pub fn component_error<E: Failure + ?Sized>(
        &self,
        component: &str,
        error: &E,
        context: Option<Context>,
    ) {
        let text = describe(error).unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        let trace = error.trace();
        self.record(
            &ComponentError {
                component,
                error: &text,
                trace: trace.as_deref(),
            },
            context,
        );
    }

    /// Snapshot of the buffer in insertion order, optionally `level >= min_level`.
    pub fn get_logs(&self, min_level: Option<LogLevel>) -> Vec<LogEntry> {
        let entries = self.lock();
        match min_level {
            Some(min) => entries.iter().filter(|e| e.level >= min).cloned().collect(),
            None => entries.iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear_logs(&self) {
        self.lock().clear();
    }

    /// Pretty-printed JSON array of every retained entry.
    pub fn export_logs(&self) -> String {
        let snapshot = self.get_logs(None);
        serde_json::to_string_pretty(&snapshot).unwrap_or_else(|_| "[]".to_string())
    }

    fn append(&self, entry: LogEntry) {
        {
            let mut entries = self.lock();
            entries.push_back(entry.clone());
            while entries.len() > self.capacity {
                entries.pop_front();
            }
        }

        if self.environment.is_development() {
            mirror(&entry);
        } else if entry.level == LogLevel::Error {
            self.forward(&entry);
        }
    }

    fn forward(&self, entry: &LogEntry) {
        if let Some(sink) = &self.monitoring {
            if let Err(error) = sink.forward(entry) {
                MonitoringForwardFailed {
                    entry_message: &entry.message,
                    error: &error,
                }
                .log();
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("entries", &self.len())
            .field("capacity", &self.capacity)
            .field("environment", &self.environment)
            .field("has_principal", &self.principal.is_some())
            .field("has_monitoring", &self.monitoring.is_some())
            .finish()
    }
}

/// Development console mirror, one `tracing` event per entry at its level.
fn mirror(entry: &LogEntry) {
    let context = entry
        .context
        .as_ref()
        .and_then(|c| serde_json::to_string(c).ok())
        .unwrap_or_default();
    match entry.level {
        LogLevel::Debug => tracing::debug!(context = %context, "[DEBUG] {}", entry.message),
        LogLevel::Info => tracing::info!(context = %context, "[INFO] {}", entry.message),
        LogLevel::Warn => tracing::warn!(context = %context, "[WARN] {}", entry.message),
        LogLevel::Error => tracing::error!(context = %context, "[ERROR] {}", entry.message),
    }
}
