// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for backend service calls and monitoring forwarding.
//!
//! * Service call breadcrumbs (start, success)
//! * Monitoring sink failures (emitted through `tracing` only, never into the buffer)

use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::logging::{Context, LogLevel};
use crate::observability::messages::{insert_opt, StructuredLog};

/// A service call is starting.
///
/// # Log Level
/// `DEBUG`
pub struct ServiceCallStarted<'a> {
    pub operation: &'a str,
    pub table: Option<&'a str>,
}

impl Display for ServiceCallStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Starting service operation: {}", self.operation)
    }
}

impl StructuredLog for ServiceCallStarted<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }

    fn fields(&self) -> Context {
        let mut fields = Context::new();
        fields.insert("operation".into(), Value::from(self.operation));
        insert_opt(&mut fields, "table", self.table);
        fields
    }
}

/// A service call returned without error.
///
/// # Log Level
/// `DEBUG`
///
/// # Example
/// ```
/// use home_soldier::observability::messages::backend::ServiceCallSucceeded;
/// use std::time::Duration;
///
/// let msg = ServiceCallSucceeded {
///     operation: "chores.insert",
///     table: Some("chores"),
///     duration: Duration::from_millis(12),
/// };
///
/// assert_eq!(msg.to_string(), "Service operation succeeded: chores.insert");
/// ```
pub struct ServiceCallSucceeded<'a> {
    pub operation: &'a str,
    pub table: Option<&'a str>,
    pub duration: Duration,
}

impl Display for ServiceCallSucceeded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Service operation succeeded: {}", self.operation)
    }
}

impl StructuredLog for ServiceCallSucceeded<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }

    fn fields(&self) -> Context {
        let mut fields = Context::new();
        fields.insert("operation".into(), Value::from(self.operation));
        insert_opt(&mut fields, "table", self.table);
        fields.insert(
            "durationMs".into(),
            Value::from(self.duration.as_millis() as u64),
        );
        fields
    }
}

/// Forwarding an ERROR entry to the monitoring sink failed.
///
/// Only ever written through `tracing::warn!`; recording it in the buffer
/// would feed the sink its own failures.
pub struct MonitoringForwardFailed<'a> {
    pub entry_message: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for MonitoringForwardFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to send error to monitoring: {} ({})",
            self.error, self.entry_message
        )
    }
}

impl MonitoringForwardFailed<'_> {
    pub fn log(&self) {
        tracing::warn!(
            target: "monitoring",
            error = %self.error,
            entry = self.entry_message,
            "{}", self
        );
    }
}
