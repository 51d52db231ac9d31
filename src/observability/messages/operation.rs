// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for async operation lifecycle events.
//!
//! Every entry carries the operation's `component` tag so entries from
//! interleaved operations can be told apart in the buffer.

use serde_json::Value;
use std::fmt::{Display, Formatter};
use tracing::Span;

use crate::logging::{Context, LogLevel};
use crate::observability::messages::{insert_opt, StructuredLog};

/// An `execute` call took its turn and is about to run its attempts.
///
/// Only used for the `async_operation` tracing span; the per-attempt
/// messages are what land in the buffer.
///
/// # Log Level
/// `INFO`
///
/// # Example
/// ```
/// use home_soldier::observability::messages::operation::OperationStarted;
///
/// let msg = OperationStarted {
///     component: "NewChoreModal",
///     max_attempts: 3,
/// };
///
/// assert_eq!(msg.to_string(), "NewChoreModal: Running async operation (max 3 attempts)");
/// ```
pub struct OperationStarted<'a> {
    pub component: &'a str,
    pub max_attempts: u32,
}

impl Display for OperationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}: Running async operation (max {} attempts)",
            self.component, self.max_attempts
        )
    }
}

impl StructuredLog for OperationStarted<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn fields(&self) -> Context {
        let mut fields = Context::new();
        fields.insert("component".into(), Value::from(self.component));
        fields.insert("maxAttempts".into(), Value::from(self.max_attempts));
        fields
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "async_operation",
            span_name = name,
            component = self.component,
            max_attempts = self.max_attempts,
        )
    }
}

/// An attempt is about to run.
///
/// # Log Level
/// `INFO`
///
/// # Example
/// ```
/// use home_soldier::observability::messages::operation::AttemptStarted;
///
/// let msg = AttemptStarted {
///     component: "NewChoreModal",
///     attempt: 1,
///     max_attempts: 3,
/// };
///
/// assert_eq!(msg.to_string(), "NewChoreModal: Starting async operation");
/// ```
pub struct AttemptStarted<'a> {
    pub component: &'a str,
    pub attempt: u32,
    pub max_attempts: u32,
}

impl Display for AttemptStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}: Starting async operation", self.component)
    }
}

impl StructuredLog for AttemptStarted<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn fields(&self) -> Context {
        let mut fields = Context::new();
        fields.insert("component".into(), Value::from(self.component));
        fields.insert("attempt".into(), Value::from(self.attempt));
        fields.insert("maxAttempts".into(), Value::from(self.max_attempts));
        fields
    }
}

/// An attempt produced a result.
///
/// # Log Level
/// `INFO`
pub struct AttemptSucceeded<'a> {
    pub component: &'a str,
    pub attempt: u32,
}

impl Display for AttemptSucceeded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}: Async operation completed successfully", self.component)
    }
}

impl StructuredLog for AttemptSucceeded<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn fields(&self) -> Context {
        let mut fields = Context::new();
        fields.insert("component".into(), Value::from(self.component));
        fields.insert("attempt".into(), Value::from(self.attempt));
        fields
    }
}

/// An attempt failed, either with an error or by panicking. Retried if
/// budget remains. `trace` lands in the entry's `stack` field.
///
/// # Log Level
/// `WARN`
///
/// # Example
/// ```
/// use home_soldier::observability::messages::operation::AttemptFailed;
///
/// let msg = AttemptFailed {
///     component: "ChoresList",
///     attempt: 2,
///     max_attempts: 3,
///     error: "network down",
///     trace: None,
/// };
///
/// assert_eq!(msg.to_string(), "ChoresList: Async operation failed");
/// ```
pub struct AttemptFailed<'a> {
    pub component: &'a str,
    pub attempt: u32,
    pub max_attempts: u32,
    pub error: &'a str,
    pub trace: Option<&'a str>,
}

impl Display for AttemptFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}: Async operation failed", self.component)
    }
}

impl StructuredLog for AttemptFailed<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Warn
    }

    fn fields(&self) -> Context {
        let mut fields = Context::new();
        fields.insert("component".into(), Value::from(self.component));
        fields.insert("attempt".into(), Value::from(self.attempt));
        fields.insert("maxAttempts".into(), Value::from(self.max_attempts));
        fields.insert("error".into(), Value::from(self.error));
        insert_opt(&mut fields, "stack", self.trace);
        fields
    }
}

/// The caller dropped an `execute` call before it settled (timeout,
/// `select!`). State falls back to what was visible before the call.
///
/// # Log Level
/// `WARN`
pub struct OperationCancelled<'a> {
    pub component: &'a str,
    pub attempt: u32,
}

impl Display for OperationCancelled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}: Async operation cancelled", self.component)
    }
}

impl StructuredLog for OperationCancelled<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Warn
    }

    fn fields(&self) -> Context {
        let mut fields = Context::new();
        fields.insert("component".into(), Value::from(self.component));
        fields.insert("attempt".into(), Value::from(self.attempt));
        fields
    }
}
