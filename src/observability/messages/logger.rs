// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types behind the logger's convenience methods.
//!
//! * API call failures (`api_call`)
//! * User interactions (`user_interaction`)
//! * Component failures (`component_error`)

use serde_json::Value;
use std::fmt::{Display, Formatter};

use crate::logging::{Context, LogLevel};
use crate::observability::messages::{insert_opt, StructuredLog};

/// A call to a backend endpoint failed.
///
/// # Log Level
/// `ERROR`
///
/// # Example
/// ```
/// use home_soldier::observability::messages::logger::ApiError;
///
/// let msg = ApiError {
///     endpoint: "chores",
///     error: "permission denied",
///     trace: None,
/// };
///
/// assert_eq!(msg.to_string(), "API Error: chores");
/// ```
pub struct ApiError<'a> {
    pub endpoint: &'a str,
    pub error: &'a str,
    pub trace: Option<&'a str>,
}

impl Display for ApiError<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "API Error: {}", self.endpoint)
    }
}

impl StructuredLog for ApiError<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn fields(&self) -> Context {
        let mut fields = Context::new();
        fields.insert("action".into(), Value::from("api_call"));
        fields.insert("endpoint".into(), Value::from(self.endpoint));
        fields.insert("error".into(), Value::from(self.error));
        insert_opt(&mut fields, "stack", self.trace);
        fields
    }
}

/// A user did something worth recording.
///
/// # Log Level
/// `INFO`
pub struct UserAction<'a> {
    pub action: &'a str,
}

impl Display for UserAction<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "User Action: {}", self.action)
    }
}

impl StructuredLog for UserAction<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn fields(&self) -> Context {
        let mut fields = Context::new();
        fields.insert("action".into(), Value::from("user_interaction"));
        fields
    }
}

/// A component failed while doing its work.
///
/// # Log Level
/// `ERROR`
///
/// # Example
/// ```
/// use home_soldier::observability::messages::logger::ComponentError;
///
/// let msg = ComponentError {
///     component: "NewChoreModal",
///     error: "network down",
///     trace: None,
/// };
///
/// assert_eq!(msg.to_string(), "Component Error: NewChoreModal");
/// ```
pub struct ComponentError<'a> {
    pub component: &'a str,
    pub error: &'a str,
    pub trace: Option<&'a str>,
}

impl Display for ComponentError<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Component Error: {}", self.component)
    }
}

impl StructuredLog for ComponentError<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn fields(&self) -> Context {
        let mut fields = Context::new();
        fields.insert("action".into(), Value::from("component_error"));
        fields.insert("component".into(), Value::from(self.component));
        fields.insert("error".into(), Value::from(self.error));
        insert_opt(&mut fields, "stack", self.trace);
        fields
    }
}
