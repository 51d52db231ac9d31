// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for failures handled at warning severity.

use serde_json::Value;
use std::fmt::{Display, Formatter};

use crate::logging::{Context, LogLevel};
use crate::observability::messages::{insert_opt, StructuredLog};

/// A failure a handler was configured to record as a warning.
///
/// # Log Level
/// `WARN`
///
/// # Example
/// ```
/// use home_soldier::observability::messages::handler::FailureWarning;
///
/// let msg = FailureWarning {
///     component: "Rewards",
///     message: "reward already claimed",
///     trace: None,
/// };
///
/// assert_eq!(msg.to_string(), "Rewards: reward already claimed");
/// ```
pub struct FailureWarning<'a> {
    pub component: &'a str,
    pub message: &'a str,
    pub trace: Option<&'a str>,
}

impl Display for FailureWarning<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}: {}", self.component, self.message)
    }
}

impl StructuredLog for FailureWarning<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Warn
    }

    fn fields(&self) -> Context {
        let mut fields = Context::new();
        fields.insert("component".into(), Value::from(self.component));
        fields.insert("error".into(), Value::from(self.message));
        insert_opt(&mut fields, "stack", self.trace);
        fields
    }
}
