// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Open-ended key/value context attached to log entries.
pub type Context = Map<String, Value>;

/// Build a [`Context`] from a JSON value.
///
/// Objects are used as-is; any other value is stored under `"value"` and
/// `null` yields an empty context.
///
/// ```
/// use home_soldier::logging::context;
/// use serde_json::json;
///
/// let ctx = context(json!({"choreId": 7}));
/// assert_eq!(ctx["choreId"], 7);
/// ```
pub fn context(value: Value) -> Context {
    match value {
        Value::Object(map) => map,
        Value::Null => Context::new(),
        other => {
            let mut map = Context::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

/// Ordered log severity: `Debug < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded event. Immutable once created.
///
/// The serialized field names (`timestamp`, `level`, `message`, `context`,
/// `userId`, `component`, `action`) are the diagnostic export format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl LogEntry {
    /// Create an entry stamped now. `component` and `action` are lifted from
    /// the context's string fields of the same name.
    pub fn new(
        level: LogLevel,
        message: impl Into<String>,
        context: Option<Context>,
        user_id: Option<String>,
    ) -> Self {
        let tag = |key: &str| {
            context
                .as_ref()
                .and_then(|c| c.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let component = tag("component");
        let action = tag("action");

        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            context,
            user_id,
            component,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn tags_are_lifted_from_context() {
        let entry = LogEntry::new(
            LogLevel::Info,
            "User Action: chore_created",
            Some(context(json!({"action": "user_interaction", "component": "Chores"}))),
            Some("parent-1".to_string()),
        );
        assert_eq!(entry.action.as_deref(), Some("user_interaction"));
        assert_eq!(entry.component.as_deref(), Some("Chores"));
        assert_eq!(entry.user_id.as_deref(), Some("parent-1"));
    }

    #[test]
    fn serialized_entry_uses_export_field_names() {
        let entry = LogEntry::new(
            LogLevel::Warn,
            "slow",
            Some(context(json!({"action": "api_call"}))),
            Some("u1".to_string()),
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["action"], "api_call");
        assert!(value.get("component").is_none());
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn non_object_values_are_wrapped() {
        assert_eq!(context(json!(3))["value"], 3);
        assert!(context(Value::Null).is_empty());
    }
}
