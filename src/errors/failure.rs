// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The `Failure` contract: anything a unit of work can fail with.
//!
//! Failures arrive in many shapes: a typed error, an `anyhow` chain, a JSON
//! object that may or may not carry a `message` field, or a bare primitive.
//! The handler only needs three things from them, so that is all this trait
//! asks for. Every method is infallible; a failure that has nothing to say
//! returns `None` and the handler falls back to its configured message.

use serde_json::Value;

use crate::errors::{ConfigError, MonitoringError, ServiceError};

/// A failure value that can be described to a user and recorded in the log.
pub trait Failure {
    /// The explicit message the failure carries, if it has one.
    fn message(&self) -> Option<String>;

    /// A plain string rendering, used when there is no explicit message.
    fn rendering(&self) -> Option<String> {
        None
    }

    /// Diagnostic detail (cause chain, stack) kept only in the log buffer.
    fn trace(&self) -> Option<String> {
        None
    }
}

/// Derive a display message: explicit message, then rendering, then nothing.
///
/// Empty strings count as absent.
pub fn describe<F: Failure + ?Sized>(failure: &F) -> Option<String> {
    failure
        .message()
        .filter(|m| !m.is_empty())
        .or_else(|| failure.rendering().filter(|r| !r.is_empty()))
}

fn source_chain(error: &(dyn std::error::Error + 'static)) -> Option<String> {
    let mut causes = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    if causes.is_empty() {
        None
    } else {
        Some(causes.join("\ncaused by: "))
    }
}

impl<F: Failure + ?Sized> Failure for &F {
    fn message(&self) -> Option<String> {
        (**self).message()
    }

    fn rendering(&self) -> Option<String> {
        (**self).rendering()
    }

    fn trace(&self) -> Option<String> {
        (**self).trace()
    }
}

impl<F: Failure> Failure for Option<F> {
    fn message(&self) -> Option<String> {
        self.as_ref().and_then(Failure::message)
    }

    fn rendering(&self) -> Option<String> {
        self.as_ref().and_then(Failure::rendering)
    }

    fn trace(&self) -> Option<String> {
        self.as_ref().and_then(Failure::trace)
    }
}

impl Failure for anyhow::Error {
    fn message(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn trace(&self) -> Option<String> {
        let chain: Vec<String> = self.chain().skip(1).map(ToString::to_string).collect();
        if chain.is_empty() {
            None
        } else {
            Some(chain.join("\ncaused by: "))
        }
    }
}

impl Failure for Box<dyn std::error::Error + Send + Sync> {
    fn message(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn trace(&self) -> Option<String> {
        source_chain(self.as_ref())
    }
}

impl Failure for std::io::Error {
    fn message(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn trace(&self) -> Option<String> {
        Some(format!("{:?}", self.kind()))
    }
}

impl Failure for ConfigError {
    fn message(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn trace(&self) -> Option<String> {
        source_chain(self)
    }
}

impl Failure for MonitoringError {
    fn message(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn trace(&self) -> Option<String> {
        source_chain(self)
    }
}

impl Failure for ServiceError {
    fn message(&self) -> Option<String> {
        Some(self.message.clone())
    }

    fn rendering(&self) -> Option<String> {
        self.code.clone()
    }

    fn trace(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.code.as_ref().map(|c| format!("code: {c}")),
            self.details.as_ref().map(|d| format!("details: {d}")),
            self.hint.as_ref().map(|h| format!("hint: {h}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }
}

impl Failure for Value {
    fn message(&self) -> Option<String> {
        match self.get("message")? {
            Value::String(message) => Some(message.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    fn rendering(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    fn trace(&self) -> Option<String> {
        self.get("stack").and_then(Value::as_str).map(str::to_string)
    }
}

impl Failure for String {
    fn message(&self) -> Option<String> {
        None
    }

    fn rendering(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl Failure for str {
    fn message(&self) -> Option<String> {
        None
    }

    fn rendering(&self) -> Option<String> {
        Some(self.to_string())
    }
}

macro_rules! primitive_failure {
    ($($ty:ty),*) => {
        $(
            impl Failure for $ty {
                fn message(&self) -> Option<String> {
                    None
                }

                fn rendering(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

primitive_failure!(i32, i64, u32, u64, f64, bool);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn explicit_message_field_wins() {
        let failure = json!({"message": "boom", "code": "500"});
        assert_eq!(describe(&failure).as_deref(), Some("boom"));
    }

    #[test]
    fn object_without_message_renders_as_json() {
        let failure = json!({"code": 42});
        assert_eq!(describe(&failure).as_deref(), Some(r#"{"code":42}"#));
    }

    #[test]
    fn null_and_none_describe_to_nothing() {
        assert_eq!(describe(&Value::Null), None);
        assert_eq!(describe(&None::<String>), None);
    }

    #[test]
    fn empty_message_falls_through_to_rendering() {
        let failure = json!({"message": ""});
        assert_eq!(describe(&failure).as_deref(), Some(r#"{"message":""}"#));
        assert_eq!(describe(""), None);
    }

    #[test]
    fn primitives_render_their_value() {
        assert_eq!(describe(&404_i32).as_deref(), Some("404"));
        assert_eq!(describe(&false).as_deref(), Some("false"));
        assert_eq!(describe("offline").as_deref(), Some("offline"));
    }

    #[test]
    fn anyhow_trace_lists_causes() {
        let error = anyhow::anyhow!("disk full").context("saving chore");
        assert_eq!(describe(&error).as_deref(), Some("saving chore"));
        assert_eq!(error.trace().as_deref(), Some("disk full"));
    }

    #[test]
    fn service_error_trace_carries_code_and_hint() {
        let error = ServiceError::new("row violates policy")
            .with_code("42501")
            .with_hint("check the family id");
        assert_eq!(describe(&error).as_deref(), Some("row violates policy"));
        let trace = error.trace().unwrap();
        assert!(trace.contains("code: 42501"));
        assert!(trace.contains("hint: check the family id"));
    }

    #[test]
    fn boxed_errors_carry_their_source_chain() {
        let plain: Box<dyn std::error::Error + Send + Sync> = "socket closed".into();
        assert_eq!(describe(&plain).as_deref(), Some("socket closed"));
        assert_eq!(plain.trace(), None);

        let wrapped: Box<dyn std::error::Error + Send + Sync> =
            Box::new(MonitoringError::from(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk unplugged",
            )));
        assert_eq!(wrapped.trace().as_deref(), Some("disk unplugged"));
    }

    #[test]
    fn io_error_trace_is_its_kind() {
        let error = std::io::Error::new(std::io::ErrorKind::TimedOut, "backend too slow");
        assert_eq!(describe(&error).as_deref(), Some("backend too slow"));
        assert_eq!(error.trace().as_deref(), Some("TimedOut"));
    }

    #[test]
    fn config_error_is_a_failure() {
        let error = ConfigError::Io {
            path: "/etc/home-soldier.yaml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let message = describe(&error).unwrap();
        assert!(message.contains("/etc/home-soldier.yaml"));
        assert_eq!(error.trace().as_deref(), Some("no such file"));

        let invalid = ConfigError::Invalid {
            field: "logging.max_entries",
            reason: "must retain at least one entry".to_string(),
        };
        assert_eq!(invalid.trace(), None);
    }

    #[test]
    fn monitoring_error_is_a_failure() {
        let error = MonitoringError::Unavailable("sink offline".to_string());
        assert_eq!(
            describe(&error).as_deref(),
            Some("monitoring sink unavailable: sink offline")
        );

        let io = MonitoringError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only filesystem",
        ));
        assert_eq!(io.trace().as_deref(), Some("read-only filesystem"));
    }
}
