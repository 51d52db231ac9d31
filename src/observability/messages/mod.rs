// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for its human-readable line and
//! [`StructuredLog`] for the level and structured fields that go with it.
//!
//! # Organization
//!
//! * `logger` - API errors, user actions, component errors
//! * `operation` - async operation lifecycle
//! * `handler` - warning-level handled failures
//! * `backend` - service call breadcrumbs and monitoring forwarding

use std::fmt::Display;

use serde_json::Value;
use tracing::Span;

use crate::logging::{Context, LogLevel};

pub mod backend;
pub mod handler;
pub mod logger;
pub mod operation;

/// A message that knows its severity and structured fields.
pub trait StructuredLog: Display {
    fn level(&self) -> LogLevel;

    /// Structured fields merged over the caller's context.
    fn fields(&self) -> Context;

    fn span(&self, _name: &str) -> Span {
        Span::none()
    }
}

/// Insert an optional string field, skipping `None`.
pub(crate) fn insert_opt(fields: &mut Context, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        fields.insert(key.to_string(), Value::String(value.to_string()));
    }
}
