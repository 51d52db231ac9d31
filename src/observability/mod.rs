// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for every log line the
//! core emits into the [`Logger`](crate::logging::Logger) buffer and through
//! `tracing`. Message types follow a struct-based pattern with `Display` to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep the diagnostic export stable across releases
//! * Provide consistent, structured context for every entry
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::logger` - convenience records (API errors, user actions, component errors)
//! * `messages::operation` - async operation attempts and outcomes
//! * `messages::handler` - failures handled at warning severity
//! * `messages::backend` - data/auth service calls and monitoring forwarding
//!
//! # Usage
//!
//! ```rust
//! use home_soldier::logging::Logger;
//! use home_soldier::observability::messages::logger::UserAction;
//!
//! let logger = Logger::builder().build();
//! logger.record(&UserAction { action: "chores_filter_changed" }, None);
//! assert_eq!(logger.get_logs(None)[0].message, "User Action: chores_filter_changed");
//! ```

pub mod messages;
