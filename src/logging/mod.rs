// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process structured log buffer.
//!
//! The [`Logger`] keeps the most recent entries (1000 by default) in memory,
//! mirrors them to `tracing` in development mode and forwards ERROR entries
//! to a [`MonitoringSink`](crate::monitoring::MonitoringSink) otherwise. The
//! buffer can be exported as JSON and attached to a support request.

mod entry;
mod logger;
mod principal;

pub use entry::{context, Context, LogEntry, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use principal::{PrincipalProvider, SessionPrincipal};
