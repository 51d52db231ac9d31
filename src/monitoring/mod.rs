// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Monitoring sinks for ERROR-level log entries.
//!
//! Outside development mode the [`Logger`](crate::logging::Logger) forwards
//! every ERROR entry to its sink once. Sinks may fail; the logger swallows
//! the failure and reports it through `tracing` only.
//!
//! # Available Sinks
//!
//! * [`TracingSink`] - re-emits the entry on the `monitoring` tracing target
//! * [`FileSink`] - keeps the most recent entries as a JSON array on disk
//! * [`MemorySink`] - keeps forwarded entries in memory, with fault injection

mod file;
mod memory;
mod tracing_sink;

pub use file::FileSink;
pub use memory::MemorySink;
pub use tracing_sink::TracingSink;

use crate::errors::MonitoringError;
use crate::logging::LogEntry;

/// External error-tracking destination.
pub trait MonitoringSink: Send + Sync {
    fn forward(&self, entry: &LogEntry) -> Result<(), MonitoringError>;
}
