// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failure to forward an entry to a monitoring sink.
///
/// The logger swallows these; they exist so sinks can report what went wrong
/// through `tracing` without touching the log buffer.
#[derive(Error, Debug)]
pub enum MonitoringError {
    #[error("monitoring I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("monitoring serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("monitoring sink unavailable: {0}")]
    Unavailable(String),
}
