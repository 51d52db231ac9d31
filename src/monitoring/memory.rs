// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::errors::MonitoringError;
use crate::logging::LogEntry;
use crate::monitoring::MonitoringSink;

/// In-memory sink. Useful for tests and for hosts that ship entries themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
    failing: AtomicBool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `forward` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of everything forwarded so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }
}

impl MonitoringSink for MemorySink {
    fn forward(&self, entry: &LogEntry) -> Result<(), MonitoringError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MonitoringError::Unavailable("memory sink set to fail".to_string()));
        }
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.clone());
        Ok(())
    }
}
