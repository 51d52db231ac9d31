// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::consts::DEFAULT_MAX_MONITORED_ERRORS;
use crate::errors::MonitoringError;
use crate::logging::LogEntry;
use crate::monitoring::MonitoringSink;

/// Keeps the most recent ERROR entries as a pretty-printed JSON array.
///
/// Each forward is a read-modify-write of the whole file, serialized by an
/// internal lock. A missing file is treated as empty; an unreadable one is
/// reported as an error and left untouched.
///
/// `forward` does blocking file I/O on the calling thread, and the
/// [`Logger`](crate::logging::Logger) calls it inline for every ERROR entry,
/// including entries written from inside async operations on a tokio
/// worker. That is fine for the small, bounded file this sink keeps. Hosts
/// that forward from async code themselves should go through
/// `tokio::task::spawn_blocking`:
///
/// ```
/// use std::sync::Arc;
/// use home_soldier::logging::{LogEntry, LogLevel};
/// use home_soldier::monitoring::{FileSink, MonitoringSink};
///
/// # #[tokio::main]
/// # async fn main() {
/// let dir = tempfile::tempdir().unwrap();
/// let sink = Arc::new(FileSink::new(dir.path().join("app_errors.json")));
/// let entry = LogEntry::new(LogLevel::Error, "offline", None, None);
///
/// let writer = sink.clone();
/// tokio::task::spawn_blocking(move || writer.forward(&entry))
///     .await
///     .unwrap()
///     .unwrap();
/// assert_eq!(sink.read_entries().unwrap().len(), 1);
/// # }
/// ```
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    max_errors: usize,
    lock: Mutex<()>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, DEFAULT_MAX_MONITORED_ERRORS)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, max_errors: usize) -> Self {
        Self {
            path: path.into(),
            max_errors: max_errors.max(1),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries currently retained in the file.
    pub fn read_entries(&self) -> Result<Vec<LogEntry>, MonitoringError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl MonitoringSink for FileSink {
    fn forward(&self, entry: &LogEntry) -> Result<(), MonitoringError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut entries = self.read_entries()?;
        entries.push(entry.clone());
        if entries.len() > self.max_errors {
            let excess = entries.len() - self.max_errors;
            entries.drain(..excess);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}
