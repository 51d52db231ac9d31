// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::MonitoringError;
use crate::logging::LogEntry;
use crate::monitoring::MonitoringSink;

/// Forwards entries to the `monitoring` tracing target.
///
/// Whatever subscriber the binary installs decides where they end up.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MonitoringSink for TracingSink {
    fn forward(&self, entry: &LogEntry) -> Result<(), MonitoringError> {
        let context = match &entry.context {
            Some(context) => serde_json::to_string(context)?,
            None => String::new(),
        };
        tracing::error!(
            target: "monitoring",
            timestamp = %entry.timestamp,
            user_id = entry.user_id.as_deref(),
            component = entry.component.as_deref(),
            action = entry.action.as_deref(),
            context = %context,
            "{}", entry.message
        );
        Ok(())
    }
}
