// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default number of entries the logger retains
pub const DEFAULT_MAX_LOG_ENTRIES: usize = 1000;
/// Default number of ERROR entries the file monitoring sink retains
pub const DEFAULT_MAX_MONITORED_ERRORS: usize = 50;
/// Default component tag for async operations
pub const DEFAULT_OPERATION_COMPONENT: &str = "AsyncOperation";
/// Default retries after the first attempt (zero means exactly one attempt)
pub const DEFAULT_RETRY_COUNT: u32 = 0;
/// Default fixed delay between attempts, in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
/// Default component tag for error handlers
pub const DEFAULT_HANDLER_COMPONENT: &str = "Unknown";
/// Message shown when a failure carries nothing displayable
pub const DEFAULT_FALLBACK_MESSAGE: &str = "An unexpected error occurred";
/// Environment variable selecting development or production mode
pub const ENVIRONMENT_VARIABLE: &str = "HOME_SOLDIER_ENV";
