// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // memory backend + monitored wrapper
pub mod config;     // config loading + runtime wiring
pub mod errors;     // error types + failure normalization
pub mod handler;    // failure -> message translation
pub mod logging;    // bounded log buffer
pub mod monitoring; // ERROR forwarding sinks
pub mod observability;
pub mod operation;  // retrying async operations
pub mod traits;     // service abstractions
