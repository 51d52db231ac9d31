// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod failure;
mod monitoring;
mod service;

pub use config::ConfigError;
pub use failure::{describe, Failure};
pub use monitoring::MonitoringError;
pub use service::ServiceError;
