// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Service backends for the household app.
//!
//! # Available Backends
//!
//! ## Memory Backend
//! In-process implementation of [`DataService`](crate::traits::DataService)
//! and [`AuthService`](crate::traits::AuthService):
//! - **Tables**: JSON object rows with auto-assigned numeric `id`
//! - **Auth**: email/password accounts that drive a
//!   [`SessionPrincipal`](crate::logging::SessionPrincipal)
//! - **Fault injection**: `fail_next(n, message)` fails the next `n` calls
//! - **Use Case**: demos, tests, offline development
//!
//! ## Monitored Wrapper
//! [`MonitoredService`] wraps any backend and writes call breadcrumbs and
//! API errors to the shared [`Logger`](crate::logging::Logger).
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use home_soldier::backends::{MemoryBackend, MonitoredService};
//! use home_soldier::logging::{Logger, LogLevel};
//! use home_soldier::traits::{DataService, Filter};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let logger = Arc::new(Logger::builder().build());
//! let service = MonitoredService::new(MemoryBackend::new(), logger.clone());
//!
//! service.inner().fail_next(1, "network down");
//! let failed = service.insert("chores", json!({"title": "Dishes"})).await;
//! assert!(failed.into_result().is_err());
//!
//! let rows = service.select("chores", &Filter::new()).await.into_result().unwrap();
//! assert_eq!(rows, json!([]));
//! assert_eq!(logger.get_logs(Some(LogLevel::Error)).len(), 1);
//! # }
//! ```

pub mod memory;
pub mod monitored;

pub use memory::MemoryBackend;
pub use monitored::MonitoredService;
