// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Async operations with bounded retry.
//!
//! [`AsyncOperation`] wraps a repeatable unit of work, tracks its
//! `data` / `loading` / `error` state through [`OperationStatus`], and logs
//! every attempt to the shared [`Logger`](crate::logging::Logger).

pub mod runner;
pub mod state;
#[cfg(test)]
mod integration_tests;

pub use runner::{AsyncOperation, ErrorCallback, OperationOptions, SuccessCallback};
pub use state::{OperationEvent, OperationState, OperationStatus};
