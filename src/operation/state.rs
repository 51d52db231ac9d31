// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! State machine for a single async operation.
//!
//! ```text
//! Idle --Start--> Running --Succeed--> Succeeded
//!                    |  \--Fail-----> Failed
//!                    +-- (retries stay in Running)
//! any --Reset--> Idle
//! ```
//!
//! Starting from `Succeeded` keeps the old value visible as
//! `Running { previous }` until the new run settles. A failure clears it.
//! A run abandoned before settling (`Cancel`) falls back to what was
//! visible before it started.

use serde::Serialize;

/// Where an operation is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationStatus<T> {
    Idle,
    Running { previous: Option<T> },
    Succeeded(T),
    Failed(String),
}

/// Inputs to [`OperationStatus::transition`].
#[derive(Debug, Clone, PartialEq)]
pub enum OperationEvent<T> {
    Start,
    Succeed(T),
    Fail(String),
    Cancel,
    Reset,
}

impl<T> Default for OperationStatus<T> {
    fn default() -> Self {
        OperationStatus::Idle
    }
}

impl<T> OperationStatus<T> {
    /// Pure transition function.
    pub fn transition(self, event: OperationEvent<T>) -> Self {
        match (self, event) {
            (OperationStatus::Succeeded(value), OperationEvent::Start) => {
                OperationStatus::Running {
                    previous: Some(value),
                }
            }
            (OperationStatus::Running { previous }, OperationEvent::Start) => {
                OperationStatus::Running { previous }
            }
            (_, OperationEvent::Start) => OperationStatus::Running { previous: None },
            (_, OperationEvent::Succeed(value)) => OperationStatus::Succeeded(value),
            (_, OperationEvent::Fail(message)) => OperationStatus::Failed(message),
            (OperationStatus::Running { previous: Some(value) }, OperationEvent::Cancel) => {
                OperationStatus::Succeeded(value)
            }
            (OperationStatus::Running { previous: None }, OperationEvent::Cancel) => {
                OperationStatus::Idle
            }
            (settled, OperationEvent::Cancel) => settled,
            (_, OperationEvent::Reset) => OperationStatus::Idle,
        }
    }

    /// Latest successful result, including a stale one while re-running.
    pub fn data(&self) -> Option<&T> {
        match self {
            OperationStatus::Succeeded(value) => Some(value),
            OperationStatus::Running { previous } => previous.as_ref(),
            _ => None,
        }
    }

    pub fn loading(&self) -> bool {
        matches!(self, OperationStatus::Running { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            OperationStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            OperationStatus::Succeeded(_) | OperationStatus::Failed(_)
        )
    }
}

impl<T: Clone> OperationStatus<T> {
    /// Flatten into the `data` / `loading` / `error` triple.
    pub fn snapshot(&self) -> OperationState<T> {
        OperationState {
            data: self.data().cloned(),
            loading: self.loading(),
            error: self.error().map(str::to_string),
        }
    }
}

/// The `data` / `loading` / `error` view of an operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Status = OperationStatus<u32>;

    #[test]
    fn start_from_idle_runs_without_data() {
        let status = Status::Idle.transition(OperationEvent::Start);
        assert_eq!(status, Status::Running { previous: None });
        assert!(status.loading());
        assert_eq!(status.error(), None);
    }

    #[test]
    fn restart_keeps_previous_result_visible() {
        let status = Status::Succeeded(7).transition(OperationEvent::Start);
        assert_eq!(status.data(), Some(&7));
        assert!(status.loading());
    }

    #[test]
    fn restart_after_failure_clears_the_error() {
        let status = Status::Failed("boom".into()).transition(OperationEvent::Start);
        assert_eq!(status, Status::Running { previous: None });
        assert_eq!(status.error(), None);
    }

    #[test]
    fn settled_states_are_mutually_exclusive() {
        let ok = Status::Running { previous: None }.transition(OperationEvent::Succeed(1));
        assert_eq!(ok.snapshot(), OperationState { data: Some(1), loading: false, error: None });

        let failed = Status::Running { previous: Some(1) }
            .transition(OperationEvent::Fail("network down".into()));
        assert_eq!(
            failed.snapshot(),
            OperationState { data: None, loading: false, error: Some("network down".into()) }
        );
        assert!(ok.is_settled() && failed.is_settled());
    }

    #[test]
    fn cancel_falls_back_to_what_was_visible() {
        let with_data = Status::Running { previous: Some(3) }.transition(OperationEvent::Cancel);
        assert_eq!(with_data, Status::Succeeded(3));

        let without = Status::Running { previous: None }.transition(OperationEvent::Cancel);
        assert_eq!(without, Status::Idle);
        assert!(!without.loading());

        // settled states ignore it
        let failed = Status::Failed("x".into()).transition(OperationEvent::Cancel);
        assert_eq!(failed, Status::Failed("x".into()));
    }

    #[test]
    fn reset_is_idempotent() {
        let once = Status::Failed("x".into()).transition(OperationEvent::Reset);
        let twice = once.clone().transition(OperationEvent::Reset);
        assert_eq!(once, Status::Idle);
        assert_eq!(once, twice);
        assert_eq!(twice.snapshot(), OperationState::default());
    }
}
