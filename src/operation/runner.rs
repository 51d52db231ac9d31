// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::Instrument;

use crate::config::consts::{DEFAULT_OPERATION_COMPONENT, DEFAULT_RETRY_COUNT, DEFAULT_RETRY_DELAY_MS};
use crate::config::OperationConfig;
use crate::errors::Failure;
use crate::handler::{ErrorHandler, HandlerOptions};
use crate::logging::{Context, Logger};
use crate::observability::messages::operation::{
    AttemptFailed, AttemptStarted, AttemptSucceeded, OperationCancelled, OperationStarted,
};
use crate::observability::messages::StructuredLog;
use crate::operation::{OperationEvent, OperationState, OperationStatus};

pub type SuccessCallback<T> = Box<dyn Fn(&T) + Send + Sync>;
pub type ErrorCallback<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Settings for an [`AsyncOperation`].
///
/// # Fields
/// * `component` - tag on every log entry the operation writes
/// * `retry_count` - retries after the first attempt (0 means one attempt)
/// * `retry_delay` - fixed wait between attempts
/// * `on_success` - called once with the result when an attempt succeeds
/// * `on_error` - called once with the last failure when attempts run out
pub struct OperationOptions<T, E> {
    pub component: String,
    pub retry_count: u32,
    pub retry_delay: Duration,
    pub on_success: Option<SuccessCallback<T>>,
    pub on_error: Option<ErrorCallback<E>>,
}

impl<T, E> Default for OperationOptions<T, E> {
    fn default() -> Self {
        Self {
            component: DEFAULT_OPERATION_COMPONENT.to_string(),
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            on_success: None,
            on_error: None,
        }
    }
}

impl<T, E> OperationOptions<T, E> {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            ..Self::default()
        }
    }

    pub fn from_config(cfg: &OperationConfig) -> Self {
        Self {
            component: cfg.get_component().to_string(),
            retry_count: cfg.get_retry_count(),
            retry_delay: cfg.get_retry_delay(),
            ..Self::default()
        }
    }

    pub fn retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn on_success(mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&E) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.retry_count.saturating_add(1)
    }
}

/// Runs a unit of work with bounded, fixed-delay retry.
///
/// `execute` never fails: success lands in `data`, exhaustion lands in
/// `error` as a display message, and exactly one of `on_success` /
/// `on_error` fires per call. There is no cancellation channel; a call runs
/// all its attempts and delays unless the caller drops its future.
///
/// Overlapping calls on one instance are serialized in arrival order, so at
/// most one unit of work is in flight and the state always belongs to the
/// most recently settled call.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use home_soldier::logging::Logger;
/// use home_soldier::operation::{AsyncOperation, OperationOptions};
///
/// # #[tokio::main]
/// # async fn main() {
/// let logger = Arc::new(Logger::builder().build());
/// let operation: AsyncOperation<u32, String> = AsyncOperation::new(
///     logger,
///     OperationOptions::new("Dashboard")
///         .retry_count(1)
///         .retry_delay(Duration::from_millis(1)),
/// );
///
/// let result = operation.execute(|| async { Ok(3) }, None).await;
/// assert_eq!(result, Some(3));
/// assert_eq!(operation.state().data, Some(3));
/// # }
/// ```
pub struct AsyncOperation<T, E> {
    logger: Arc<Logger>,
    handler: ErrorHandler,
    options: OperationOptions<T, E>,
    status: Mutex<OperationStatus<T>>,
    serial: tokio::sync::Mutex<()>,
}

impl<T, E> AsyncOperation<T, E>
where
    T: Clone,
    E: Failure,
{
    /// Build an operation whose failures are handled under its own component tag.
    pub fn new(logger: Arc<Logger>, options: OperationOptions<T, E>) -> Self {
        let handler = ErrorHandler::new(
            logger.clone(),
            HandlerOptions::for_component(options.component.clone()),
        );
        Self::with_handler(logger, handler, options)
    }

    /// Build an operation around an existing handler (custom fallback or severity).
    pub fn with_handler(
        logger: Arc<Logger>,
        handler: ErrorHandler,
        options: OperationOptions<T, E>,
    ) -> Self {
        Self {
            logger,
            handler,
            options,
            status: Mutex::new(OperationStatus::Idle),
            serial: tokio::sync::Mutex::new(()),
        }
    }

    pub fn component(&self) -> &str {
        &self.options.component
    }

    pub fn max_attempts(&self) -> u32 {
        self.options.max_attempts()
    }

    pub fn status(&self) -> OperationStatus<T> {
        self.lock_status().clone()
    }

    pub fn state(&self) -> OperationState<T> {
        self.lock_status().snapshot()
    }

    pub fn data(&self) -> Option<T> {
        self.lock_status().data().cloned()
    }

    pub fn loading(&self) -> bool {
        self.lock_status().loading()
    }

    pub fn error(&self) -> Option<String> {
        self.lock_status().error().map(str::to_string)
    }

    /// Run `work` up to `retry_count + 1` times.
    ///
    /// Returns the result of the first successful attempt, or `None` once
    /// every attempt has failed (check `error()` for the message). `context`
    /// is attached to every log entry this call writes.
    ///
    /// A panicking attempt counts as a failed attempt. If the last attempt
    /// panics there is no `E` to hand over, so `on_error` is skipped and the
    /// state gets the handler's fallback message. Dropping the returned
    /// future before it settles puts the state back to what was visible
    /// before the call.
    pub async fn execute<F, Fut>(&self, work: F, context: Option<Context>) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let _turn = self.serial.lock().await;

        let span = OperationStarted {
            component: &self.options.component,
            max_attempts: self.max_attempts(),
        }
        .span("execute");

        self.run(work, context).instrument(span).await
    }

    /// Back to `Idle`. No callbacks, no log entries.
    pub fn reset(&self) {
        self.apply(OperationEvent::Reset);
    }

    async fn run<F, Fut>(&self, mut work: F, context: Option<Context>) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.apply(OperationEvent::Start);

        let component = self.options.component.as_str();
        let max_attempts = self.max_attempts();
        let mut unsettled = Unsettled {
            status: &self.status,
            logger: &self.logger,
            component,
            attempt: 0,
            armed: true,
        };

        let last_failure = loop {
            unsettled.attempt += 1;
            let attempt = unsettled.attempt;
            self.logger.record(
                &AttemptStarted {
                    component,
                    attempt,
                    max_attempts,
                },
                context.clone(),
            );

            let outcome = match AssertUnwindSafe(async { work().await }).catch_unwind().await {
                Ok(result) => result.map_err(AttemptFailure::Failed),
                Err(payload) => Err(AttemptFailure::Panicked(Panicked::from_payload(payload))),
            };

            match outcome {
                Ok(result) => {
                    self.apply(OperationEvent::Succeed(result.clone()));
                    unsettled.armed = false;
                    self.logger
                        .record(&AttemptSucceeded { component, attempt }, context.clone());
                    if let Some(on_success) = &self.options.on_success {
                        on_success(&result);
                    }
                    return Some(result);
                }
                Err(failure) => {
                    let message = self.handler.message_for(&failure);
                    let trace = failure.trace();
                    self.logger.record(
                        &AttemptFailed {
                            component,
                            attempt,
                            max_attempts,
                            error: &message,
                            trace: trace.as_deref(),
                        },
                        context.clone(),
                    );

                    if attempt >= max_attempts {
                        break failure;
                    }
                    tokio::time::sleep(self.options.retry_delay).await;
                }
            }
        };

        let message = self.handler.handle(&last_failure, context);
        self.apply(OperationEvent::Fail(message));
        unsettled.armed = false;
        if let (AttemptFailure::Failed(error), Some(on_error)) = (&last_failure, &self.options.on_error) {
            on_error(error);
        }
        None
    }

    fn apply(&self, event: OperationEvent<T>) {
        apply_event(&self.status, event);
    }

    fn lock_status(&self) -> MutexGuard<'_, OperationStatus<T>> {
        lock_status(&self.status)
    }
}

fn lock_status<T>(status: &Mutex<OperationStatus<T>>) -> MutexGuard<'_, OperationStatus<T>> {
    status.lock().unwrap_or_else(|e| e.into_inner())
}

fn apply_event<T>(status: &Mutex<OperationStatus<T>>, event: OperationEvent<T>) {
    let mut status = lock_status(status);
    let current = std::mem::take(&mut *status);
    *status = current.transition(event);
}

/// What a single attempt failed with.
enum AttemptFailure<E> {
    Failed(E),
    Panicked(Panicked),
}

impl<E: Failure> Failure for AttemptFailure<E> {
    fn message(&self) -> Option<String> {
        match self {
            AttemptFailure::Failed(error) => error.message(),
            AttemptFailure::Panicked(panicked) => panicked.message(),
        }
    }

    fn rendering(&self) -> Option<String> {
        match self {
            AttemptFailure::Failed(error) => error.rendering(),
            AttemptFailure::Panicked(panicked) => panicked.rendering(),
        }
    }

    fn trace(&self) -> Option<String> {
        match self {
            AttemptFailure::Failed(error) => error.trace(),
            AttemptFailure::Panicked(panicked) => panicked.trace(),
        }
    }
}

/// A panic caught from a unit of work. Shown to users as the handler's
/// fallback message; the panic text only goes to the log as `stack`.
struct Panicked(String);

impl Panicked {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let text = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Panicked(format!("panicked: {text}"))
    }
}

impl Failure for Panicked {
    fn message(&self) -> Option<String> {
        None
    }

    fn trace(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Armed from `Start` until the run settles. If the run future is dropped
/// first, the status gets `Cancel` so it never stays `Running`.
struct Unsettled<'a, T> {
    status: &'a Mutex<OperationStatus<T>>,
    logger: &'a Logger,
    component: &'a str,
    attempt: u32,
    armed: bool,
}

impl<T> Drop for Unsettled<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        apply_event(self.status, OperationEvent::Cancel);
        self.logger.record(
            &OperationCancelled {
                component: self.component,
                attempt: self.attempt,
            },
            None,
        );
    }
}
