// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::logging::{context, Logger};
use crate::observability::messages::backend::{ServiceCallStarted, ServiceCallSucceeded};
use crate::traits::{AuthService, DataResponse, DataService, Filter};

/// Wraps a service and records every call in the [`Logger`].
///
/// Each call gets a DEBUG breadcrumb before it runs and either a DEBUG
/// completion (with `durationMs`) or an `api_error` entry carrying the
/// backend's code, details and hint. Responses pass through unchanged.
///
/// Operation names are `<table>.<verb>` for data calls and `auth.<verb>`
/// for auth calls.
pub struct MonitoredService<S> {
    inner: S,
    logger: Arc<Logger>,
}

impl<S> MonitoredService<S> {
    pub fn new(inner: S, logger: Arc<Logger>) -> Self {
        Self { inner, logger }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn observe<Fut>(&self, operation: &str, table: Option<&str>, call: Fut) -> DataResponse
    where
        Fut: Future<Output = DataResponse> + Send,
    {
        self.logger
            .record(&ServiceCallStarted { operation, table }, None);
        let started = Instant::now();

        let response = call.await;

        match &response.error {
            None => self.logger.record(
                &ServiceCallSucceeded {
                    operation,
                    table,
                    duration: started.elapsed(),
                },
                None,
            ),
            Some(error) => self.logger.api_error(
                operation,
                error,
                Some(context(json!({
                    "operation": operation,
                    "table": table,
                    "code": error.code,
                    "details": error.details,
                    "hint": error.hint,
                }))),
            ),
        }

        response
    }
}

#[async_trait]
impl<S: DataService> DataService for MonitoredService<S> {
    async fn select(&self, table: &str, filter: &Filter) -> DataResponse {
        let operation = format!("{table}.select");
        self.observe(&operation, Some(table), self.inner.select(table, filter))
            .await
    }

    async fn insert(&self, table: &str, row: Value) -> DataResponse {
        let operation = format!("{table}.insert");
        self.observe(&operation, Some(table), self.inner.insert(table, row))
            .await
    }

    async fn update(&self, table: &str, filter: &Filter, patch: Value) -> DataResponse {
        let operation = format!("{table}.update");
        self.observe(
            &operation,
            Some(table),
            self.inner.update(table, filter, patch),
        )
        .await
    }

    async fn delete(&self, table: &str, filter: &Filter) -> DataResponse {
        let operation = format!("{table}.delete");
        self.observe(&operation, Some(table), self.inner.delete(table, filter))
            .await
    }
}

#[async_trait]
impl<S: AuthService> AuthService for MonitoredService<S> {
    async fn sign_in(&self, email: &str, password: &str) -> DataResponse {
        self.observe("auth.sign_in", None, self.inner.sign_in(email, password))
            .await
    }

    async fn sign_up(&self, email: &str, password: &str, role: &str) -> DataResponse {
        self.observe(
            "auth.sign_up",
            None,
            self.inner.sign_up(email, password, role),
        )
        .await
    }

    async fn sign_out(&self) -> DataResponse {
        self.observe("auth.sign_out", None, self.inner.sign_out())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryBackend;
    use crate::errors::ServiceError;
    use crate::logging::LogLevel;

    fn monitored() -> (Arc<Logger>, MonitoredService<MemoryBackend>) {
        let logger = Arc::new(Logger::builder().build());
        let service = MonitoredService::new(MemoryBackend::new(), logger.clone());
        (logger, service)
    }

    #[tokio::test]
    async fn successful_calls_leave_two_debug_breadcrumbs() {
        let (logger, service) = monitored();
        let response = service.insert("chores", json!({"title": "Dishes"})).await;
        assert!(response.is_ok());

        let logs = logger.get_logs(None);
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|e| e.level == LogLevel::Debug));
        assert_eq!(logs[0].message, "Starting service operation: chores.insert");
        assert_eq!(logs[1].message, "Service operation succeeded: chores.insert");
        let ctx = logs[1].context.as_ref().unwrap();
        assert_eq!(ctx["table"], "chores");
        assert!(ctx["durationMs"].is_u64());
    }

    #[tokio::test]
    async fn failures_are_recorded_as_api_errors() {
        let (logger, service) = monitored();
        service.inner().fail_next_with(
            1,
            ServiceError::new("permission denied for table chores")
                .with_code("42501")
                .with_hint("check row level security"),
        );

        let response = service.select("chores", &Filter::new()).await;
        assert_eq!(
            response.error.as_ref().map(|e| e.message.as_str()),
            Some("permission denied for table chores")
        );

        let errors = logger.get_logs(Some(LogLevel::Error));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "API Error: chores.select");
        assert_eq!(errors[0].action.as_deref(), Some("api_call"));
        let ctx = errors[0].context.as_ref().unwrap();
        assert_eq!(ctx["operation"], "chores.select");
        assert_eq!(ctx["code"], "42501");
        assert_eq!(ctx["hint"], "check row level security");
        assert_eq!(ctx["error"], "permission denied for table chores");
    }

    #[tokio::test]
    async fn auth_calls_are_monitored_without_a_table() {
        let (logger, service) = monitored();
        service.sign_in("nobody@example.com", "pw").await;

        let errors = logger.get_logs(Some(LogLevel::Error));
        assert_eq!(errors[0].message, "API Error: auth.sign_in");
        assert_eq!(errors[0].context.as_ref().unwrap()["table"], Value::Null);
    }
}
