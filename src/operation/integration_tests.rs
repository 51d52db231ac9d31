// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::backends::{MemoryBackend, MonitoredService};
use crate::config::{load_and_validate_config, Environment, RuntimeBuilder};
use crate::errors::ServiceError;
use crate::handler::{ErrorHandler, HandlerOptions};
use crate::logging::{context, LogLevel, Logger, PrincipalProvider, SessionPrincipal};
use crate::monitoring::{FileSink, MemorySink};
use crate::operation::{AsyncOperation, OperationOptions, OperationState};
use crate::traits::{AuthService, DataService, Filter};

/// End-to-end tests: operations driving real backends through the shared logger
#[cfg(test)]
mod tests {
    use super::*;

    fn entries_for(logger: &Logger, component: &str) -> Vec<crate::logging::LogEntry> {
        logger
            .get_logs(None)
            .into_iter()
            .filter(|e| e.component.as_deref() == Some(component))
            .collect()
    }

    #[tokio::test]
    async fn test_network_down_twice_then_success() {
        let logger = Arc::new(Logger::builder().build());
        let calls = Arc::new(AtomicU32::new(0));
        let successes = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::new(AtomicU32::new(0));

        let s = successes.clone();
        let e = errors.clone();
        let operation: AsyncOperation<Value, Value> = AsyncOperation::new(
            logger.clone(),
            OperationOptions::new("NewChoreModal")
                .retry_count(2)
                .retry_delay(Duration::from_millis(10))
                .on_success(move |value: &Value| s.lock().unwrap().push(value.clone()))
                .on_error(move |_| {
                    e.fetch_add(1, Ordering::SeqCst);
                }),
        );

        let c = calls.clone();
        let result = operation
            .execute(
                move || {
                    let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                    async move {
                        if attempt < 3 {
                            Err(json!({"message": "network down"}))
                        } else {
                            Ok(json!({"id": 42}))
                        }
                    }
                },
                None,
            )
            .await;

        assert_eq!(result, Some(json!({"id": 42})));
        assert_eq!(
            operation.state(),
            OperationState {
                data: Some(json!({"id": 42})),
                loading: false,
                error: None,
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(*successes.lock().unwrap(), vec![json!({"id": 42})]);
        assert_eq!(errors.load(Ordering::SeqCst), 0);

        let tagged = entries_for(&logger, "NewChoreModal");
        let warnings: Vec<_> = tagged.iter().filter(|e| e.level == LogLevel::Warn).collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|w| w.context.as_ref().unwrap()["error"] == "network down"));
        let completions: Vec<_> = tagged
            .iter()
            .filter(|e| e.message == "NewChoreModal: Async operation completed successfully")
            .collect();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].level, LogLevel::Info);
        assert!(logger.get_logs(Some(LogLevel::Error)).is_empty());
    }

    #[tokio::test]
    async fn test_default_options_single_attempt_boom() {
        let logger = Arc::new(Logger::builder().build());
        let calls = Arc::new(AtomicU32::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = seen.clone();
        let operation: AsyncOperation<Value, Value> = AsyncOperation::new(
            logger.clone(),
            OperationOptions::default().on_error(move |error: &Value| s.lock().unwrap().push(error.clone())),
        );
        assert_eq!(operation.max_attempts(), 1);
        assert_eq!(operation.component(), "AsyncOperation");

        let c = calls.clone();
        let result = operation
            .execute(
                move || {
                    c.fetch_add(1, Ordering::SeqCst);
                    async { Err::<Value, _>(json!({"message": "boom"})) }
                },
                None,
            )
            .await;

        assert_eq!(result, None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), vec![json!({"message": "boom"})]);
        assert_eq!(operation.error().as_deref(), Some("boom"));
        assert_eq!(operation.data(), None);
        assert!(!operation.loading());
    }

    #[tokio::test]
    async fn test_error_state_is_short_while_trace_stays_in_the_buffer() {
        let logger = Arc::new(Logger::builder().build());
        let operation: AsyncOperation<Value, Value> =
            AsyncOperation::new(logger.clone(), OperationOptions::new("ChoresList"));

        operation
            .execute(
                || async {
                    Err::<Value, _>(json!({
                        "message": "relation \"chores\" does not exist",
                        "stack": "at fetchChores\nat load",
                    }))
                },
                None,
            )
            .await;

        assert_eq!(
            operation.error().as_deref(),
            Some("relation \"chores\" does not exist")
        );
        let terminal = logger.get_logs(Some(LogLevel::Error)).remove(0);
        assert_eq!(
            terminal.context.as_ref().unwrap()["stack"],
            "at fetchChores\nat load"
        );
        assert!(logger.export_logs().contains("at fetchChores"));
    }

    #[tokio::test]
    async fn test_retry_through_monitored_backend() {
        let logger = Arc::new(Logger::builder().build());
        let service = Arc::new(MonitoredService::new(MemoryBackend::new(), logger.clone()));
        service.inner().fail_next(2, "network down");

        let operation: AsyncOperation<Value, ServiceError> = AsyncOperation::new(
            logger.clone(),
            OperationOptions::new("NewChoreModal")
                .retry_count(2)
                .retry_delay(Duration::from_millis(1)),
        );

        let chore = json!({"title": "Feed the cat", "points": 5});
        let created = operation
            .execute(
                || {
                    let service = service.clone();
                    let chore = chore.clone();
                    async move { service.insert("chores", chore).await.into_result() }
                },
                Some(context(json!({"title": "Feed the cat"}))),
            )
            .await
            .unwrap();

        assert_eq!(created["title"], "Feed the cat");
        assert_eq!(service.inner().rows("chores").len(), 1);

        let api_errors: Vec<_> = logger
            .get_logs(Some(LogLevel::Error))
            .into_iter()
            .filter(|e| e.action.as_deref() == Some("api_call"))
            .collect();
        assert_eq!(api_errors.len(), 2);

        // caller context rides along on every attempt entry
        let attempts = entries_for(&logger, "NewChoreModal");
        assert!(attempts
            .iter()
            .all(|e| e.context.as_ref().unwrap()["title"] == "Feed the cat"));
    }

    #[tokio::test]
    async fn test_exhausted_retries_reach_the_file_sink() {
        let dir = tempfile::tempdir().unwrap();
        let errors_path = dir.path().join("monitoring").join("app_errors.json");
        let config_path = dir.path().join("home-soldier.yaml");
        std::fs::write(
            &config_path,
            format!(
                "environment: production\nmonitoring:\n  sink: file\n  path: {}\n  max_errors: 10\n",
                errors_path.display()
            ),
        )
        .unwrap();

        let config = load_and_validate_config(&config_path).unwrap();
        let logger = RuntimeBuilder::from_config(&config, None).unwrap();
        let service = Arc::new(MonitoredService::new(MemoryBackend::new(), logger.clone()));
        service.inner().fail_next_with(
            3,
            ServiceError::new("permission denied for table completion_requests").with_code("42501"),
        );

        let operation: AsyncOperation<Value, ServiceError> = AsyncOperation::new(
            logger.clone(),
            OperationOptions::new("CompletionRequest")
                .retry_count(1)
                .retry_delay(Duration::from_millis(1)),
        );
        let result = operation
            .execute(
                || {
                    let service = service.clone();
                    async move {
                        service
                            .insert("completion_requests", json!({"chore_id": 1}))
                            .await
                            .into_result()
                    }
                },
                None,
            )
            .await;

        assert_eq!(result, None);
        assert_eq!(
            operation.error().as_deref(),
            Some("permission denied for table completion_requests")
        );

        let forwarded = FileSink::new(&errors_path).read_entries().unwrap();
        let messages: Vec<&str> = forwarded.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "API Error: completion_requests.insert",
                "API Error: completion_requests.insert",
                "Component Error: CompletionRequest",
            ]
        );
        assert_eq!(service.inner().pending_faults(), 1);
    }

    #[tokio::test]
    async fn test_development_mode_never_forwards() {
        let sink = Arc::new(MemorySink::new());
        let logger = Arc::new(
            Logger::builder()
                .environment(Environment::Development)
                .monitoring(sink.clone())
                .build(),
        );
        let operation: AsyncOperation<(), String> =
            AsyncOperation::new(logger.clone(), OperationOptions::new("Rewards"));

        operation
            .execute(|| async { Err("reward already claimed".to_string()) }, None)
            .await;

        assert_eq!(logger.get_logs(Some(LogLevel::Error)).len(), 1);
        assert!(sink.entries().is_empty());
    }

    #[tokio::test]
    async fn test_entries_carry_the_signed_in_user() {
        let session = Arc::new(SessionPrincipal::new());
        let principal: Arc<dyn PrincipalProvider> = session.clone();
        let logger = Arc::new(Logger::builder().principal(principal).build());
        let service = MonitoredService::new(
            MemoryBackend::new().with_session(session.clone()),
            logger.clone(),
        );

        let user = service
            .sign_up("kid@example.com", "pw", "child")
            .await
            .into_result()
            .unwrap();
        service.sign_in("kid@example.com", "pw").await;
        service.select("chores", &Filter::by("assigned_to", user["id"].clone())).await;
        service.sign_out().await;
        logger.user_action("signed_out", None);

        let logs = logger.get_logs(None);
        let select_start = logs
            .iter()
            .find(|e| e.message == "Starting service operation: chores.select")
            .unwrap();
        assert_eq!(select_start.user_id.as_deref(), user["id"].as_str());
        assert_eq!(logs[0].user_id, None);
        assert_eq!(logs.last().unwrap().user_id, None);
    }

    #[tokio::test]
    async fn test_handle_async_hands_back_the_backend_error() {
        let logger = Arc::new(Logger::builder().build());
        let service = MonitoredService::new(MemoryBackend::new(), logger.clone());
        let handler = ErrorHandler::new(logger.clone(), HandlerOptions::for_component("RewardsList"));
        service.inner().fail_next_with(
            1,
            ServiceError::new("JWT expired").with_code("PGRST301").with_hint("sign in again"),
        );

        let result = handler
            .handle_async(
                async { service.select("rewards", &Filter::new()).await.into_result() },
                None,
            )
            .await;

        let error = result.unwrap_err();
        assert_eq!(error.code.as_deref(), Some("PGRST301"));
        assert_eq!(error.hint.as_deref(), Some("sign in again"));

        let component_errors: Vec<_> = logger
            .get_logs(Some(LogLevel::Error))
            .into_iter()
            .filter(|e| e.action.as_deref() == Some("component_error"))
            .collect();
        assert_eq!(component_errors.len(), 1);
        assert_eq!(component_errors[0].component.as_deref(), Some("RewardsList"));
    }
}
