// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context as _;
use serde_json::{json, Value};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use home_soldier::backends::{MemoryBackend, MonitoredService};
use home_soldier::config::{load_and_validate_config, Config, RuntimeBuilder};
use home_soldier::errors::ServiceError;
use home_soldier::handler::{ErrorHandler, HandlerOptions};
use home_soldier::logging::{context, Logger, PrincipalProvider, SessionPrincipal};
use home_soldier::operation::{AsyncOperation, OperationOptions};
use home_soldier::traits::{AuthService, DataService};

type Service = MonitoredService<MemoryBackend>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [config.yaml|config.toml]", args[0]);
        std::process::exit(1);
    }

    let config = match args.get(1) {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("failed to load configuration from {path}"))?,
        None => Config::default(),
    };

    println!("🏠 Home Soldier resilience demo");
    println!("═══════════════════════════════");
    println!("Environment: {:?}", config.environment());
    println!();

    let session = Arc::new(SessionPrincipal::new());
    let principal: Arc<dyn PrincipalProvider> = session.clone();
    let logger = RuntimeBuilder::from_config(&config, Some(principal))?;

    let backend = MemoryBackend::new().with_session(session);
    let service = Arc::new(MonitoredService::new(backend, logger.clone()));

    sign_in_demo_parent(&service).await?;
    logger.user_action("open_new_chore_modal", None);

    create_chore(&config, &logger, &service).await;
    request_completion(&config, &logger, &service).await;

    println!("\n📜 Exported log buffer ({} entries):", logger.len());
    println!("{}", logger.export_logs());

    Ok(())
}

async fn sign_in_demo_parent(service: &Service) -> anyhow::Result<()> {
    service
        .sign_up("parent@example.com", "correct-horse", "parent")
        .await
        .into_result()
        .context("demo sign up failed")?;
    let user = service
        .sign_in("parent@example.com", "correct-horse")
        .await
        .into_result()
        .context("demo sign in failed")?;
    println!("👤 Signed in as {}", user["email"]);
    Ok(())
}

/// Insert fails twice through fault injection, then lands on the third attempt.
async fn create_chore(config: &Config, logger: &Arc<Logger>, service: &Arc<Service>) {
    println!("\n➕ Creating a chore (two injected failures)");
    service.inner().fail_next(2, "network down");

    let operation: AsyncOperation<Value, ServiceError> = AsyncOperation::with_handler(
        logger.clone(),
        handler_for(config, logger, "NewChoreModal"),
        options_for(config, "NewChoreModal")
            .retry_count(config.operation.get_retry_count().max(2))
            .on_success(|chore| println!("   ✅ created chore {}", chore["id"])),
    );

    let chore = json!({"title": "Unload dishwasher", "points": 10, "status": "pending"});
    let result = operation
        .execute(
            || {
                let service = service.clone();
                let chore = chore.clone();
                async move { service.insert("chores", chore).await.into_result() }
            },
            Some(context(json!({"title": "Unload dishwasher"}))),
        )
        .await;

    println!("   result: {result:?}");
    println!("   state:  {}", render_state(&operation));
}

/// Completion requests are denied every time, so retries run out.
async fn request_completion(config: &Config, logger: &Arc<Logger>, service: &Arc<Service>) {
    println!("\n🙋 Requesting chore completion (always denied)");
    service.inner().fail_next_with(
        2,
        ServiceError::new("permission denied for table completion_requests")
            .with_code("42501")
            .with_hint("children may only request completion of assigned chores"),
    );

    let operation: AsyncOperation<Value, ServiceError> = AsyncOperation::with_handler(
        logger.clone(),
        handler_for(config, logger, "CompletionRequest"),
        options_for(config, "CompletionRequest")
            .retry_count(1)
            .on_error(|error| println!("   ❌ gave up: {error}")),
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

    println!("   result: {result:?}");
    println!("   state:  {}", render_state(&operation));
}

/// Configured operation defaults under a demo component tag, with the
/// delay capped so the demo stays quick.
fn options_for(config: &Config, component: &str) -> OperationOptions<Value, ServiceError> {
    let delay = config
        .operation
        .get_retry_delay()
        .min(Duration::from_millis(250));
    OperationOptions {
        component: component.to_string(),
        ..OperationOptions::from_config(&config.operation)
    }
    .retry_delay(delay)
}

fn handler_for(config: &Config, logger: &Arc<Logger>, component: &str) -> ErrorHandler {
    ErrorHandler::new(
        logger.clone(),
        HandlerOptions {
            component: component.to_string(),
            ..HandlerOptions::from_config(&config.handler)
        },
    )
}

fn render_state(operation: &AsyncOperation<Value, ServiceError>) -> String {
    serde_json::to_string(&operation.state()).unwrap_or_else(|_| "{}".to_string())
}
