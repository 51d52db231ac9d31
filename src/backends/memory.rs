// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::ServiceError;
use crate::logging::SessionPrincipal;
use crate::traits::{AuthService, DataResponse, DataService, Filter};

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user: Value,
}

/// In-memory data and auth backend.
///
/// Rows are JSON objects; `insert` assigns a numeric `id` when the row has
/// none. Queued faults from [`fail_next`](MemoryBackend::fail_next) are
/// consumed one per call, before the call touches any data.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    accounts: Mutex<HashMap<String, Account>>,
    faults: Mutex<VecDeque<ServiceError>>,
    next_id: AtomicU64,
    session: Option<Arc<SessionPrincipal>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `session` in step with sign in and sign out.
    pub fn with_session(mut self, session: Arc<SessionPrincipal>) -> Self {
        self.session = Some(session);
        self
    }

    /// Fail the next `count` calls with `message`.
    pub fn fail_next(&self, count: usize, message: impl Into<String>) {
        self.fail_next_with(count, ServiceError::new(message));
    }

    pub fn fail_next_with(&self, count: usize, error: ServiceError) {
        let mut faults = lock(&self.faults);
        faults.extend(std::iter::repeat(error).take(count));
    }

    pub fn pending_faults(&self) -> usize {
        lock(&self.faults).len()
    }

    /// All rows currently in `table`.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        lock(&self.tables).get(table).cloned().unwrap_or_default()
    }

    fn take_fault(&self) -> Option<ServiceError> {
        lock(&self.faults).pop_front()
    }

    fn assign_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn not_an_object(what: &str) -> ServiceError {
    ServiceError::new(format!("{what} must be a JSON object")).with_code("22P02")
}

#[async_trait]
impl DataService for MemoryBackend {
    async fn select(&self, table: &str, filter: &Filter) -> DataResponse {
        if let Some(fault) = self.take_fault() {
            return DataResponse::err(fault);
        }
        let rows: Vec<Value> = lock(&self.tables)
            .get(table)
            .map(|rows| rows.iter().filter(|row| filter.matches(row)).cloned().collect())
            .unwrap_or_default();
        DataResponse::ok(Value::Array(rows))
    }

    async fn insert(&self, table: &str, row: Value) -> DataResponse {
        if let Some(fault) = self.take_fault() {
            return DataResponse::err(fault);
        }
        let Value::Object(mut fields) = row else {
            return DataResponse::err(not_an_object("row"));
        };
        if !fields.contains_key("id") {
            fields.insert("id".into(), Value::from(self.assign_id()));
        }
        let row = Value::Object(fields);
        lock(&self.tables)
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        DataResponse::ok(row)
    }

    async fn update(&self, table: &str, filter: &Filter, patch: Value) -> DataResponse {
        if let Some(fault) = self.take_fault() {
            return DataResponse::err(fault);
        }
        let Value::Object(patch) = patch else {
            return DataResponse::err(not_an_object("patch"));
        };
        let mut tables = lock(&self.tables);
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| filter.matches(row)) {
                if let Value::Object(fields) = row {
                    fields.extend(patch.clone());
                }
                updated.push(row.clone());
            }
        }
        DataResponse::ok(Value::Array(updated))
    }

    async fn delete(&self, table: &str, filter: &Filter) -> DataResponse {
        if let Some(fault) = self.take_fault() {
            return DataResponse::err(fault);
        }
        let mut tables = lock(&self.tables);
        let mut removed = Vec::new();
        if let Some(rows) = tables.get_mut(table) {
            let (gone, kept): (Vec<Value>, Vec<Value>) =
                rows.drain(..).partition(|row| filter.matches(row));
            *rows = kept;
            removed = gone;
        }
        DataResponse::ok(Value::Array(removed))
    }
}

#[async_trait]
impl AuthService for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> DataResponse {
        if let Some(fault) = self.take_fault() {
            return DataResponse::err(fault);
        }
        let account = lock(&self.accounts).get(email).cloned();
        match account {
            Some(account) if account.password == password => {
                if let (Some(session), Some(id)) = (&self.session, account.user.get("id")) {
                    match id {
                        Value::String(id) => session.sign_in(id.as_str()),
                        other => session.sign_in(other.to_string()),
                    }
                }
                DataResponse::ok(account.user)
            }
            _ => DataResponse::err(
                ServiceError::new("Invalid login credentials").with_code("invalid_credentials"),
            ),
        }
    }

    async fn sign_up(&self, email: &str, password: &str, role: &str) -> DataResponse {
        if let Some(fault) = self.take_fault() {
            return DataResponse::err(fault);
        }
        let mut accounts = lock(&self.accounts);
        if accounts.contains_key(email) {
            return DataResponse::err(
                ServiceError::new("User already registered").with_code("user_already_exists"),
            );
        }
        let user = json!({
            "id": format!("user-{}", self.assign_id()),
            "email": email,
            "role": role,
        });
        accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        DataResponse::ok(user)
    }

    async fn sign_out(&self) -> DataResponse {
        if let Some(fault) = self.take_fault() {
            return DataResponse::err(fault);
        }
        if let Some(session) = &self.session {
            session.sign_out();
        }
        DataResponse::default()
    }
}
