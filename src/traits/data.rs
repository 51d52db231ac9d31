// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// `{ data, error }` pair returned by every backend call.
///
/// Backends report failures in-band; [`DataResponse::into_result`] turns the
/// pair into a `Result` so a unit of work can fail with the backend error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataResponse {
    pub data: Option<Value>,
    pub error: Option<ServiceError>,
}

impl DataResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ServiceError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// `Err` when the backend reported an error, otherwise the data (`Null` if none).
    pub fn into_result(self) -> Result<Value, ServiceError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data.unwrap_or(Value::Null)),
        }
    }
}

/// Equality filter over row columns. An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Map<String, Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `Filter::new().eq(column, value)`.
    pub fn by(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().eq(column, value)
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(column.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, row: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(column, expected)| row.get(column) == Some(expected))
    }
}

/// Table-oriented data access.
#[async_trait]
pub trait DataService: Send + Sync {
    async fn select(&self, table: &str, filter: &Filter) -> DataResponse;

    async fn insert(&self, table: &str, row: Value) -> DataResponse;

    async fn update(&self, table: &str, filter: &Filter, patch: Value) -> DataResponse;

    async fn delete(&self, table: &str, filter: &Filter) -> DataResponse;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn into_result_prefers_the_error() {
        let response = DataResponse {
            data: Some(json!([1])),
            error: Some(ServiceError::new("row level security")),
        };
        assert_eq!(
            response.into_result().unwrap_err().message,
            "row level security"
        );
        assert_eq!(DataResponse::default().into_result(), Ok(Value::Null));
    }

    #[test]
    fn filter_matches_on_every_condition() {
        let row = json!({"id": 3, "status": "pending", "points": 10});

        assert!(Filter::new().matches(&row));
        assert!(Filter::by("status", "pending").matches(&row));
        assert!(Filter::by("status", "pending").eq("points", 10).matches(&row));
        assert!(!Filter::by("status", "pending").eq("points", 5).matches(&row));
        assert!(!Filter::by("missing", Value::Null).matches(&row));
    }
}
