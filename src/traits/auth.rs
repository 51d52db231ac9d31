// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::traits::DataResponse;

/// Email/password authentication.
///
/// A successful `sign_in` or `sign_up` returns the user record as `data`.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> DataResponse;

    async fn sign_up(&self, email: &str, password: &str, role: &str) -> DataResponse;

    async fn sign_out(&self) -> DataResponse;
}
