// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::RwLock;

/// Resolves the acting principal for a log entry.
///
/// Resolution is best-effort: `None` simply leaves `userId` off the entry.
pub trait PrincipalProvider: Send + Sync {
    fn current_principal(&self) -> Option<String>;
}

impl<F> PrincipalProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn current_principal(&self) -> Option<String> {
        self()
    }
}

/// Current signed-in user, updated by the auth layer on sign in and sign out.
#[derive(Debug, Default)]
pub struct SessionPrincipal {
    user_id: RwLock<Option<String>>,
}

impl SessionPrincipal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, user_id: impl Into<String>) {
        let mut guard = self.user_id.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(user_id.into());
    }

    pub fn sign_out(&self) {
        let mut guard = self.user_id.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

impl PrincipalProvider for SessionPrincipal {
    fn current_principal(&self) -> Option<String> {
        self.user_id
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }
}
