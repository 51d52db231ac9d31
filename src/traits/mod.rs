// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod auth;
pub mod data;

pub use auth::AuthService;
pub use data::{DataResponse, DataService, Filter};
