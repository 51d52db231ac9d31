// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::config::consts::ENVIRONMENT_VARIABLE;

/// Development or production mode.
///
/// Development mirrors every log entry to the console; production forwards
/// ERROR entries to monitoring instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Read the mode from `HOME_SOLDIER_ENV`. Only `development` selects
    /// development mode; anything else, or no value, is production.
    pub fn from_env() -> Self {
        Self::parse(std::env::var(ENVIRONMENT_VARIABLE).ok().as_deref())
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("development") => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}
