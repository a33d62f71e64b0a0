// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for spawner configuration.
//!
//! Values are returned raw; [`crate::config`] owns parsing and defaults.

pub const TENANT: &str = "TENANT";
pub const INSTANCE: &str = "INSTANCE";
pub const ACTOR_ID: &str = "ACTOR_ID";
pub const AGAVE_BASE_URL: &str = "AGAVE_BASE_URL";
pub const AGAVE_SERVICE_TOKEN: &str = "AGAVE_SERVICE_TOKEN";
pub const AGAVE_SERVICE_ACCOUNT: &str = "AGAVE_SERVICE_ACCOUNT";
pub const HUB_IP: &str = "HUB_IP";
pub const HUB_PORT: &str = "HUB_PORT";
pub const CALL_ACTOR: &str = "CALL_ACTOR";
pub const POLL_INTERVAL_MS: &str = "NBS_POLL_INTERVAL_MS";
pub const START_TIMEOUT_SECS: &str = "NBS_START_TIMEOUT_SECS";
pub const MAX_POLL_ATTEMPTS: &str = "NBS_MAX_POLL_ATTEMPTS";
pub const CONFIG_PATH: &str = "NBS_CONFIG";

/// Non-empty value of `name` from the process environment.
pub fn var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
