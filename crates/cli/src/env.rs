// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.
//!
//! Spawner settings are read by `nbs_engine::env`; only CLI concerns live here.

pub const LOG: &str = "NBS_LOG";

/// Default tracing filter when `NBS_LOG` is unset or empty.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Tracing filter directive for the stderr log.
pub fn log_filter() -> String {
    std::env::var(LOG)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
