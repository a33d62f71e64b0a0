// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the lifecycle engine

use crate::launch::LaunchError;
use nbs_core::SessionStatus;
use std::time::Duration;
use thiserror::Error;

/// Errors reading or writing session and tenant records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordsError {
    #[error("metadata store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record {name}: {reason}")]
    Malformed { name: String, reason: String },
    #[error("tenant config not found: {0}")]
    TenantConfigMissing(String),
}

/// Why waiting for a target status ended without reaching it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitError {
    #[error("timed out waiting for {target} after {attempts} attempts ({}s)", .elapsed.as_secs())]
    Timeout {
        target: SessionStatus,
        attempts: u32,
        elapsed: Duration,
    },
    #[error("session failed: {0}")]
    SessionError(String),
    #[error("cancelled")]
    Cancelled,
}

/// Errors surfaced to the host by the lifecycle controller
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("start failed: {source}")]
    StartFailed {
        #[source]
        source: WaitError,
    },
    #[error("stop failed: {source}")]
    StopFailed {
        #[source]
        source: WaitError,
    },
    #[error("metadata store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("malformed record {name}: {reason}")]
    MalformedRecord { name: String, reason: String },
    #[error("no configuration loaded for tenant {tenant} instance {instance}")]
    UnknownTenant { tenant: String, instance: String },
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

impl From<RecordsError> for LifecycleError {
    fn from(err: RecordsError) -> Self {
        match err {
            RecordsError::Unavailable(reason) => LifecycleError::StoreUnavailable(reason),
            RecordsError::Malformed { name, reason } => {
                LifecycleError::MalformedRecord { name, reason }
            }
            RecordsError::TenantConfigMissing(name) => LifecycleError::StoreUnavailable(format!(
                "tenant config {name} not found"
            )),
        }
    }
}
