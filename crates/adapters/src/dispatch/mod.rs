// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executor dispatch adapters

mod abaco;
mod noop;

pub use abaco::AbacoDispatch;
pub use noop::NoOpDispatch;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{DispatchCall, FakeDispatch};

use async_trait::async_trait;
use nbs_core::{ActorId, ActorMessage};
use thiserror::Error;

/// Errors from sending a command to the executor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("executor rejected message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Acknowledgement from the executor's messaging endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub execution_id: Option<String>,
}

/// Adapter for delivering commands to the out-of-process executor.
///
/// Delivery is fire-and-forget: a receipt only means the message was
/// queued, and the outcome is observed through the session record.
#[async_trait]
pub trait ExecutorDispatch: Clone + Send + Sync + 'static {
    async fn send(
        &self,
        actor: &ActorId,
        message: &ActorMessage,
    ) -> Result<DispatchReceipt, DispatchError>;
}
