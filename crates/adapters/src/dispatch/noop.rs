// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op dispatch for running without an executor

use super::{DispatchError, DispatchReceipt, ExecutorDispatch};
use async_trait::async_trait;
use nbs_core::{ActorId, ActorMessage};

/// Dispatch that drops every command.
///
/// Used when actor calls are switched off; some other process is expected
/// to drive the session record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpDispatch;

impl NoOpDispatch {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExecutorDispatch for NoOpDispatch {
    async fn send(
        &self,
        actor: &ActorId,
        message: &ActorMessage,
    ) -> Result<DispatchReceipt, DispatchError> {
        tracing::debug!(%actor, command = message.command.name(), "actor calls disabled, not sending");
        Ok(DispatchReceipt::default())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
