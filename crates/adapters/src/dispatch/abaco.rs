// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Abaco actor messaging

use super::{DispatchError, DispatchReceipt, ExecutorDispatch};
use crate::agave::{AgaveClient, AgaveError};
use async_trait::async_trait;
use nbs_core::{ActorId, ActorMessage};
use serde_json::{json, Value};

/// Sends commands as messages to an Abaco actor.
#[derive(Clone)]
pub struct AbacoDispatch {
    client: AgaveClient,
}

impl AbacoDispatch {
    pub fn new(client: AgaveClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExecutorDispatch for AbacoDispatch {
    async fn send(
        &self,
        actor: &ActorId,
        message: &ActorMessage,
    ) -> Result<DispatchReceipt, DispatchError> {
        let body = json!({ "message": message });
        let path = format!("actors/v2/{actor}/messages");
        match self.client.post(&path, &body).await {
            Ok(result) => Ok(DispatchReceipt {
                execution_id: result
                    .get("executionId")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            // Message was accepted; only the acknowledgement is unreadable
            Err(AgaveError::Decode(_)) => Ok(DispatchReceipt::default()),
            Err(AgaveError::Status { status, body }) => {
                Err(DispatchError::Rejected { status, body })
            }
            Err(AgaveError::Transport(reason)) => Err(DispatchError::SendFailed(reason)),
        }
    }
}

#[cfg(test)]
#[path = "abaco_tests.rs"]
mod tests;
