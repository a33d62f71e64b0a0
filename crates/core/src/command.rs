// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commands sent to the out-of-process executor.
//!
//! The wire shape is the message body the actor receives:
//! `{"tenant", "instance", "username", "command", "params", ...}` where
//! `command` is `START`, `STOP` or `UPDATE`.

use crate::key::SessionKey;
use crate::status::Endpoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters of a START command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartParams {
    pub name: String,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub image: String,
    #[serde(default)]
    pub volume_mounts: Vec<String>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mem_limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopParams {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateParams {
    pub name: String,
    pub ip: String,
    pub port: u16,
}

/// Intent for the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "params", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutorCommand {
    Start(StartParams),
    Stop(StopParams),
    Update(UpdateParams),
}

impl ExecutorCommand {
    pub fn stop(key: &SessionKey) -> Self {
        ExecutorCommand::Stop(StopParams {
            name: key.server_name(),
        })
    }

    pub fn update(key: &SessionKey, endpoint: &Endpoint) -> Self {
        ExecutorCommand::Update(UpdateParams {
            name: key.server_name(),
            ip: endpoint.host.clone(),
            port: endpoint.port,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExecutorCommand::Start(_) => "START",
            ExecutorCommand::Stop(_) => "STOP",
            ExecutorCommand::Update(_) => "UPDATE",
        }
    }
}

/// Credentials forwarded so the actor can open its own metadata client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorCredentials {
    pub service_token: String,
    pub agave_base_url: String,
}

/// Message body delivered to the actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorMessage {
    pub tenant: String,
    pub instance: String,
    pub username: String,
    #[serde(flatten)]
    pub command: ExecutorCommand,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<ActorCredentials>,
}

impl ActorMessage {
    pub fn new(key: &SessionKey, command: ExecutorCommand) -> Self {
        Self {
            tenant: key.tenant().to_string(),
            instance: key.instance().to_string(),
            username: key.username().to_string(),
            command,
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Option<ActorCredentials>) -> Self {
        self.credentials = credentials;
        self
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
