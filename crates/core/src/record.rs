// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session record: one per (tenant, instance, username).
//!
//! [`RecordValue`] is the JSON document stored in the metadata service and
//! shared with the executor; [`SessionRecord`] is the validated view the
//! engine works with. Converting between them enforces that an endpoint is
//! present if and only if the status is `READY`.

use crate::id::RecordId;
use crate::key::SessionKey;
use crate::lenient;
use crate::status::{Endpoint, SessionStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Detail recorded when an executor reports `ERROR` without one.
pub const UNKNOWN_ERROR_DETAIL: &str = "unknown error";

/// Errors interpreting a stored record value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("malformed record value: {0}")]
    Malformed(String),
    #[error("unknown session status: {0}")]
    UnknownStatus(String),
    #[error("record is READY but has no endpoint")]
    ReadyWithoutEndpoint,
}

/// Stored document shape, as written by both the spawner and the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub instance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub status: String,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_num")]
    pub port: Option<u16>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Validated session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: RecordId,
    pub key: SessionKey,
    pub status: SessionStatus,
    pub endpoint: Option<Endpoint>,
    pub url: Option<String>,
    pub error_detail: Option<String>,
}

impl SessionRecord {
    /// Value written when a record is first created.
    pub fn initial_value(key: &SessionKey) -> RecordValue {
        RecordValue {
            name: key.record_name(),
            tenant: key.tenant().to_string(),
            instance: key.instance().to_string(),
            username: Some(key.username().to_string()),
            status: SessionStatus::Pending.as_str().to_string(),
            ip: None,
            port: None,
            url: None,
            error: None,
        }
    }

    /// `PENDING` record under an existing store id.
    pub fn initial(id: RecordId, key: SessionKey) -> Self {
        Self {
            id,
            key,
            status: SessionStatus::Pending,
            endpoint: None,
            url: None,
            error_detail: None,
        }
    }

    /// Interpret a stored value for `key`.
    pub fn from_json(
        id: RecordId,
        key: SessionKey,
        value: &serde_json::Value,
    ) -> Result<Self, RecordError> {
        let value = RecordValue::deserialize(value)
            .map_err(|e| RecordError::Malformed(e.to_string()))?;
        Self::from_value(id, key, value)
    }

    pub fn from_value(
        id: RecordId,
        key: SessionKey,
        value: RecordValue,
    ) -> Result<Self, RecordError> {
        let status: SessionStatus = value
            .status
            .parse()
            .map_err(|_| RecordError::UnknownStatus(value.status.clone()))?;

        let endpoint = match status {
            SessionStatus::Ready => match (value.ip, value.port) {
                (Some(host), Some(port)) if !host.is_empty() => Some(Endpoint { host, port }),
                _ => return Err(RecordError::ReadyWithoutEndpoint),
            },
            _ => None,
        };

        let error_detail = match status {
            SessionStatus::Error => Some(
                value
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR_DETAIL.to_string()),
            ),
            _ => None,
        };

        Ok(Self {
            id,
            key,
            status,
            endpoint,
            url: value.url.filter(|u| !u.is_empty()),
            error_detail,
        })
    }

    /// Document to write back to the store.
    pub fn to_value(&self) -> RecordValue {
        RecordValue {
            name: self.key.record_name(),
            tenant: self.key.tenant().to_string(),
            instance: self.key.instance().to_string(),
            username: Some(self.key.username().to_string()),
            status: self.status.as_str().to_string(),
            ip: self.endpoint.as_ref().map(|e| e.host.clone()),
            port: self.endpoint.as_ref().map(|e| e.port),
            url: self.url.clone(),
            error: self.error_detail.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.to_value().to_json()
    }
}

impl RecordValue {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
