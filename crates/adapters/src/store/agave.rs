// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agave metadata v2 store

use super::{MetadataRecord, MetadataStore, StoreError};
use crate::agave::{AgaveClient, AgaveError};
use async_trait::async_trait;
use nbs_core::RecordId;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};

const DATA_PATH: &str = "meta/v2/data";

#[derive(Deserialize)]
struct WireRecord {
    uuid: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: Value,
}

impl From<WireRecord> for MetadataRecord {
    fn from(wire: WireRecord) -> Self {
        MetadataRecord {
            id: RecordId::new(wire.uuid),
            name: wire.name,
            value: wire.value,
        }
    }
}

/// Metadata store backed by the Agave `meta/v2` API.
#[derive(Clone)]
pub struct AgaveMetaStore {
    client: AgaveClient,
}

impl AgaveMetaStore {
    pub fn new(client: AgaveClient) -> Self {
        Self { client }
    }

    async fn share(&self, id: &RecordId, principal: &str) -> Result<(), StoreError> {
        let path = format!("{DATA_PATH}/{id}/pems/{principal}");
        self.client
            .post(&path, &json!({"permission": "READ_WRITE"}))
            .await
            .map(|_| ())
            .map_err(|e| store_error(id.as_str(), e))
    }
}

fn store_error(name: &str, err: AgaveError) -> StoreError {
    match err.status() {
        Some(StatusCode::NOT_FOUND) => StoreError::NotFound(name.to_string()),
        Some(StatusCode::CONFLICT) => StoreError::Conflict(name.to_string()),
        _ => match err {
            AgaveError::Decode(reason) => StoreError::Malformed(reason),
            other => StoreError::Unavailable(other.to_string()),
        },
    }
}

fn parse_record(value: Value) -> Result<MetadataRecord, StoreError> {
    WireRecord::deserialize(value)
        .map(MetadataRecord::from)
        .map_err(|e| StoreError::Malformed(e.to_string()))
}

#[async_trait]
impl MetadataStore for AgaveMetaStore {
    async fn get_record(&self, name: &str) -> Result<MetadataRecord, StoreError> {
        let query = json!({ "name": name }).to_string();
        let listed = self
            .client
            .get(DATA_PATH, &[("q", query.as_str())])
            .await
            .map_err(|e| store_error(name, e))?;

        let items: Vec<WireRecord> = match listed {
            Value::Null => Vec::new(),
            other => Vec::deserialize(other).map_err(|e| StoreError::Malformed(e.to_string()))?,
        };
        // Duplicate names converge on the first listed record
        items
            .into_iter()
            .find(|r| r.name == name)
            .map(MetadataRecord::from)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn create_record(
        &self,
        name: &str,
        value: &Value,
        share_with: Option<&str>,
    ) -> Result<MetadataRecord, StoreError> {
        let created = self
            .client
            .post(DATA_PATH, &json!({ "name": name, "value": value }))
            .await
            .map_err(|e| store_error(name, e))?;
        let record = parse_record(created)?;

        if let Some(principal) = share_with {
            // The executor writes to the record as `principal`
            self.share(&record.id, principal).await.map_err(|e| {
                StoreError::Unavailable(format!(
                    "created {name} ({}) but could not share it with {principal}: {e}",
                    record.id
                ))
            })?;
        }
        Ok(record)
    }

    async fn update_record(
        &self,
        id: &RecordId,
        name: &str,
        value: &Value,
    ) -> Result<MetadataRecord, StoreError> {
        let path = format!("{DATA_PATH}/{id}");
        let updated = self
            .client
            .post(&path, &json!({ "name": name, "value": value }))
            .await
            .map_err(|e| store_error(name, e))?;
        match updated {
            // Some deployments answer updates with an empty result
            Value::Null => Ok(MetadataRecord {
                id: id.clone(),
                name: name.to_string(),
                value: value.clone(),
            }),
            other => parse_record(other),
        }
    }
}

#[cfg(test)]
#[path = "agave_tests.rs"]
mod tests;
