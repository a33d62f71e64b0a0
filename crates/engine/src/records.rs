// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed access to session and tenant records.
//!
//! This is the boundary where store errors become [`RecordsError`]; nothing
//! above it sees transport details.

use crate::error::RecordsError;
use nbs_adapters::{MetadataRecord, MetadataStore, StoreError};
use nbs_core::{config_record_name, SessionKey, SessionRecord, TenantConfig, Transition};

/// Re-reads after a create conflict before giving up on a lagging store.
const CONFLICT_REFETCH_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct SessionRecords<M> {
    store: M,
    share_with: Option<String>,
}

impl<M: MetadataStore> SessionRecords<M> {
    /// `share_with` is granted READ_WRITE on every record this creates.
    pub fn new(store: M, share_with: Option<String>) -> Self {
        Self { store, share_with }
    }

    /// Read the record for `key`, creating it in `PENDING` if absent.
    pub async fn get_or_create(&self, key: &SessionKey) -> Result<SessionRecord, RecordsError> {
        let found = self.fetch_or_create(key).await?;
        parse(key, found)
    }

    async fn fetch_or_create(&self, key: &SessionKey) -> Result<MetadataRecord, RecordsError> {
        let name = key.record_name();
        match self.store.get_record(&name).await {
            Ok(found) => return Ok(found),
            Err(StoreError::NotFound(_)) => {}
            Err(e) => return Err(translate(&name, e)),
        }

        let initial = SessionRecord::initial_value(key).to_json();
        match self
            .store
            .create_record(&name, &initial, self.share_with.as_deref())
            .await
        {
            Ok(created) => {
                tracing::info!(%key, id = %created.id, "session record created");
                Ok(created)
            }
            Err(StoreError::Conflict(_)) => {
                tracing::debug!(%key, "lost create race, re-reading");
                self.refetch_after_conflict(key).await
            }
            Err(e) => Err(translate(&name, e)),
        }
    }

    async fn refetch_after_conflict(&self, key: &SessionKey) -> Result<MetadataRecord, RecordsError> {
        let name = key.record_name();
        for _ in 0..CONFLICT_REFETCH_ATTEMPTS {
            match self.store.get_record(&name).await {
                Ok(found) => return Ok(found),
                Err(StoreError::NotFound(_)) => continue,
                Err(e) => return Err(translate(&name, e)),
            }
        }
        Err(RecordsError::Unavailable(format!(
            "{name} exists but could not be read back"
        )))
    }

    /// Read the record for `key` without creating it.
    pub async fn load(&self, key: &SessionKey) -> Result<Option<SessionRecord>, RecordsError> {
        let name = key.record_name();
        match self.store.get_record(&name).await {
            Ok(found) => parse(key, found).map(Some),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(translate(&name, e)),
        }
    }

    /// Apply `transition` to the current record and write it back.
    ///
    /// An existing value that no longer parses is replaced rather than refused.
    pub async fn apply(
        &self,
        key: &SessionKey,
        transition: Transition,
    ) -> Result<SessionRecord, RecordsError> {
        let found = self.fetch_or_create(key).await?;
        let current = match SessionRecord::from_json(found.id.clone(), key.clone(), &found.value) {
            Ok(record) => record,
            Err(e) => {
                // The write replaces the whole value, so start from a clean record
                tracing::warn!(%key, id = %found.id, error = %e, "overwriting unreadable session record");
                SessionRecord::initial(found.id, key.clone())
            }
        };
        let next = transition.apply(&current);
        let name = key.record_name();
        self.store
            .update_record(&next.id, &name, &next.to_json())
            .await
            .map_err(|e| translate(&name, e))?;
        tracing::info!(%key, from = %current.status, to = %next.status, "session record updated");
        Ok(next)
    }

    /// Read the tenant bundle for `tenant`/`instance`.
    pub async fn load_tenant_config(
        &self,
        tenant: &str,
        instance: &str,
    ) -> Result<TenantConfig, RecordsError> {
        let name = config_record_name(tenant, instance);
        let record = match self.store.get_record(&name).await {
            Ok(record) => record,
            Err(StoreError::NotFound(_)) => return Err(RecordsError::TenantConfigMissing(name)),
            Err(e) => return Err(translate(&name, e)),
        };
        TenantConfig::from_json(&record.value).map_err(|e| RecordsError::Malformed {
            name,
            reason: e.to_string(),
        })
    }
}

fn parse(key: &SessionKey, record: MetadataRecord) -> Result<SessionRecord, RecordsError> {
    SessionRecord::from_json(record.id, key.clone(), &record.value).map_err(|e| {
        RecordsError::Malformed {
            name: key.record_name(),
            reason: e.to_string(),
        }
    })
}

fn translate(name: &str, err: StoreError) -> RecordsError {
    match err {
        StoreError::Malformed(reason) => RecordsError::Malformed {
            name: name.to_string(),
            reason,
        },
        StoreError::Unavailable(reason) => RecordsError::Unavailable(reason),
        // Only reachable when a record vanished or collided mid-operation
        other => RecordsError::Unavailable(other.to_string()),
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
