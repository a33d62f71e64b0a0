// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake metadata store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MetadataRecord, MetadataStore, StoreError};
use async_trait::async_trait;
use nbs_core::RecordId;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Recorded store call
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Get {
        name: String,
    },
    Create {
        name: String,
        value: Value,
        share_with: Option<String>,
    },
    Update {
        id: RecordId,
        name: String,
        value: Value,
    },
}

struct FakeStoreState {
    records: Vec<MetadataRecord>,
    shares: Vec<(RecordId, String)>,
    calls: Vec<StoreCall>,
    next_id: u64,
    unavailable: Option<String>,
    stale_reads: usize,
    hang_reads: bool,
}

/// In-memory metadata store.
///
/// Names are unique: a second create under the same name fails with
/// [`StoreError::Conflict`], the way a store with a uniqueness constraint
/// would answer the create race.
#[derive(Clone)]
pub struct FakeMetadataStore {
    inner: Arc<Mutex<FakeStoreState>>,
}

impl Default for FakeMetadataStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeStoreState {
                records: Vec::new(),
                shares: Vec::new(),
                calls: Vec::new(),
                next_id: 0,
                unavailable: None,
                stale_reads: 0,
                hang_reads: false,
            })),
        }
    }
}

impl FakeMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().calls.clone()
    }

    /// Count of `update_record` calls so far
    pub fn update_count(&self) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, StoreCall::Update { .. }))
            .count()
    }

    /// Insert a record directly, bypassing call recording
    pub fn seed(&self, name: &str, value: Value) -> RecordId {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = RecordId::new(format!("fake-{}", inner.next_id));
        inner.records.push(MetadataRecord {
            id: id.clone(),
            name: name.to_string(),
            value,
        });
        id
    }

    /// Overwrite a record's value directly, as another writer would
    pub fn set_value(&self, name: &str, value: Value) -> bool {
        let mut inner = self.inner.lock();
        match inner.records.iter_mut().find(|r| r.name == name) {
            Some(record) => {
                record.value = value;
                true
            }
            None => false,
        }
    }

    /// Current value stored under `name`
    pub fn value(&self, name: &str) -> Option<Value> {
        self.inner
            .lock()
            .records
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.value.clone())
    }

    /// Number of records stored under `name`
    pub fn record_count(&self, name: &str) -> usize {
        self.inner
            .lock()
            .records
            .iter()
            .filter(|r| r.name == name)
            .count()
    }

    /// Principals each record has been shared with
    pub fn shares(&self) -> Vec<(RecordId, String)> {
        self.inner.lock().shares.clone()
    }

    /// Fail every call with `Unavailable` until cleared
    pub fn set_unavailable(&self, reason: Option<&str>) {
        self.inner.lock().unavailable = reason.map(str::to_string);
    }

    /// Answer the next `n` reads with `NotFound` even if the record exists
    pub fn stale_reads(&self, n: usize) {
        self.inner.lock().stale_reads = n;
    }

    /// Never answer reads while set, like a store that accepts the
    /// connection and then stalls
    pub fn hang_reads(&self, hang: bool) {
        self.inner.lock().hang_reads = hang;
    }
}

#[async_trait]
impl MetadataStore for FakeMetadataStore {
    async fn get_record(&self, name: &str) -> Result<MetadataRecord, StoreError> {
        let hang = {
            let mut inner = self.inner.lock();
            inner.calls.push(StoreCall::Get {
                name: name.to_string(),
            });
            inner.hang_reads
        };
        if hang {
            std::future::pending::<()>().await;
        }

        let mut inner = self.inner.lock();

        if let Some(reason) = &inner.unavailable {
            return Err(StoreError::Unavailable(reason.clone()));
        }
        if inner.stale_reads > 0 {
            inner.stale_reads -= 1;
            return Err(StoreError::NotFound(name.to_string()));
        }
        inner
            .records
            .iter()
            .find(|r| r.name == name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn create_record(
        &self,
        name: &str,
        value: &Value,
        share_with: Option<&str>,
    ) -> Result<MetadataRecord, StoreError> {
        let mut inner = self.inner.lock();
        inner.calls.push(StoreCall::Create {
            name: name.to_string(),
            value: value.clone(),
            share_with: share_with.map(str::to_string),
        });

        if let Some(reason) = &inner.unavailable {
            return Err(StoreError::Unavailable(reason.clone()));
        }
        if inner.records.iter().any(|r| r.name == name) {
            return Err(StoreError::Conflict(name.to_string()));
        }

        inner.next_id += 1;
        let record = MetadataRecord {
            id: RecordId::new(format!("fake-{}", inner.next_id)),
            name: name.to_string(),
            value: value.clone(),
        };
        if let Some(principal) = share_with {
            inner.shares.push((record.id.clone(), principal.to_string()));
        }
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        id: &RecordId,
        name: &str,
        value: &Value,
    ) -> Result<MetadataRecord, StoreError> {
        let mut inner = self.inner.lock();
        inner.calls.push(StoreCall::Update {
            id: id.clone(),
            name: name.to_string(),
            value: value.clone(),
        });

        if let Some(reason) = &inner.unavailable {
            return Err(StoreError::Unavailable(reason.clone()));
        }
        match inner.records.iter_mut().find(|r| &r.id == id) {
            Some(record) => {
                record.value = value.clone();
                Ok(record.clone())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
