// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metadata store adapters

mod agave;

pub use agave::AgaveMetaStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeMetadataStore, StoreCall};

use async_trait::async_trait;
use nbs_core::RecordId;
use serde_json::Value;
use thiserror::Error;

/// Errors from metadata store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("metadata store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed store response: {0}")]
    Malformed(String),
}

/// A named JSON document held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    pub id: RecordId,
    pub name: String,
    pub value: Value,
}

/// Adapter for the shared, eventually-consistent metadata store
#[async_trait]
pub trait MetadataStore: Clone + Send + Sync + 'static {
    /// Look a record up by its unique name
    async fn get_record(&self, name: &str) -> Result<MetadataRecord, StoreError>;

    /// Create a record, granting read/write on it to `share_with`
    async fn create_record(
        &self,
        name: &str,
        value: &Value,
        share_with: Option<&str>,
    ) -> Result<MetadataRecord, StoreError>;

    /// Replace a record's value
    async fn update_record(
        &self,
        id: &RecordId,
        name: &str,
        value: &Value,
    ) -> Result<MetadataRecord, StoreError>;
}
