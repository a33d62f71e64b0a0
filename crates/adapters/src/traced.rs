// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::dispatch::{DispatchError, DispatchReceipt, ExecutorDispatch};
use crate::store::{MetadataRecord, MetadataStore, StoreError};
use async_trait::async_trait;
use nbs_core::{ActorId, ActorMessage, RecordId};
use serde_json::Value;
use tracing::Instrument;

fn status_of(value: &Value) -> &str {
    value.get("status").and_then(Value::as_str).unwrap_or("-")
}

/// Wrapper that adds tracing to any MetadataStore
#[derive(Clone)]
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: MetadataStore> MetadataStore for TracedStore<S> {
    async fn get_record(&self, name: &str) -> Result<MetadataRecord, StoreError> {
        let start = std::time::Instant::now();
        let result = self.inner.get_record(name).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info_span!("store.get", name).in_scope(|| match &result {
            Ok(r) => tracing::debug!(id = %r.id, status = status_of(&r.value), elapsed_ms, "read"),
            Err(StoreError::NotFound(_)) => tracing::debug!(elapsed_ms, "not found"),
            Err(e) => tracing::warn!(elapsed_ms, error = %e, "read failed"),
        });
        result
    }

    async fn create_record(
        &self,
        name: &str,
        value: &Value,
        share_with: Option<&str>,
    ) -> Result<MetadataRecord, StoreError> {
        async {
            tracing::info!(status = status_of(value), "creating");
            let start = std::time::Instant::now();
            let result = self.inner.create_record(name, value, share_with).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(r) => tracing::info!(id = %r.id, elapsed_ms, "record created"),
                Err(StoreError::Conflict(_)) => {
                    tracing::info!(elapsed_ms, "record created concurrently")
                }
                Err(e) => tracing::error!(elapsed_ms, error = %e, "create failed"),
            }
            result
        }
        .instrument(tracing::info_span!("store.create", name, share_with))
        .await
    }

    async fn update_record(
        &self,
        id: &RecordId,
        name: &str,
        value: &Value,
    ) -> Result<MetadataRecord, StoreError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.update_record(id, name, value).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => tracing::info!(status = status_of(value), elapsed_ms, "record updated"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "update failed"),
            }
            result
        }
        .instrument(tracing::info_span!("store.update", %id, name))
        .await
    }
}

/// Wrapper that adds tracing to any ExecutorDispatch
#[derive(Clone)]
pub struct TracedDispatch<D> {
    inner: D,
}

impl<D> TracedDispatch<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<D: ExecutorDispatch> ExecutorDispatch for TracedDispatch<D> {
    async fn send(
        &self,
        actor: &ActorId,
        message: &ActorMessage,
    ) -> Result<DispatchReceipt, DispatchError> {
        let span = tracing::info_span!(
            "dispatch.send",
            %actor,
            command = message.command.name(),
            user = message.username.as_str(),
        );
        async {
            tracing::info!("sending");
            let start = std::time::Instant::now();
            let result = self.inner.send(actor, message).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(r) => tracing::info!(
                    execution_id = r.execution_id.as_deref().unwrap_or("-"),
                    elapsed_ms,
                    "message queued"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "send failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
