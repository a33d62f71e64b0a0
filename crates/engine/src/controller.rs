// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle controller: the operations a hub calls on its spawner.
//!
//! Intent is always recorded before it is dispatched: `start` writes
//! `SUBMITTED` and `stop` writes `STOP_SUBMITTED` before messaging the
//! executor, so an executor that answers quickly can never have its
//! `READY`/`STOPPED` overwritten by our own late write.

use crate::error::LifecycleError;
use crate::launch::{build_start_params, StartRequest};
use crate::poller::{PollPolicy, Reconciler};
use crate::records::SessionRecords;
use nbs_adapters::{DispatchReceipt, ExecutorDispatch, MetadataStore};
use nbs_core::{
    ActorCredentials, ActorId, ActorMessage, Endpoint, ExecutorCommand, SessionKey,
    SessionRecord, SessionStatus, TenantConfig, Transition,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Tenant configurations loaded by the host, keyed by (tenant, instance).
#[derive(Debug, Clone, Default)]
pub struct TenantConfigs {
    configs: HashMap<(String, String), TenantConfig>,
}

impl TenantConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tenant: &str, instance: &str, config: TenantConfig) {
        self.configs
            .insert((tenant.to_string(), instance.to_string()), config);
    }

    pub fn with(mut self, tenant: &str, instance: &str, config: TenantConfig) -> Self {
        self.insert(tenant, instance, config);
        self
    }

    pub fn get(&self, tenant: &str, instance: &str) -> Option<&TenantConfig> {
        self.configs
            .get(&(tenant.to_string(), instance.to_string()))
    }
}

/// Everything the controller needs besides its adapters.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub actor: ActorId,
    pub hub_api_url: String,
    pub credentials: Option<ActorCredentials>,
    /// Principal granted read/write on newly created session records
    pub share_with: Option<String>,
    pub policy: PollPolicy,
    pub tenant_configs: TenantConfigs,
}

/// Answer to the hub's liveness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Running,
    /// The hub's convention for "not running, exit status unknown" is 0.
    NotRunning { exit_status: i32 },
}

impl PollStatus {
    pub const UNKNOWN_EXIT: PollStatus = PollStatus::NotRunning { exit_status: 0 };

    pub fn is_running(self) -> bool {
        matches!(self, PollStatus::Running)
    }
}

#[derive(Clone)]
pub struct LifecycleController<M, D> {
    records: SessionRecords<M>,
    reconciler: Reconciler<M>,
    dispatch: D,
    settings: Arc<ControllerSettings>,
}

impl<M: MetadataStore, D: ExecutorDispatch> LifecycleController<M, D> {
    pub fn new(store: M, dispatch: D, settings: ControllerSettings) -> Self {
        let records = SessionRecords::new(store, settings.share_with.clone());
        let reconciler = Reconciler::new(records.clone(), settings.policy);
        Self {
            records,
            reconciler,
            dispatch,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn records(&self) -> &SessionRecords<M> {
        &self.records
    }

    /// Launch a server for `key` and wait until it is reachable.
    pub async fn start(
        &self,
        key: &SessionKey,
        request: &StartRequest,
        cancel: &CancellationToken,
    ) -> Result<Endpoint, LifecycleError> {
        let config = self
            .settings
            .tenant_configs
            .get(key.tenant(), key.instance())
            .ok_or_else(|| LifecycleError::UnknownTenant {
                tenant: key.tenant().to_string(),
                instance: key.instance().to_string(),
            })?;
        let params = build_start_params(key, config, request, &self.settings.hub_api_url)?;
        tracing::info!(%key, image = params.image.as_str(), "starting notebook server");

        self.records.apply(key, Transition::Submitted).await?;
        self.send(key, ExecutorCommand::Start(params)).await;

        let record = self
            .reconciler
            .wait_for(key, SessionStatus::Ready, cancel)
            .await
            .map_err(|source| LifecycleError::StartFailed { source })?;
        let endpoint = record
            .endpoint
            .ok_or_else(|| LifecycleError::MalformedRecord {
                name: key.record_name(),
                reason: "READY without endpoint".to_string(),
            })?;
        tracing::info!(%key, %endpoint, "notebook server ready");
        Ok(endpoint)
    }

    /// Ask the executor to stop the server and wait for confirmation.
    ///
    /// Stopping an already stopped session re-sends the command.
    pub async fn stop(
        &self,
        key: &SessionKey,
        cancel: &CancellationToken,
    ) -> Result<SessionStatus, LifecycleError> {
        tracing::info!(%key, "stopping notebook server");
        self.records.apply(key, Transition::StopSubmitted).await?;
        self.send(key, ExecutorCommand::stop(key)).await;

        let record = self
            .reconciler
            .wait_for(key, SessionStatus::Stopped, cancel)
            .await
            .map_err(|source| LifecycleError::StopFailed { source })?;
        tracing::info!(%key, "notebook server stopped");
        Ok(record.status)
    }

    /// Single read of the session record. Never waits and never fails.
    pub async fn poll(&self, key: &SessionKey) -> PollStatus {
        match self.records.load(key).await {
            Ok(Some(record)) if record.status.is_running() => PollStatus::Running,
            Ok(Some(record)) => {
                tracing::debug!(%key, status = %record.status, "not running");
                PollStatus::UNKNOWN_EXIT
            }
            Ok(None) => {
                tracing::debug!(%key, "no session record");
                PollStatus::UNKNOWN_EXIT
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "poll could not read session record");
                PollStatus::UNKNOWN_EXIT
            }
        }
    }

    /// Tell the executor a server moved. Best-effort like every dispatch.
    pub async fn update(&self, key: &SessionKey, endpoint: &Endpoint) -> Option<DispatchReceipt> {
        self.send(key, ExecutorCommand::update(key, endpoint)).await
    }

    /// Session state lives in the metadata store; the hub's copy is ignored.
    pub fn load_state(&self, _state: &serde_json::Value) {}

    pub fn get_state(&self) -> serde_json::Value {
        serde_json::Value::Object(serde_json::Map::new())
    }

    /// Executor-side: the server is reachable at `endpoint`.
    pub async fn report_ready(
        &self,
        key: &SessionKey,
        endpoint: Endpoint,
        url: Option<String>,
    ) -> Result<SessionRecord, LifecycleError> {
        let transition = Transition::Ready { endpoint, url };
        Ok(self.records.apply(key, transition).await?)
    }

    /// Executor-side: the server is gone.
    pub async fn report_stopped(&self, key: &SessionKey) -> Result<SessionRecord, LifecycleError> {
        Ok(self.records.apply(key, Transition::Stopped).await?)
    }

    /// Executor-side: the launch or the server failed.
    pub async fn report_error(
        &self,
        key: &SessionKey,
        detail: &str,
    ) -> Result<SessionRecord, LifecycleError> {
        Ok(self.records.apply(key, Transition::error(detail)).await?)
    }

    async fn send(&self, key: &SessionKey, command: ExecutorCommand) -> Option<DispatchReceipt> {
        let name = command.name();
        let message =
            ActorMessage::new(key, command).with_credentials(self.settings.credentials.clone());
        match self.dispatch.send(&self.settings.actor, &message).await {
            Ok(receipt) => Some(receipt),
            Err(e) => {
                tracing::error!(%key, command = name, error = %e, "dispatch failed, still polling");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
