// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires the loaded spawner config to the Agave adapters.

use anyhow::{Context, Result};
use nbs_adapters::{
    AbacoDispatch, AgaveClient, AgaveMetaStore, ExecutorDispatch, TracedDispatch, TracedStore,
};
use nbs_engine::{
    ControllerSettings, LifecycleController, SessionRecords, SpawnerConfig, TenantConfigs,
};

use crate::commands::session::Scope;

pub type Store = TracedStore<AgaveMetaStore>;

pub struct Backend {
    config: SpawnerConfig,
    client: AgaveClient,
    store: Store,
}

impl Backend {
    pub fn connect(config: SpawnerConfig) -> Result<Self> {
        let client = AgaveClient::new(&config.agave_base_url, &config.service_token)
            .context("failed to build Agave client")?;
        let store = TracedStore::new(AgaveMetaStore::new(client.clone()));
        Ok(Self {
            config,
            client,
            store,
        })
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    pub fn scope(&self) -> Scope {
        Scope {
            tenant: self.config.tenant.clone(),
            instance: self.config.instance.clone(),
        }
    }

    pub fn records(&self) -> SessionRecords<Store> {
        SessionRecords::new(self.store.clone(), Some(self.config.service_account.clone()))
    }

    /// Load the tenant config for the configured tenant and instance.
    pub async fn tenant_configs(&self) -> Result<TenantConfigs> {
        let (tenant, instance) = (&self.config.tenant, &self.config.instance);
        let config = self
            .records()
            .load_tenant_config(tenant, instance)
            .await
            .with_context(|| format!("failed to load tenant config for {tenant}/{instance}"))?;
        Ok(TenantConfigs::new().with(tenant, instance, config))
    }

    pub fn abaco(&self) -> TracedDispatch<AbacoDispatch> {
        TracedDispatch::new(AbacoDispatch::new(self.client.clone()))
    }

    pub fn controller<D: ExecutorDispatch>(
        &self,
        dispatch: D,
        tenant_configs: TenantConfigs,
    ) -> LifecycleController<Store, D> {
        LifecycleController::new(
            self.store.clone(),
            dispatch,
            settings(&self.config, tenant_configs),
        )
    }
}

pub fn settings(config: &SpawnerConfig, tenant_configs: TenantConfigs) -> ControllerSettings {
    ControllerSettings {
        actor: config.actor(),
        hub_api_url: config.hub_api_url(),
        credentials: Some(config.credentials()),
        share_with: Some(config.service_account.clone()),
        policy: config.poll,
        tenant_configs,
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
