// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Notebook spawner lifecycle engine

pub mod config;
mod controller;
pub mod env;
mod error;
pub mod launch;
mod poller;
mod records;

pub use config::{ConfigError, FileConfig, SpawnerConfig};
pub use controller::{ControllerSettings, LifecycleController, PollStatus, TenantConfigs};
pub use error::{LifecycleError, RecordsError, WaitError};
pub use launch::{
    build_start_params, LaunchError, Project, Resources, StartRequest, TemplateError,
    UserIdentity,
};
pub use poller::{PollPolicy, Reconciler};
pub use records::SessionRecords;
