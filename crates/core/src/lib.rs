// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nbs-core: session data model for the notebook spawner

pub mod command;
pub mod config;
pub mod id;
pub mod key;
mod lenient;
pub mod record;
pub mod status;
pub mod transition;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use command::{ActorCredentials, ActorMessage, ExecutorCommand, StartParams, StopParams, UpdateParams};
pub use config::{ConfigError, TenantConfig, HPC_IMAGE_CHOICE};
pub use id::{ActorId, RecordId};
pub use key::{config_record_name, KeyError, SessionKey};
pub use record::{RecordError, RecordValue, SessionRecord};
pub use status::{Endpoint, SessionStatus};
pub use transition::Transition;
