// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{RecordId, SessionKey, SessionRecord, SessionStatus, TenantConfig};

pub const TEST_TENANT: &str = "tacc";
pub const TEST_INSTANCE: &str = "prod";

/// Key in the default test tenant/instance.
pub fn test_key(username: &str) -> SessionKey {
    match SessionKey::new(TEST_TENANT, TEST_INSTANCE, username) {
        Ok(key) => key,
        Err(e) => unreachable!("test username {username:?} is invalid: {e}"),
    }
}

/// Freshly created record in `PENDING`.
pub fn pending_record(id: &str, username: &str) -> SessionRecord {
    SessionRecord {
        id: RecordId::new(id),
        key: test_key(username),
        status: SessionStatus::Pending,
        endpoint: None,
        url: None,
        error_detail: None,
    }
}

/// Tenant config offering two images, with one mount template.
pub fn tenant_config() -> TenantConfig {
    TenantConfig {
        images: vec![
            "taccsciapps/jupyteruser-base:1.2".to_string(),
            "taccsciapps/jupyteruser-ds:1.2".to_string(),
        ],
        volume_mounts: vec!["/work/{tenant_id}/{username}:/home/jupyter/work:rw".to_string()],
        ..TenantConfig::default()
    }
}
