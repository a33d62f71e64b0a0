// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session identity.
//!
//! A notebook session is scoped by tenant (organization), instance
//! (deployment environment) and username. The triple is threaded through
//! every operation explicitly; nothing reads it from process environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors constructing a session key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("no {0} defined")]
    Empty(&'static str),
    #[error("{field} contains whitespace: {value:?}")]
    Whitespace { field: &'static str, value: String },
}

/// Unique external key of a session record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    tenant: String,
    instance: String,
    username: String,
}

impl SessionKey {
    pub fn new(
        tenant: impl Into<String>,
        instance: impl Into<String>,
        username: impl Into<String>,
    ) -> Result<Self, KeyError> {
        let key = Self {
            tenant: tenant.into(),
            instance: instance.into(),
            username: username.into(),
        };
        for (field, value) in [
            ("tenant", &key.tenant),
            ("instance", &key.instance),
            ("username", &key.username),
        ] {
            if value.is_empty() {
                return Err(KeyError::Empty(field));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(KeyError::Whitespace {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(key)
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Name of the session record in the metadata store.
    pub fn record_name(&self) -> String {
        format!("{}-{}-{}-JHub", self.username, self.tenant, self.instance)
    }

    /// Name the executor gives the launched server (container, job, ...).
    pub fn server_name(&self) -> String {
        format!("{}-{}-{}-Jhub", self.username, self.tenant, self.instance)
    }

    /// Name of the tenant configuration record this session reads.
    pub fn config_record_name(&self) -> String {
        config_record_name(&self.tenant, &self.instance)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.record_name())
    }
}

/// Well-known name of the per-tenant configuration record.
pub fn config_record_name(tenant: &str, instance: &str) -> String {
    format!("config.{tenant}.{instance}.jhub")
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
