// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawner configuration.
//!
//! Layered lowest precedence first: built-in defaults, an optional TOML
//! file, then process environment. Loaded once by the host before any
//! controller is built.

use crate::env;
use crate::poller::PollPolicy;
use nbs_core::{ActorCredentials, ActorId};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_AGAVE_BASE_URL: &str = "https://api.tacc.utexas.edu";
pub const DEFAULT_SERVICE_ACCOUNT: &str = "apitest";
pub const DEFAULT_HUB_IP: &str = "127.0.0.1";
pub const DEFAULT_HUB_PORT: u16 = 8081;

/// Errors loading spawner configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// Shape of the optional TOML config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub tenant: Option<String>,
    pub instance: Option<String>,
    pub actor_id: Option<String>,
    pub agave_base_url: Option<String>,
    pub service_token: Option<String>,
    pub service_account: Option<String>,
    pub call_actor: Option<bool>,
    pub hub: HubSection,
    pub poll: PollSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HubSection {
    pub ip: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollSection {
    pub interval_ms: Option<u64>,
    pub max_attempts: Option<u32>,
    pub timeout_secs: Option<u64>,
}

/// Resolved spawner settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnerConfig {
    pub tenant: String,
    pub instance: String,
    pub actor_id: Option<ActorId>,
    pub agave_base_url: String,
    pub service_token: String,
    pub service_account: String,
    pub hub_ip: String,
    pub hub_port: u16,
    pub call_actor: bool,
    pub poll: PollPolicy,
}

impl SpawnerConfig {
    /// Load from `path` (or the default locations) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match resolve_path(path) {
            Some(path) => read_file(&path)?,
            None => FileConfig::default(),
        };
        Self::from_sources(file, env::var)
    }

    /// Layer `lookup` (an environment) over `file` and the defaults.
    pub fn from_sources(
        file: FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let pick = |name: &str, from_file: Option<String>| lookup(name).or(from_file);

        let call_actor = match lookup(env::CALL_ACTOR) {
            Some(raw) => parse_flag(env::CALL_ACTOR, &raw)?,
            None => file.call_actor.unwrap_or(true),
        };
        let actor_id = pick(env::ACTOR_ID, file.actor_id).map(ActorId::new);
        if call_actor && actor_id.is_none() {
            return Err(ConfigError::Missing(env::ACTOR_ID));
        }

        let defaults = PollPolicy::default();
        let poll = PollPolicy {
            interval: match lookup(env::POLL_INTERVAL_MS) {
                Some(raw) => Duration::from_millis(parse_positive(env::POLL_INTERVAL_MS, &raw)?),
                None => positive_in_file("poll.interval_ms", file.poll.interval_ms)?
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.interval),
            },
            max_attempts: match lookup(env::MAX_POLL_ATTEMPTS) {
                Some(raw) => parse_positive(env::MAX_POLL_ATTEMPTS, &raw)?,
                None => positive_in_file("poll.max_attempts", file.poll.max_attempts)?
                    .unwrap_or(defaults.max_attempts),
            },
            timeout: match lookup(env::START_TIMEOUT_SECS) {
                Some(raw) => Duration::from_secs(parse_positive(env::START_TIMEOUT_SECS, &raw)?),
                None => positive_in_file("poll.timeout_secs", file.poll.timeout_secs)?
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.timeout),
            },
        };

        let hub_port = match lookup(env::HUB_PORT) {
            Some(raw) => parse_positive(env::HUB_PORT, &raw)?,
            None => positive_in_file("hub.port", file.hub.port)?.unwrap_or(DEFAULT_HUB_PORT),
        };

        Ok(Self {
            tenant: pick(env::TENANT, file.tenant).ok_or(ConfigError::Missing(env::TENANT))?,
            instance: pick(env::INSTANCE, file.instance)
                .ok_or(ConfigError::Missing(env::INSTANCE))?,
            actor_id,
            agave_base_url: pick(env::AGAVE_BASE_URL, file.agave_base_url)
                .unwrap_or_else(|| DEFAULT_AGAVE_BASE_URL.to_string()),
            service_token: pick(env::AGAVE_SERVICE_TOKEN, file.service_token)
                .ok_or(ConfigError::Missing(env::AGAVE_SERVICE_TOKEN))?,
            service_account: pick(env::AGAVE_SERVICE_ACCOUNT, file.service_account)
                .unwrap_or_else(|| DEFAULT_SERVICE_ACCOUNT.to_string()),
            hub_ip: pick(env::HUB_IP, file.hub.ip).unwrap_or_else(|| DEFAULT_HUB_IP.to_string()),
            hub_port,
            call_actor,
            poll,
        })
    }

    /// Callback URL handed to launched servers.
    pub fn hub_api_url(&self) -> String {
        format!("http://{}:{}/hub/api", self.hub_ip, self.hub_port)
    }

    /// Credentials forwarded to the actor.
    pub fn credentials(&self) -> ActorCredentials {
        ActorCredentials {
            service_token: self.service_token.clone(),
            agave_base_url: self.agave_base_url.clone(),
        }
    }

    /// Actor to address; a placeholder when actor calls are disabled.
    pub fn actor(&self) -> ActorId {
        self.actor_id
            .clone()
            .unwrap_or_else(|| ActorId::new("disabled"))
    }
}

/// Explicit path, then `$NBS_CONFIG`, then `<config_dir>/nbs/config.toml` if present.
fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env::var(env::CONFIG_PATH) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("nbs").join("config.toml"))
        .filter(|path| path.is_file())
}

pub fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}

fn parse_positive<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let invalid = |reason: String| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason,
    };
    let value: T = raw.trim().parse().map_err(|e: T::Err| invalid(e.to_string()))?;
    if value == T::default() {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(value)
}

/// File values are already typed; only the zero check remains.
fn positive_in_file<T>(key: &'static str, value: Option<T>) -> Result<Option<T>, ConfigError>
where
    T: PartialEq + Default + std::fmt::Display,
{
    match value {
        Some(v) if v == T::default() => Err(ConfigError::Invalid {
            key,
            value: v.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        other => Ok(other),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
