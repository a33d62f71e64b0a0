// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session status and connection info.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a notebook session as recorded in the metadata store.
///
/// Start path: `Pending -> Submitted -> Ready`.
/// Stop path: `Ready | any -> StopSubmitted -> Stopped`.
/// `Error` is reachable from any status and only left by a new start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Pending,
    Submitted,
    StopSubmitted,
    Ready,
    Stopped,
    Error,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Pending => "PENDING",
            SessionStatus::Submitted => "SUBMITTED",
            SessionStatus::StopSubmitted => "STOP_SUBMITTED",
            SessionStatus::Ready => "READY",
            SessionStatus::Stopped => "STOPPED",
            SessionStatus::Error => "ERROR",
        }
    }

    /// Whether the host should consider the server alive.
    ///
    /// A server that has been asked to stop stays reachable until the
    /// executor confirms `Stopped`.
    pub fn is_running(self) -> bool {
        matches!(
            self,
            SessionStatus::Submitted | SessionStatus::Ready | SessionStatus::StopSubmitted
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown session status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for SessionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(SessionStatus::Pending),
            "SUBMITTED" => Ok(SessionStatus::Submitted),
            "STOP_SUBMITTED" => Ok(SessionStatus::StopSubmitted),
            "READY" => Ok(SessionStatus::Ready),
            "STOPPED" => Ok(SessionStatus::Stopped),
            "ERROR" => Ok(SessionStatus::Error),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Address where the hub can reach a running notebook server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Default browsable URL for the server.
    pub fn http_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
