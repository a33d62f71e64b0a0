// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit status transitions.
//!
//! Every write to a session record goes through a [`Transition`]. Only
//! `Ready` carries an endpoint and only `Error` carries a detail, so a
//! record produced by [`Transition::apply`] always satisfies the
//! endpoint-iff-ready invariant.

use crate::record::{SessionRecord, UNKNOWN_ERROR_DETAIL};
use crate::status::{Endpoint, SessionStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Submitted,
    StopSubmitted,
    Ready {
        endpoint: Endpoint,
        url: Option<String>,
    },
    Stopped,
    Error {
        detail: String,
    },
}

impl Transition {
    pub fn ready(host: impl Into<String>, port: u16) -> Self {
        Transition::Ready {
            endpoint: Endpoint::new(host, port),
            url: None,
        }
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Transition::Error {
            detail: detail.into(),
        }
    }

    /// Status the record holds after this transition.
    pub fn status(&self) -> SessionStatus {
        match self {
            Transition::Submitted => SessionStatus::Submitted,
            Transition::StopSubmitted => SessionStatus::StopSubmitted,
            Transition::Ready { .. } => SessionStatus::Ready,
            Transition::Stopped => SessionStatus::Stopped,
            Transition::Error { .. } => SessionStatus::Error,
        }
    }

    /// Produce the updated record. Identity and record id are preserved;
    /// connection info and error detail are reset unless this transition
    /// sets them.
    pub fn apply(&self, record: &SessionRecord) -> SessionRecord {
        let mut next = SessionRecord {
            id: record.id.clone(),
            key: record.key.clone(),
            status: self.status(),
            endpoint: None,
            url: None,
            error_detail: None,
        };
        match self {
            Transition::Ready { endpoint, url } => {
                next.url = Some(url.clone().unwrap_or_else(|| endpoint.http_url()));
                next.endpoint = Some(endpoint.clone());
            }
            Transition::Error { detail } => {
                // Keep the last known URL for diagnostics
                next.url = record.url.clone();
                next.error_detail = Some(if detail.is_empty() {
                    UNKNOWN_ERROR_DETAIL.to_string()
                } else {
                    detail.clone()
                });
            }
            _ => {}
        }
        next
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
