// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared HTTP client for the Agave tenant APIs (metadata and actors).
//!
//! Every Agave response is wrapped as `{"status", "message", "result"}`;
//! [`AgaveClient`] strips the envelope and hands back `result`.

use crate::env;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors talking to an Agave endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgaveError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unreadable response: {0}")]
    Decode(String),
}

impl AgaveError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AgaveError::Status { status, .. } => StatusCode::from_u16(*status).ok(),
            _ => None,
        }
    }
}

/// Authenticated client bound to one API base URL. Cheap to clone.
#[derive(Clone)]
pub struct AgaveClient {
    http: Client,
    base_url: String,
    token: String,
}

impl AgaveClient {
    /// Client using the timeout from `NBS_HTTP_TIMEOUT_MS`.
    pub fn new(base_url: &str, token: &str) -> Result<Self, AgaveError> {
        Self::with_timeout(base_url, token, env::http_timeout())
    }

    pub fn with_timeout(base_url: &str, token: &str, timeout: Duration) -> Result<Self, AgaveError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgaveError::Transport(format!("building HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, AgaveError> {
        let request = self.request(Method::GET, path).query(query);
        self.execute(request).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, AgaveError> {
        let request = self.request(Method::POST, path).json(body);
        self.execute(request).await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, path.trim_start_matches('/')))
            .bearer_auth(&self.token)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Value, AgaveError> {
        let response = request
            .send()
            .await
            .map_err(|e| AgaveError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgaveError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(AgaveError::Status {
                status: status.as_u16(),
                body: error_message(&body),
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        let value: Value =
            serde_json::from_str(&body).map_err(|e| AgaveError::Decode(e.to_string()))?;
        Ok(unwrap_envelope(value))
    }
}

/// Take `result` out of the envelope; bodies without one pass through.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("result") => {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Prefer the envelope's `message` for error bodies.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
#[path = "agave_tests.rs"]
mod tests;
