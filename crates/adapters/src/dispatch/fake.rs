// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake executor dispatch for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DispatchError, DispatchReceipt, ExecutorDispatch};
use async_trait::async_trait;
use nbs_core::{ActorId, ActorMessage};
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded dispatch call
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchCall {
    pub actor: ActorId,
    pub message: ActorMessage,
}

type Responder = Arc<dyn Fn(&ActorMessage) + Send + Sync>;

struct FakeDispatchState {
    calls: Vec<DispatchCall>,
    failure: Option<DispatchError>,
    responder: Option<Responder>,
}

/// Fake dispatch that records messages.
///
/// A responder installed with [`FakeDispatch::on_send`] runs synchronously
/// for each delivered message, standing in for the executor.
#[derive(Clone)]
pub struct FakeDispatch {
    inner: Arc<Mutex<FakeDispatchState>>,
}

impl Default for FakeDispatch {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeDispatchState {
                calls: Vec::new(),
                failure: None,
                responder: None,
            })),
        }
    }
}

impl FakeDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<DispatchCall> {
        self.inner.lock().calls.clone()
    }

    /// Names of the commands sent so far, in order
    pub fn commands(&self) -> Vec<&'static str> {
        self.inner
            .lock()
            .calls
            .iter()
            .map(|c| c.message.command.name())
            .collect()
    }

    /// Fail every send with `err` until cleared
    pub fn set_failure(&self, err: Option<DispatchError>) {
        self.inner.lock().failure = err;
    }

    /// Run `f` for every successfully delivered message
    pub fn on_send(&self, f: impl Fn(&ActorMessage) + Send + Sync + 'static) {
        self.inner.lock().responder = Some(Arc::new(f));
    }
}

#[async_trait]
impl ExecutorDispatch for FakeDispatch {
    async fn send(
        &self,
        actor: &ActorId,
        message: &ActorMessage,
    ) -> Result<DispatchReceipt, DispatchError> {
        let responder = {
            let mut inner = self.inner.lock();
            inner.calls.push(DispatchCall {
                actor: actor.clone(),
                message: message.clone(),
            });
            if let Some(err) = &inner.failure {
                return Err(err.clone());
            }
            inner.responder.clone()
        };

        // Lock released so the responder may call back into fakes
        if let Some(respond) = responder {
            respond(message);
        }
        let n = self.inner.lock().calls.len();
        Ok(DispatchReceipt {
            execution_id: Some(format!("fake-exec-{n}")),
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
