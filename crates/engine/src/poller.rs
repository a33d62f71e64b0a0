// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation poller.
//!
//! Re-reads a session record until it reaches a target status. The wait is
//! bounded by both an attempt count and a wall-clock deadline, and ends early
//! when the record reports `ERROR` or the caller cancels.

use crate::error::WaitError;
use crate::records::SessionRecords;
use nbs_adapters::MetadataStore;
use nbs_core::{SessionKey, SessionRecord, SessionStatus};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Bounds for one wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_attempts: 100,
            timeout: Duration::from_secs(300),
        }
    }
}

/// Result of waiting for the next poll tick.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Tick {
    Ready,
    Timeout,
    Cancelled,
}

/// Sleeps between reads without ever sleeping past the deadline.
pub(crate) struct Ticker {
    interval: Duration,
    deadline: Instant,
    cancel: CancellationToken,
}

impl Ticker {
    pub(crate) fn new(interval: Duration, timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            interval,
            deadline: Instant::now() + timeout,
            cancel,
        }
    }

    /// Instant after which the wait has timed out.
    pub(crate) fn deadline(&self) -> Instant {
        self.deadline
    }

    pub(crate) async fn tick(&mut self) -> Tick {
        let now = Instant::now();
        if now >= self.deadline {
            return Tick::Timeout;
        }
        let wake = (now + self.interval).min(self.deadline);

        tokio::select! {
            _ = self.cancel.cancelled() => Tick::Cancelled,
            _ = tokio::time::sleep_until(wake) => {
                if Instant::now() >= self.deadline {
                    Tick::Timeout
                } else {
                    Tick::Ready
                }
            }
        }
    }
}

/// Waits for session records to converge on a status.
#[derive(Clone)]
pub struct Reconciler<M> {
    records: SessionRecords<M>,
    policy: PollPolicy,
}

impl<M: MetadataStore> Reconciler<M> {
    pub fn new(records: SessionRecords<M>, policy: PollPolicy) -> Self {
        Self { records, policy }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Poll until the record for `key` reaches `target`.
    ///
    /// Unreadable and missing records count as attempts and are retried.
    /// Each read is bounded by the same deadline and token as the sleeps.
    pub async fn wait_for(
        &self,
        key: &SessionKey,
        target: SessionStatus,
        cancel: &CancellationToken,
    ) -> Result<SessionRecord, WaitError> {
        let started = Instant::now();
        let mut ticker = Ticker::new(self.policy.interval, self.policy.timeout, cancel.clone());
        let mut attempts = 0u32;

        loop {
            if cancel.is_cancelled() {
                return Err(WaitError::Cancelled);
            }
            attempts += 1;

            let read = tokio::select! {
                _ = cancel.cancelled() => return Err(WaitError::Cancelled),
                read = tokio::time::timeout_at(ticker.deadline(), self.records.load(key)) => read,
            };
            let Ok(read) = read else {
                return Err(self.timeout(target, attempts, started));
            };

            match read {
                Ok(Some(record)) if record.status == target => {
                    tracing::info!(
                        %key,
                        status = %target,
                        attempts,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "target status reached"
                    );
                    return Ok(record);
                }
                Ok(Some(record)) if record.status == SessionStatus::Error => {
                    let detail = record.error_detail.unwrap_or_default();
                    tracing::warn!(%key, %target, attempts, detail = detail.as_str(), "session reported error");
                    return Err(WaitError::SessionError(detail));
                }
                Ok(Some(record)) => {
                    tracing::debug!(%key, status = %record.status, %target, attempts, "waiting");
                }
                Ok(None) => tracing::debug!(%key, attempts, "record not visible yet"),
                Err(e) => tracing::warn!(%key, attempts, error = %e, "poll read failed"),
            }

            if attempts >= self.policy.max_attempts {
                return Err(self.timeout(target, attempts, started));
            }
            match ticker.tick().await {
                Tick::Ready => {}
                Tick::Timeout => return Err(self.timeout(target, attempts, started)),
                Tick::Cancelled => return Err(WaitError::Cancelled),
            }
        }
    }

    fn timeout(&self, target: SessionStatus, attempts: u32, started: Instant) -> WaitError {
        let elapsed = started.elapsed();
        tracing::warn!(%target, attempts, elapsed_ms = elapsed.as_millis() as u64, "gave up waiting");
        WaitError::Timeout {
            target,
            attempts,
            elapsed,
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
