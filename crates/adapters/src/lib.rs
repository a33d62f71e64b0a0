// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the metadata store and the executor channel

pub mod agave;
pub mod dispatch;
mod env;
pub mod store;
pub mod traced;

pub use agave::{AgaveClient, AgaveError};
pub use dispatch::{AbacoDispatch, DispatchError, DispatchReceipt, ExecutorDispatch, NoOpDispatch};
pub use store::{AgaveMetaStore, MetadataRecord, MetadataStore, StoreError};
pub use traced::{TracedDispatch, TracedStore};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use dispatch::{DispatchCall, FakeDispatch};
#[cfg(any(test, feature = "test-support"))]
pub use store::{FakeMetadataStore, StoreCall};
