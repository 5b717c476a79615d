// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the collaborators around the coordination core

pub mod traced;
pub mod transport;
pub mod workload;

pub use traced::{TracedTransport, TracedWorkload};
pub use transport::{mesh, MeshTransport, Transport, TransportError};
pub use workload::{MonitoredWorkload, OccupancyMonitor, PoolOccupancy, SleepWorkload, Workload};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use transport::{FakeTransport, TransportCall};
#[cfg(any(test, feature = "test-support"))]
pub use workload::{FakeWorkload, WorkloadCall};
