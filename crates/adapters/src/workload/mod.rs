// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The work a process performs while it holds a pool slot

mod monitor;
mod sleep;

pub use monitor::{MonitoredWorkload, OccupancyMonitor, PoolOccupancy};
pub use sleep::SleepWorkload;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWorkload, WorkloadCall};

use async_trait::async_trait;
use std::time::Duration;
use tn_core::{PeerId, PoolSlot};

/// Work done under an admitted slot and between operations
#[async_trait]
pub trait Workload: Clone + Send + Sync + 'static {
    /// Called exactly once per admission, while the slot is held.
    /// Returns how long the slot was held.
    async fn on_admitted(&self, rank: PeerId, slot: &PoolSlot) -> Duration;

    /// Pause between two operations
    async fn rest(&self, rank: PeerId);
}
