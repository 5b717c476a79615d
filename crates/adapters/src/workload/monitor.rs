// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Occupancy accounting across every process of an in-process run

use super::Workload;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tn_core::{PeerId, PoolId, PoolSlot};

/// Holder counts for one pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolOccupancy {
    pub slot: PoolSlot,
    pub current: usize,
    pub peak: usize,
    pub admissions: u64,
}

impl PoolOccupancy {
    /// More holders were seen at once than the pool allows
    pub fn violated(&self) -> bool {
        self.peak > self.slot.capacity
    }
}

/// Shared counter of concurrent holders per pool
#[derive(Debug, Clone, Default)]
pub struct OccupancyMonitor {
    pools: Arc<Mutex<BTreeMap<PoolId, PoolOccupancy>>>,
}

impl OccupancyMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self, slot: &PoolSlot) {
        let mut pools = self.pools.lock().unwrap_or_else(|e| e.into_inner());
        let entry = pools.entry(slot.id).or_insert_with(|| PoolOccupancy {
            slot: slot.clone(),
            current: 0,
            peak: 0,
            admissions: 0,
        });
        entry.current += 1;
        entry.admissions += 1;
        entry.peak = entry.peak.max(entry.current);
        if entry.violated() {
            tracing::error!(
                pool = %slot,
                holders = entry.current,
                capacity = slot.capacity,
                "capacity exceeded"
            );
        }
    }

    pub fn leave(&self, slot: &PoolSlot) {
        let mut pools = self.pools.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = pools.get_mut(&slot.id) {
            entry.current = entry.current.saturating_sub(1);
        }
    }

    /// Every pool entered so far, by id
    pub fn snapshot(&self) -> Vec<PoolOccupancy> {
        self.pools
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }

    pub fn violations(&self) -> Vec<PoolOccupancy> {
        self.snapshot().into_iter().filter(|p| p.violated()).collect()
    }
}

/// Leaves the pool when dropped, including on task abort
struct Holding<'a> {
    monitor: &'a OccupancyMonitor,
    slot: &'a PoolSlot,
}

impl Drop for Holding<'_> {
    fn drop(&mut self) {
        self.monitor.leave(self.slot);
    }
}

/// Counts holders around an inner workload
#[derive(Debug, Clone)]
pub struct MonitoredWorkload<W> {
    inner: W,
    monitor: OccupancyMonitor,
}

impl<W> MonitoredWorkload<W> {
    pub fn new(inner: W, monitor: OccupancyMonitor) -> Self {
        Self { inner, monitor }
    }

    pub fn monitor(&self) -> &OccupancyMonitor {
        &self.monitor
    }
}

#[async_trait]
impl<W: Workload> Workload for MonitoredWorkload<W> {
    async fn on_admitted(&self, rank: PeerId, slot: &PoolSlot) -> Duration {
        self.monitor.enter(slot);
        let _holding = Holding {
            monitor: &self.monitor,
            slot,
        };
        self.inner.on_admitted(rank, slot).await
    }

    async fn rest(&self, rank: PeerId) {
        self.inner.rest(rank).await
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
