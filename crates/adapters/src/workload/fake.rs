// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake workload for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::Workload;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tn_core::{PeerId, PoolSlot};

/// Recorded workload call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkloadCall {
    Admitted { rank: PeerId, slot: PoolSlot },
    Rest { rank: PeerId },
}

/// Workload that records calls and holds each slot for a fixed time
#[derive(Clone, Default)]
pub struct FakeWorkload {
    hold: Duration,
    calls: Arc<Mutex<Vec<WorkloadCall>>>,
}

impl FakeWorkload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hold(hold: Duration) -> Self {
        Self {
            hold,
            ..Self::default()
        }
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<WorkloadCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Admissions recorded for `rank`, in order
    pub fn admissions(&self, rank: PeerId) -> Vec<PoolSlot> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WorkloadCall::Admitted { rank: r, slot } if r == rank => Some(slot),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: WorkloadCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

#[async_trait]
impl Workload for FakeWorkload {
    async fn on_admitted(&self, rank: PeerId, slot: &PoolSlot) -> Duration {
        self.record(WorkloadCall::Admitted {
            rank,
            slot: slot.clone(),
        });
        if self.hold.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.hold).await;
        }
        self.hold
    }

    async fn rest(&self, rank: PeerId) {
        self.record(WorkloadCall::Rest { rank });
    }
}
