// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workload that sleeps for a random duration

use super::Workload;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tn_core::{PeerId, PoolSlot, WorkloadConfig};

/// Holds each slot, and rests between operations, for a uniformly random
/// duration within the configured ranges
#[derive(Debug, Clone)]
pub struct SleepWorkload {
    config: WorkloadConfig,
}

impl SleepWorkload {
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }
}

fn pick(min: Duration, max: Duration) -> Duration {
    if min >= max {
        return min;
    }
    rand::thread_rng().gen_range(min..=max)
}

#[async_trait]
impl Workload for SleepWorkload {
    async fn on_admitted(&self, _rank: PeerId, _slot: &PoolSlot) -> Duration {
        let hold = pick(self.config.min_hold, self.config.max_hold);
        tokio::time::sleep(hold).await;
        hold
    }

    async fn rest(&self, _rank: PeerId) {
        let rest = pick(self.config.min_rest, self.config.max_rest);
        if !rest.is_zero() {
            tokio::time::sleep(rest).await;
        }
    }
}
