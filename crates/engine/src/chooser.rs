// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Picks which instance of a partitioned pool an operation targets

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tn_core::{ChooserKind, PeerId, PoolId, Stage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chooser {
    kind: ChooserKind,
}

impl Chooser {
    pub fn new(kind: ChooserKind) -> Self {
        Self { kind }
    }

    /// Pool for operation `op` of `rank` at stage number `stage_index`
    pub fn choose(&self, rank: PeerId, op: u32, stage_index: usize, stage: &Stage) -> PoolId {
        let instances = u64::from(stage.instances.max(1));
        let instance = match self.kind {
            ChooserKind::RoundRobin => (u64::from(rank.0) + u64::from(op)) % instances,
            ChooserKind::Hashed => {
                let mut hasher = DefaultHasher::new();
                (rank, op, stage_index).hash(&mut hasher);
                hasher.finish() % instances
            }
        };
        stage.pool(instance as u32)
    }
}
