// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process and pool identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank of a process in `[0, N)`
///
/// Stable for a run. The natural order is the tie-break between requests
/// carrying equal timestamps: the smaller id has priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerId(pub u32);

impl PeerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Rank stored at `index` of a per-peer table, if it fits a rank
    pub fn from_index(index: usize) -> Option<PeerId> {
        u32::try_from(index).ok().map(PeerId)
    }

    /// All ranks of an `n`-process run
    pub fn all(n: u32) -> impl Iterator<Item = PeerId> {
        (0..n).map(PeerId)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Index of a resource pool in the flat pool arena
///
/// A partitioned pool contributes one id per resource instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolId(pub u32);

impl PoolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}
