// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Departed-peer tracking
//!
//! Membership only ever shrinks: once a peer announces TERMINATE it is
//! excluded from every witness and quorum check for the rest of the run.

use crate::id::PeerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessTracker {
    me: PeerId,
    active: Vec<bool>,
}

impl LivenessTracker {
    /// All `peers` processes start active
    pub fn new(me: PeerId, peers: usize) -> Self {
        Self {
            me,
            active: vec![true; peers],
        }
    }

    /// Mark `peer` as departed. Returns true only the first time.
    pub fn mark_inactive(&mut self, peer: PeerId) -> bool {
        match self.active.get_mut(peer.index()) {
            Some(flag) if *flag => {
                *flag = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self, peer: PeerId) -> bool {
        self.active.get(peer.index()).copied().unwrap_or(false)
    }

    /// Active peers other than self
    pub fn active_peers(&self) -> impl Iterator<Item = PeerId> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .filter_map(|(index, _)| PeerId::from_index(index))
            .filter(move |p| *p != self.me)
    }

    pub fn active_count(&self) -> usize {
        self.active_peers().count()
    }

    pub fn size(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
#[path = "liveness_tests.rs"]
mod tests;
