// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource pool: one request queue plus the per-peer bookkeeping that the
//! admission protocols read.

use crate::admission::Protocol;
use crate::clock::Timestamp;
use crate::config::PoolSpec;
use crate::id::{PeerId, PoolId};
use crate::queue::{Request, RequestQueue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the workload is told about the pool it was admitted into
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolSlot {
    pub id: PoolId,
    pub name: String,
    pub instance: u32,
    pub capacity: usize,
}

impl fmt::Display for PoolSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.instance)
    }
}

/// One pool of capacity `k` as seen by a single process
#[derive(Debug, Clone)]
pub struct ResourcePool {
    slot: PoolSlot,
    protocol: Protocol,
    queue: RequestQueue,
    /// Greatest timestamp received from each peer (witness table)
    highest_seen: Vec<Timestamp>,
    /// Quorum acknowledgments for the current local request
    acks: Vec<bool>,
    /// Peers whose ACK is withheld until the local request exits
    deferred: Vec<PeerId>,
    /// The local process's live request, if any
    pending: Option<Request>,
}

impl ResourcePool {
    pub fn new(spec: &PoolSpec, peers: usize) -> Self {
        Self {
            slot: PoolSlot {
                id: spec.id,
                name: spec.name.clone(),
                instance: spec.instance,
                capacity: spec.capacity,
            },
            protocol: spec.protocol,
            queue: RequestQueue::new(),
            highest_seen: vec![0; peers],
            acks: vec![false; peers],
            deferred: Vec::new(),
            pending: None,
        }
    }

    pub fn id(&self) -> PoolId {
        self.slot.id
    }

    pub fn capacity(&self) -> usize {
        self.slot.capacity
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn slot(&self) -> &PoolSlot {
        &self.slot
    }

    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    pub fn pending(&self) -> Option<Request> {
        self.pending
    }

    /// Register the local request: queue it and start collecting acks afresh
    pub fn begin(&mut self, request: Request) {
        self.acks.iter_mut().for_each(|ack| *ack = false);
        self.queue.add(request);
        self.pending = Some(request);
    }

    /// Drop the local request and hand back the withheld replies
    pub fn finish(&mut self) -> Vec<PeerId> {
        if let Some(own) = self.pending.take() {
            self.queue.remove_by_owner(own.owner);
        }
        self.take_deferred()
    }

    /// Queue a remote request
    pub fn enqueue(&mut self, request: Request) {
        self.queue.add(request);
    }

    /// Remove a remote request after its owner released
    pub fn dequeue(&mut self, owner: PeerId) -> Option<Request> {
        self.queue.remove_by_owner(owner)
    }

    /// Raise the witness entry for `peer`; never lowers it
    /// Raise the witness entry for `peer`. False if `peer` is outside the table.
    pub fn record_seen(&mut self, peer: PeerId, timestamp: Timestamp) -> bool {
        match self.highest_seen.get_mut(peer.index()) {
            Some(seen) => {
                *seen = (*seen).max(timestamp);
                true
            }
            None => false,
        }
    }

    pub fn highest_seen(&self, peer: PeerId) -> Timestamp {
        self.highest_seen.get(peer.index()).copied().unwrap_or(0)
    }

    /// False if `peer` is outside the table
    pub fn mark_ack(&mut self, peer: PeerId) -> bool {
        match self.acks.get_mut(peer.index()) {
            Some(ack) => {
                *ack = true;
                true
            }
            None => false,
        }
    }

    pub fn has_ack(&self, peer: PeerId) -> bool {
        self.acks.get(peer.index()).copied().unwrap_or(false)
    }

    pub fn defer(&mut self, peer: PeerId) {
        if !self.deferred.contains(&peer) {
            self.deferred.push(peer);
        }
    }

    pub fn deferred(&self) -> &[PeerId] {
        &self.deferred
    }

    pub fn take_deferred(&mut self) -> Vec<PeerId> {
        std::mem::take(&mut self.deferred)
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
