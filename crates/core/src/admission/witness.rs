// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue-witness admission (Lamport exclusion generalized to capacity `k`)
//!
//! A request `(t, me)` may enter when:
//! 1. it is among the `k` highest-priority entries of the local queue, and
//! 2. every active peer `p` is accounted for: either its latest stamp orders
//!    after ours, `(highest_seen[p], p) > (t, me)`, or its own request already
//!    sits ahead of ours in the queue.
//!
//! With FIFO channels, (2) means no active peer can still have an earlier
//! request in flight that the rank check has not counted. For `k = 1` the
//! second branch never applies (rank 0 has nobody ahead) and this is exactly
//! Lamport's condition.

use super::{Admission, WaitReason};
use crate::id::PeerId;
use crate::liveness::LivenessTracker;
use crate::pool::ResourcePool;
use crate::queue::Request;

pub fn evaluate(pool: &ResourcePool, me: PeerId, liveness: &LivenessTracker) -> Admission {
    let Some(own) = pool.pending() else {
        return Admission::Waiting(WaitReason::NoRequest);
    };
    let Some(rank) = pool.queue().rank_of(me) else {
        return Admission::Waiting(WaitReason::NoRequest);
    };

    if rank >= pool.capacity() {
        return Admission::Waiting(WaitReason::Rank {
            rank,
            capacity: pool.capacity(),
        });
    }

    for peer in liveness.active_peers() {
        if !dominates(pool, peer, own) && !queued_ahead(pool, peer, own) {
            return Admission::Waiting(WaitReason::Witness { peer });
        }
    }

    Admission::Granted
}

/// True if the latest stamp from `peer` orders after `own`
pub fn dominates(pool: &ResourcePool, peer: PeerId, own: Request) -> bool {
    own.precedes(&Request::new(pool.highest_seen(peer), peer))
}

fn queued_ahead(pool: &ResourcePool, peer: PeerId, own: Request) -> bool {
    pool.queue()
        .get(peer)
        .is_some_and(|theirs| theirs.precedes(&own))
}

#[cfg(test)]
#[path = "witness_tests.rs"]
mod tests;
