// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request/acknowledgment quorum admission (capacity 1)
//!
//! The local request enters once every active peer has acknowledged it. A
//! departed peer counts as having acknowledged. A process receiving a REQUEST
//! answers at once unless its own outstanding request on the same pool has
//! priority, in which case the ACK is withheld until it exits.

use super::{Admission, Reply, WaitReason};
use crate::liveness::LivenessTracker;
use crate::pool::ResourcePool;
use crate::queue::Request;

pub fn evaluate(pool: &ResourcePool, liveness: &LivenessTracker) -> Admission {
    if pool.pending().is_none() {
        return Admission::Waiting(WaitReason::NoRequest);
    }

    let missing = liveness
        .active_peers()
        .filter(|peer| !pool.has_ack(*peer))
        .count();

    if missing == 0 {
        Admission::Granted
    } else {
        Admission::Waiting(WaitReason::Acks { missing })
    }
}

pub fn reply_to(pool: &ResourcePool, incoming: Request) -> Reply {
    match pool.pending() {
        Some(own) if own.precedes(&incoming) => Reply::Defer,
        _ => Reply::Ack,
    }
}

#[cfg(test)]
#[path = "quorum_tests.rs"]
mod tests;
