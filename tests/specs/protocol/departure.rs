// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Departed processes drop out of every admission check

use crate::prelude::*;
use tn_core::{Admission, PeerId, Phase, Protocol, WaitReason};

#[test]
fn witness_waits_only_on_active_peers() {
    let mut h = Harness::new(4, pool(1, Protocol::Witness));
    h.depart(2);
    h.depart(3);
    h.settle(1);

    h.request(0);
    assert_eq!(
        h.nodes[0].admission(),
        Admission::Waiting(WaitReason::Witness { peer: PeerId(1) })
    );

    // p1's own later request is the witness p0 needs
    h.step(0, 1);
    h.request(1);
    h.settle(1);
    assert_eq!(h.phase(0), Phase::InSection { pool: POOL });
}

#[test]
fn quorum_counts_terminate_as_acknowledgment() {
    let mut h = Harness::new(4, pool(1, Protocol::Quorum));
    h.request(0);

    h.depart(2);
    h.depart(3);
    h.step(2, 0);
    h.step(3, 0);
    assert_eq!(
        h.nodes[0].admission(),
        Admission::Waiting(WaitReason::Acks { missing: 1 })
    );

    h.settle(1);
    assert_eq!(h.phase(0), Phase::InSection { pool: POOL });
}

#[test]
fn lone_survivor_enters_immediately() {
    let mut h = Harness::new(2, pool(1, Protocol::Quorum));
    h.depart(1);
    h.settle(1);

    assert_eq!(h.phase(1), Phase::Departed);
    assert!(!h.nodes[0].liveness().is_active(PeerId(1)));

    // a lone active process needs nobody
    h.request(0);
    assert_eq!(h.phase(0), Phase::InSection { pool: POOL });
}
