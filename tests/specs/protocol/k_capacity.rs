// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Up to k holders, admitted in (timestamp, id) order

use crate::prelude::*;
use tn_core::{Message, PeerId, Phase, Protocol};

/// Owners 4, 3, 2, 1, 0 request with timestamps 10, 11, 12, 13, 14
fn staggered() -> Harness {
    let mut h = Harness::new(5, pool(3, Protocol::Witness));

    // a message stamped c-3 leaves the clock at c-2; the request is stamped c
    for (owner, ts) in [(4u32, 10u64), (3, 11), (2, 12), (1, 13)] {
        h.inject(owner, Message::release(ts - 3, PeerId(0), POOL));
    }
    h.inject(0, Message::release(11, PeerId(1), POOL));

    for (owner, ts) in [(4u32, 10u64), (3, 11), (2, 12), (1, 13), (0, 14)] {
        assert_eq!(h.request(owner).timestamp, ts);
    }
    h
}

#[test]
fn three_earliest_requests_hold_the_pool_together() {
    let mut h = staggered();
    h.settle(3);

    let mut holders = h.holders();
    holders.sort();
    assert_eq!(holders, [PeerId(2), PeerId(3), PeerId(4)]);
    assert_eq!(h.phase(1), Phase::Requesting { pool: POOL });
    assert_eq!(h.phase(0), Phase::Requesting { pool: POOL });
}

#[test]
fn waiting_requests_are_admitted_as_slots_free() {
    let mut h = staggered();
    h.settle(3);

    h.exit(4);
    h.settle(3);
    assert_eq!(h.phase(1), Phase::InSection { pool: POOL });
    assert_eq!(h.phase(0), Phase::Requesting { pool: POOL });

    h.exit(3);
    h.settle(3);
    assert_eq!(h.phase(0), Phase::InSection { pool: POOL });

    assert_eq!(&h.admitted[3..], [PeerId(1), PeerId(0)]);
}
