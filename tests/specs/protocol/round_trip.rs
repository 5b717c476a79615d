// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Equal timestamps are ordered by process id

use crate::prelude::*;
use tn_core::{Message, PeerId, Phase, Protocol};

#[test]
fn lower_id_wins_a_timestamp_tie() {
    let mut h = Harness::new(3, pool(1, Protocol::Witness));

    // bring p0 and p1 to clock 3 so both stamp their request with 5
    h.inject(0, Message::release(2, PeerId(2), POOL));
    h.inject(1, Message::release(2, PeerId(2), POOL));
    let from_p1 = h.request(1);
    let from_p0 = h.request(0);
    assert_eq!(from_p0.timestamp, 5);
    assert_eq!(from_p1.timestamp, 5);

    // p2 sees both, then asks for the pool itself
    h.step(0, 2);
    h.step(1, 2);
    h.request(2);

    h.settle(1);
    assert_eq!(h.phase(0), Phase::InSection { pool: POOL });
    assert_eq!(h.phase(1), Phase::Requesting { pool: POOL });
    assert_eq!(h.admitted, [PeerId(0)]);

    h.exit(0);
    h.settle(1);
    assert_eq!(h.phase(1), Phase::InSection { pool: POOL });

    h.exit(1);
    h.settle(1);
    assert_eq!(h.phase(2), Phase::InSection { pool: POOL });
    assert_eq!(h.admitted, [PeerId(0), PeerId(1), PeerId(2)]);
}

#[test]
fn quorum_breaks_the_same_tie_the_same_way() {
    let mut h = Harness::new(2, pool(1, Protocol::Quorum));
    let a = h.request(0);
    let b = h.request(1);
    assert_eq!(a.timestamp, b.timestamp);

    h.settle(1);
    assert_eq!(h.admitted, [PeerId(0)]);

    h.exit(0);
    h.settle(1);
    assert_eq!(h.admitted, [PeerId(0), PeerId(1)]);
}
