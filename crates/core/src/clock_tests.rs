// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use yare::parameterized;

#[test]
fn new_clock_starts_at_zero() {
    let clock = LamportClock::new();
    assert_eq!(clock.now(), 0);
}

#[test]
fn tick_increments_and_returns_new_value() {
    let mut clock = LamportClock::new();
    assert_eq!(clock.tick(), 1);
    assert_eq!(clock.tick(), 2);
    assert_eq!(clock.now(), 2);
}

#[parameterized(
    received_ahead = { 3, 10, 11 },
    received_behind = { 10, 3, 11 },
    received_equal = { 7, 7, 8 },
    received_zero = { 0, 0, 1 },
)]
fn observe_takes_max_plus_one(local: u64, received: u64, expected: u64) {
    let mut clock = LamportClock::new();
    for _ in 0..local {
        clock.tick();
    }
    assert_eq!(clock.observe(received), expected);
    assert_eq!(clock.now(), expected);
}

#[derive(Debug, Clone)]
enum ClockEvent {
    Tick,
    Observe(u64),
}

fn arb_event() -> impl Strategy<Value = ClockEvent> {
    prop_oneof![
        Just(ClockEvent::Tick),
        (0u64..1_000).prop_map(ClockEvent::Observe),
    ]
}

proptest! {
    #[test]
    fn clock_strictly_increases_on_every_event(
        events in proptest::collection::vec(arb_event(), 1..64)
    ) {
        let mut clock = LamportClock::new();
        let mut last = clock.now();

        for event in events {
            let next = match event {
                ClockEvent::Tick => clock.tick(),
                ClockEvent::Observe(ts) => {
                    let next = clock.observe(ts);
                    prop_assert!(next > ts, "observe must move past the received stamp");
                    next
                }
            };
            prop_assert!(next > last);
            last = next;
        }
    }
}
