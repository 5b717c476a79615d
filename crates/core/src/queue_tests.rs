// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn req(timestamp: u64, owner: u32) -> Request {
    Request::new(timestamp, PeerId(owner))
}

fn owners(queue: &RequestQueue) -> Vec<u32> {
    queue.iter().map(|r| r.owner.0).collect()
}

#[test]
fn new_queue_is_empty() {
    let queue = RequestQueue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.rank_of(PeerId(0)), None);
}

#[test]
fn add_keeps_timestamp_order() {
    let mut queue = RequestQueue::new();
    queue.add(req(12, 0));
    queue.add(req(4, 1));
    queue.add(req(9, 2));

    assert_eq!(owners(&queue), vec![1, 2, 0]);
    assert_eq!(queue.rank_of(PeerId(1)), Some(0));
    assert_eq!(queue.rank_of(PeerId(0)), Some(2));
}

#[test]
fn equal_timestamps_break_ties_by_smaller_id() {
    let mut queue = RequestQueue::new();
    queue.add(req(5, 1));
    queue.add(req(5, 0));

    assert_eq!(owners(&queue), vec![0, 1]);
    assert!(req(5, 0).precedes(&req(5, 1)));
    assert!(!req(5, 1).precedes(&req(5, 0)));
}

#[test]
fn add_replaces_existing_request_from_same_owner() {
    let mut queue = RequestQueue::new();
    queue.add(req(3, 2));
    queue.add(req(8, 1));
    queue.add(req(10, 2));

    assert_eq!(queue.len(), 2);
    assert_eq!(owners(&queue), vec![1, 2]);
    assert_eq!(queue.get(PeerId(2)), Some(&req(10, 2)));
}

#[test]
fn remove_by_owner_preserves_order() {
    let mut queue = RequestQueue::new();
    queue.add(req(1, 3));
    queue.add(req(2, 1));
    queue.add(req(3, 2));

    assert_eq!(queue.remove_by_owner(PeerId(1)), Some(req(2, 1)));
    assert_eq!(owners(&queue), vec![3, 2]);
    assert!(!queue.contains(PeerId(1)));
}

#[test]
fn remove_missing_owner_is_noop() {
    let mut queue = RequestQueue::new();
    queue.add(req(1, 0));
    assert_eq!(queue.remove_by_owner(PeerId(5)), None);
    assert_eq!(queue.len(), 1);
}

#[test]
fn k_capacity_scenario_orders_by_timestamp_then_owner() {
    let mut queue = RequestQueue::new();
    for (ts, owner) in [(14, 0), (13, 1), (12, 2), (11, 3), (10, 4)] {
        queue.add(req(ts, owner));
    }

    assert_eq!(owners(&queue), vec![4, 3, 2, 1, 0]);
    let admitted: Vec<_> = PeerId::all(5)
        .filter(|p| queue.rank_of(*p).is_some_and(|rank| rank < 3))
        .collect();
    assert_eq!(admitted, vec![PeerId(2), PeerId(3), PeerId(4)]);
}

#[derive(Debug, Clone)]
enum QueueOp {
    Add(u64, u32),
    Remove(u32),
}

fn arb_op() -> impl Strategy<Value = QueueOp> {
    prop_oneof![
        3 => (0u64..20, 0u32..6).prop_map(|(ts, owner)| QueueOp::Add(ts, owner)),
        1 => (0u32..6).prop_map(QueueOp::Remove),
    ]
}

proptest! {
    #[test]
    fn queue_stays_sorted_with_unique_owners(ops in proptest::collection::vec(arb_op(), 0..48)) {
        let mut queue = RequestQueue::new();
        for op in ops {
            match op {
                QueueOp::Add(ts, owner) => queue.add(req(ts, owner)),
                QueueOp::Remove(owner) => {
                    queue.remove_by_owner(PeerId(owner));
                }
            }

            let items: Vec<_> = queue.iter().copied().collect();
            for pair in items.windows(2) {
                prop_assert!(pair[0] < pair[1], "queue not sorted: {:?}", items);
            }
            let unique: HashSet<_> = items.iter().map(|r| r.owner).collect();
            prop_assert_eq!(unique.len(), items.len());
        }
    }
}
