// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry requests and the per-pool request queue
//!
//! Requests are totally ordered by `(timestamp, owner)`: earlier timestamps
//! first, equal timestamps broken by the smaller process id.

use crate::clock::Timestamp;
use crate::id::PeerId;
use serde::{Deserialize, Serialize};

/// A pending entry request
///
/// Field order matters: the derived `Ord` compares `timestamp` first and
/// `owner` second, which is exactly the priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Request {
    pub timestamp: Timestamp,
    pub owner: PeerId,
}

impl Request {
    pub fn new(timestamp: Timestamp, owner: PeerId) -> Self {
        Self { timestamp, owner }
    }

    /// True if `self` has priority over `other`
    pub fn precedes(&self, other: &Request) -> bool {
        self < other
    }
}

/// Sorted queue of pending requests for one pool
///
/// Holds at most one request per owner and is always sorted by priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestQueue {
    items: Vec<Request>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a request, replacing any earlier one from the same owner
    pub fn add(&mut self, request: Request) {
        self.items.retain(|r| r.owner != request.owner);
        self.items.push(request);
        self.items.sort_unstable();
    }

    /// Remove the entry owned by `owner`, if any
    pub fn remove_by_owner(&mut self, owner: PeerId) -> Option<Request> {
        let index = self.items.iter().position(|r| r.owner == owner)?;
        Some(self.items.remove(index))
    }

    /// 0-based priority position of `owner`'s request
    pub fn rank_of(&self, owner: PeerId) -> Option<usize> {
        self.items.iter().position(|r| r.owner == owner)
    }

    pub fn get(&self, owner: PeerId) -> Option<&Request> {
        self.items.iter().find(|r| r.owner == owner)
    }

    pub fn contains(&self, owner: PeerId) -> bool {
        self.rank_of(owner).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Requests in priority order
    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
