// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lamport logical clock
//!
//! Each process owns exactly one clock. It is never shared; peers only see
//! its values through message timestamps.

/// Logical time as carried on the wire
pub type Timestamp = u64;

/// Per-process Lamport clock
///
/// The value strictly increases on every local event and every receive, so
/// if event A causally precedes event B then `clock(A) < clock(B)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LamportClock {
    value: Timestamp,
}

impl LamportClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value without advancing
    pub fn now(&self) -> Timestamp {
        self.value
    }

    /// Advance for a local event (used before every send) and return the new value
    pub fn tick(&mut self) -> Timestamp {
        self.value += 1;
        self.value
    }

    /// Merge a received timestamp: `max(local, received) + 1`
    pub fn observe(&mut self, received: Timestamp) -> Timestamp {
        self.value = self.value.max(received) + 1;
        self.value
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
