// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects and events produced by the node state machine

use crate::clock::Timestamp;
use crate::id::{PeerId, PoolId};
use crate::message::Message;
use serde::{Deserialize, Serialize};

/// Side effects the node asks its runtime to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send to every other process
    Broadcast(Message),
    /// Send to one process
    Send { to: PeerId, message: Message },
    /// The critical section on `pool` may begin
    Enter { pool: PoolId },
    /// Emit an event for observers
    Emit(Event),
}

/// Events emitted by the node state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    RequestIssued {
        peer: PeerId,
        pool: PoolId,
        timestamp: Timestamp,
    },
    Admitted {
        peer: PeerId,
        pool: PoolId,
        timestamp: Timestamp,
    },
    Released {
        peer: PeerId,
        pool: PoolId,
        timestamp: Timestamp,
    },
    ReplyDeferred {
        peer: PeerId,
        pool: PoolId,
        to: PeerId,
    },
    AckSent {
        peer: PeerId,
        pool: PoolId,
        to: PeerId,
    },
    PeerDeparted {
        peer: PeerId,
        departed: PeerId,
    },
    Departed {
        peer: PeerId,
        timestamp: Timestamp,
    },
}

impl Event {
    /// Event name in `category:action` form
    pub fn name(&self) -> &'static str {
        match self {
            Event::RequestIssued { .. } => "request:issued",
            Event::Admitted { .. } => "section:admitted",
            Event::Released { .. } => "section:released",
            Event::ReplyDeferred { .. } => "reply:deferred",
            Event::AckSent { .. } => "reply:ack",
            Event::PeerDeparted { .. } => "peer:departed",
            Event::Departed { .. } => "node:departed",
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
