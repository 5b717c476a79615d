// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Admission control
//!
//! Two interchangeable protocols decide, from purely local state, whether the
//! local pending request may enter its pool:
//! - **Witness** - Lamport-style queue order generalized to capacity `k`; no
//!   acknowledgments, sufficiency inferred from ordinary traffic
//! - **Quorum** - Ricart-Agrawala style explicit ACK from every active peer
//!   (capacity 1 only)

pub mod quorum;
pub mod witness;

use crate::id::PeerId;
use crate::liveness::LivenessTracker;
use crate::pool::ResourcePool;
use crate::queue::Request;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Admission protocol, chosen per pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    #[default]
    Witness,
    Quorum,
}

impl Protocol {
    /// Check whether the local pending request on `pool` may enter now
    pub fn evaluate(
        self,
        pool: &ResourcePool,
        me: PeerId,
        liveness: &LivenessTracker,
    ) -> Admission {
        match self {
            Protocol::Witness => witness::evaluate(pool, me, liveness),
            Protocol::Quorum => quorum::evaluate(pool, liveness),
        }
    }

    /// How to answer a remote REQUEST; `None` when the protocol sends no reply
    pub fn reply_to(self, pool: &ResourcePool, incoming: Request) -> Option<Reply> {
        match self {
            Protocol::Witness => None,
            Protocol::Quorum => Some(quorum::reply_to(pool, incoming)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Protocol::Witness => "witness",
            Protocol::Quorum => "quorum",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Granted,
    Waiting(WaitReason),
}

impl Admission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Admission::Granted)
    }
}

/// Why a request cannot enter yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitReason {
    /// No local request on this pool
    NoRequest,
    /// Not among the `capacity` highest-priority requests
    Rank { rank: usize, capacity: usize },
    /// Nothing later than our request has arrived from `peer`
    Witness { peer: PeerId },
    /// Active peers that have not acknowledged
    Acks { missing: usize },
}

impl fmt::Display for WaitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitReason::NoRequest => write!(f, "no pending request"),
            WaitReason::Rank { rank, capacity } => {
                write!(f, "queue rank {} not below capacity {}", rank, capacity)
            }
            WaitReason::Witness { peer } => write!(f, "waiting for a later message from {}", peer),
            WaitReason::Acks { missing } => write!(f, "waiting for {} acknowledgment(s)", missing),
        }
    }
}

/// Answer to a remote REQUEST under the quorum protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Ack,
    Defer,
}
