// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tn-core: coordination core for turnstile
//!
//! This crate provides:
//! - Lamport clocks and per-pool request queues
//! - Witness (k-exclusion) and quorum admission protocols
//! - The per-process node state machine, driven by inputs and returning effects
//! - The fixed-size wire message
//! - Cluster configuration

pub mod admission;
pub mod clock;
pub mod config;
pub mod effect;
pub mod id;
pub mod liveness;
pub mod message;
pub mod node;
pub mod pool;
pub mod queue;
pub mod traced;

pub use admission::{Admission, Protocol, Reply, WaitReason};
pub use clock::{LamportClock, Timestamp};
pub use config::{
    ChooserKind, ClusterConfig, ConfigError, PoolConfig, PoolSpec, Stage, WorkloadConfig,
};
pub use effect::{Effect, Event};
pub use id::{PeerId, PoolId};
pub use liveness::LivenessTracker;
pub use message::{Frame, Message, MessageKind, WireError, FRAME_LEN};
pub use node::{Node, NodeInput, Phase, ProtocolError};
pub use pool::{PoolSlot, ResourcePool};
pub use queue::{Request, RequestQueue};
pub use traced::TracedEffect;
