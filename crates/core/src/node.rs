// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-process protocol state machine
//!
//! A [`Node`] owns everything one process knows: its Lamport clock, one
//! [`ResourcePool`] per pool in the arena, and the liveness of its peers.
//! Every input is applied synchronously and answered with the effects the
//! runtime must carry out. The node never performs I/O itself.

use crate::admission::{Admission, Reply, WaitReason};
use crate::clock::{LamportClock, Timestamp};
use crate::config::PoolSpec;
use crate::effect::{Effect, Event};
use crate::id::{PeerId, PoolId};
use crate::liveness::LivenessTracker;
use crate::message::{Message, MessageKind};
use crate::pool::ResourcePool;
use crate::queue::Request;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where a node is in its request cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum Phase {
    Idle,
    Requesting { pool: PoolId },
    InSection { pool: PoolId },
    Departed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Requesting { pool } => write!(f, "requesting {}", pool),
            Phase::InSection { pool } => write!(f, "in section {}", pool),
            Phase::Departed => write!(f, "departed"),
        }
    }
}

/// Inputs that drive a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeInput {
    /// Ask for a slot in `pool`
    Request { pool: PoolId },
    /// A message arrived from a peer
    Deliver(Message),
    /// Leave the current critical section
    Exit,
    /// Announce that this process is finished
    Depart,
}

impl NodeInput {
    fn name(&self) -> &'static str {
        match self {
            NodeInput::Request { .. } => "request",
            NodeInput::Deliver(_) => "deliver",
            NodeInput::Exit => "exit",
            NodeInput::Depart => "depart",
        }
    }
}

/// Inputs a node cannot apply
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("cannot {input} while {phase}")]
    InvalidTransition { phase: Phase, input: &'static str },
    #[error("unknown peer: {0}")]
    UnknownPeer(PeerId),
    #[error("unknown pool: {0}")]
    UnknownPool(PoolId),
    #[error("message addressed from self: {0}")]
    SelfMessage(Message),
    #[error("message carries no pool id: {0}")]
    MissingPool(Message),
}

/// One process's view of the protocol
#[derive(Debug, Clone)]
pub struct Node {
    id: PeerId,
    clock: LamportClock,
    pools: Vec<ResourcePool>,
    liveness: LivenessTracker,
    phase: Phase,
}

impl Node {
    /// A node for process `id` in a cluster of `peers` processes
    pub fn new(id: PeerId, peers: usize, pools: &[PoolSpec]) -> Self {
        Self {
            id,
            clock: LamportClock::new(),
            pools: pools.iter().map(|spec| ResourcePool::new(spec, peers)).collect(),
            liveness: LivenessTracker::new(id, peers),
            phase: Phase::Idle,
        }
    }

    pub fn id(&self) -> PeerId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current clock value
    pub fn clock(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn pool(&self, id: PoolId) -> Option<&ResourcePool> {
        self.pools.iter().find(|pool| pool.id() == id)
    }

    pub fn pools(&self) -> &[ResourcePool] {
        &self.pools
    }

    pub fn liveness(&self) -> &LivenessTracker {
        &self.liveness
    }

    /// Admission state of the pending request, if any
    pub fn admission(&self) -> Admission {
        match self.phase {
            Phase::Requesting { pool } => match self.pool(pool) {
                Some(state) => state.protocol().evaluate(state, self.id, &self.liveness),
                None => Admission::Waiting(WaitReason::NoRequest),
            },
            Phase::InSection { .. } => Admission::Granted,
            Phase::Idle | Phase::Departed => Admission::Waiting(WaitReason::NoRequest),
        }
    }

    /// Apply one input and return the effects to execute, in order
    pub fn transition(&mut self, input: NodeInput) -> Result<Vec<Effect>, ProtocolError> {
        match input {
            NodeInput::Request { pool } => self.request(pool),
            NodeInput::Deliver(message) => self.deliver(message),
            NodeInput::Exit => self.exit(),
            NodeInput::Depart => self.depart(),
        }
    }

    fn request(&mut self, pool: PoolId) -> Result<Vec<Effect>, ProtocolError> {
        if self.phase != Phase::Idle {
            return Err(self.invalid(&NodeInput::Request { pool }));
        }
        let index = self.pool_index(pool)?;

        // decide, then stamp
        self.clock.tick();
        let request = Request::new(self.clock.tick(), self.id);

        self.pools[index].begin(request);
        self.phase = Phase::Requesting { pool };

        let mut effects = vec![
            Effect::Broadcast(Message::request(request, pool)),
            Effect::Emit(Event::RequestIssued {
                peer: self.id,
                pool,
                timestamp: request.timestamp,
            }),
        ];
        self.try_admit(&mut effects);
        Ok(effects)
    }

    fn deliver(&mut self, message: Message) -> Result<Vec<Effect>, ProtocolError> {
        if self.phase == Phase::Departed {
            return Ok(Vec::new());
        }

        let sender = message.sender;
        if sender == self.id {
            return Err(ProtocolError::SelfMessage(message));
        }
        if sender.index() >= self.liveness.size() {
            return Err(ProtocolError::UnknownPeer(sender));
        }
        let index = match (message.kind, message.pool) {
            (MessageKind::Terminate, _) => None,
            (_, Some(pool)) => Some(self.pool_index(pool)?),
            (_, None) => return Err(ProtocolError::MissingPool(message)),
        };

        self.clock.observe(message.timestamp);
        // Channels are FIFO and clocks monotone, so any message bounds every
        // pool's view of the sender.
        for pool in &mut self.pools {
            pool.record_seen(sender, message.timestamp);
        }

        let mut effects = Vec::new();
        match (message.kind, index) {
            (MessageKind::Request, Some(index)) => {
                self.on_request(index, Request::new(message.timestamp, sender), &mut effects);
            }
            (MessageKind::Release, Some(index)) => {
                self.pools[index].dequeue(sender);
            }
            (MessageKind::Ack, Some(index)) => {
                self.pools[index].mark_ack(sender);
            }
            (MessageKind::Terminate, _) => {
                if self.liveness.mark_inactive(sender) {
                    effects.push(Effect::Emit(Event::PeerDeparted {
                        peer: self.id,
                        departed: sender,
                    }));
                }
            }
            (_, None) => return Err(ProtocolError::MissingPool(message)),
        }

        self.try_admit(&mut effects);
        Ok(effects)
    }

    fn on_request(&mut self, index: usize, incoming: Request, effects: &mut Vec<Effect>) {
        let pool = &mut self.pools[index];
        pool.enqueue(incoming);

        match pool.protocol().reply_to(pool, incoming) {
            None => {}
            Some(Reply::Defer) => {
                pool.defer(incoming.owner);
                effects.push(Effect::Emit(Event::ReplyDeferred {
                    peer: self.id,
                    pool: pool.id(),
                    to: incoming.owner,
                }));
            }
            Some(Reply::Ack) => {
                let id = pool.id();
                self.send_acks(id, vec![incoming.owner], effects);
            }
        }
    }

    fn try_admit(&mut self, effects: &mut Vec<Effect>) {
        let Phase::Requesting { pool } = self.phase else {
            return;
        };
        if !self.admission().is_granted() {
            return;
        }

        let timestamp = self.clock.tick();
        self.phase = Phase::InSection { pool };
        effects.push(Effect::Enter { pool });
        effects.push(Effect::Emit(Event::Admitted {
            peer: self.id,
            pool,
            timestamp,
        }));
    }

    fn exit(&mut self) -> Result<Vec<Effect>, ProtocolError> {
        let Phase::InSection { pool } = self.phase else {
            return Err(self.invalid(&NodeInput::Exit));
        };
        let index = self.pool_index(pool)?;

        let timestamp = self.clock.tick();
        let deferred = self.pools[index].finish();
        self.phase = Phase::Idle;

        let mut effects = vec![
            Effect::Broadcast(Message::release(timestamp, self.id, pool)),
            Effect::Emit(Event::Released {
                peer: self.id,
                pool,
                timestamp,
            }),
        ];
        self.send_acks(pool, deferred, &mut effects);
        Ok(effects)
    }

    fn depart(&mut self) -> Result<Vec<Effect>, ProtocolError> {
        if self.phase != Phase::Idle {
            return Err(self.invalid(&NodeInput::Depart));
        }

        let mut effects = Vec::new();
        for index in 0..self.pools.len() {
            let deferred = self.pools[index].take_deferred();
            let pool = self.pools[index].id();
            self.send_acks(pool, deferred, &mut effects);
        }

        let timestamp = self.clock.tick();
        self.phase = Phase::Departed;
        effects.push(Effect::Broadcast(Message::terminate(timestamp, self.id)));
        effects.push(Effect::Emit(Event::Departed {
            peer: self.id,
            timestamp,
        }));
        Ok(effects)
    }

    /// One ACK per peer, each with its own clock tick
    fn send_acks(&mut self, pool: PoolId, peers: Vec<PeerId>, effects: &mut Vec<Effect>) {
        for to in peers {
            if !self.liveness.is_active(to) {
                continue;
            }
            let timestamp = self.clock.tick();
            effects.push(Effect::Send {
                to,
                message: Message::ack(timestamp, self.id, pool),
            });
            effects.push(Effect::Emit(Event::AckSent {
                peer: self.id,
                pool,
                to,
            }));
        }
    }

    fn pool_index(&self, id: PoolId) -> Result<usize, ProtocolError> {
        self.pools
            .iter()
            .position(|pool| pool.id() == id)
            .ok_or(ProtocolError::UnknownPool(id))
    }

    fn invalid(&self, input: &NodeInput) -> ProtocolError {
        ProtocolError::InvalidTransition {
            phase: self.phase,
            input: input.name(),
        }
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
