// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for protocol scenarios

#![allow(dead_code)]

use std::collections::VecDeque;
use tn_core::{Effect, Message, Node, NodeInput, PeerId, Phase, PoolId, PoolSpec, Protocol};

pub fn pool(capacity: usize, protocol: Protocol) -> PoolSpec {
    PoolSpec {
        id: PoolId(0),
        name: "cs".to_string(),
        instance: 0,
        capacity,
        protocol,
    }
}

pub const POOL: PoolId = PoolId(0);

/// Nodes joined by per-pair FIFO channels that only move when told to
pub struct Harness {
    pub nodes: Vec<Node>,
    channels: Vec<Vec<VecDeque<Message>>>,
    /// Admissions in the order they happened
    pub admitted: Vec<PeerId>,
}

impl Harness {
    pub fn new(peers: usize, spec: PoolSpec) -> Self {
        Self {
            nodes: (0..peers)
                .map(|i| Node::new(PeerId(i as u32), peers, std::slice::from_ref(&spec)))
                .collect(),
            channels: vec![vec![VecDeque::new(); peers]; peers],
            admitted: Vec::new(),
        }
    }

    /// Apply an input to node `i`, route its effects and return them
    pub fn input(&mut self, i: u32, input: NodeInput) -> Vec<Effect> {
        let effects = self.nodes[i as usize].transition(input).unwrap();
        for effect in effects.iter().cloned() {
            match effect {
                Effect::Broadcast(message) => {
                    for to in 0..self.nodes.len() {
                        if to != i as usize {
                            self.channels[i as usize][to].push_back(message);
                        }
                    }
                }
                Effect::Send { to, message } => {
                    self.channels[i as usize][to.index()].push_back(message)
                }
                Effect::Enter { .. } => self.admitted.push(PeerId(i)),
                Effect::Emit(_) => {}
            }
        }
        effects
    }

    /// Request the pool on node `i` and return the REQUEST it broadcast
    pub fn request(&mut self, i: u32) -> Message {
        self.input(i, NodeInput::Request { pool: POOL })
            .into_iter()
            .find_map(|effect| match effect {
                Effect::Broadcast(message) => Some(message),
                _ => None,
            })
            .unwrap()
    }

    pub fn exit(&mut self, i: u32) {
        self.input(i, NodeInput::Exit);
    }

    pub fn depart(&mut self, i: u32) {
        self.input(i, NodeInput::Depart);
    }

    /// Inject a message that did not travel through a channel
    pub fn inject(&mut self, to: u32, message: Message) {
        self.input(to, NodeInput::Deliver(message));
    }

    /// Deliver the next message from `from` to `to`
    pub fn step(&mut self, from: u32, to: u32) -> bool {
        match self.channels[from as usize][to as usize].pop_front() {
            Some(message) => {
                self.input(to, NodeInput::Deliver(message));
                true
            }
            None => false,
        }
    }

    /// Deliver until every channel is empty, checking capacity after each step
    pub fn settle(&mut self, capacity: usize) {
        let n = self.nodes.len() as u32;
        loop {
            let mut moved = false;
            for from in 0..n {
                for to in 0..n {
                    if self.step(from, to) {
                        moved = true;
                        assert!(self.holders().len() <= capacity);
                    }
                }
            }
            if !moved {
                break;
            }
        }
    }

    pub fn phase(&self, i: u32) -> Phase {
        self.nodes[i as usize].phase()
    }

    pub fn holders(&self) -> Vec<PeerId> {
        self.nodes
            .iter()
            .filter(|n| matches!(n.phase(), Phase::InSection { .. }))
            .map(|n| n.id())
            .collect()
    }
}
