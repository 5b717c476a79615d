// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake transport for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Transport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tn_core::{Message, PeerId};

/// Recorded transport call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Send { to: PeerId, message: Message },
    Broadcast { message: Message },
}

/// Transport that records outbound traffic and replays scripted inbound messages
#[derive(Clone)]
pub struct FakeTransport {
    rank: PeerId,
    size: usize,
    calls: Arc<Mutex<Vec<TransportCall>>>,
    inbound: Arc<Mutex<VecDeque<Message>>>,
}

impl FakeTransport {
    pub fn new(rank: PeerId, size: usize) -> Self {
        Self {
            rank,
            size,
            calls: Arc::default(),
            inbound: Arc::default(),
        }
    }

    /// Queue a message for the next `recv`
    pub fn push_inbound(&self, message: Message) {
        self.inbound
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(message);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Every message sent, with broadcasts listed once
    pub fn sent(&self) -> Vec<Message> {
        self.calls()
            .into_iter()
            .map(|call| match call {
                TransportCall::Send { message, .. } | TransportCall::Broadcast { message } => {
                    message
                }
            })
            .collect()
    }

    fn record(&self, call: TransportCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

#[async_trait]
impl Transport for FakeTransport {
    fn rank(&self) -> PeerId {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    async fn send_to(&self, to: PeerId, message: Message) -> Result<(), TransportError> {
        if to.index() >= self.size {
            return Err(TransportError::UnknownPeer(to));
        }
        self.record(TransportCall::Send { to, message });
        Ok(())
    }

    async fn broadcast(&self, message: Message) -> Result<(), TransportError> {
        self.record(TransportCall::Broadcast { message });
        Ok(())
    }

    /// Replays scripted messages; `Closed` once the script runs out
    async fn recv(&mut self) -> Result<Message, TransportError> {
        self.inbound
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .ok_or(TransportError::Closed)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
