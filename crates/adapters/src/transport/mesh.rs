// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fully connected mesh
//!
//! Every endpoint owns one unbounded inbox and a sender into every other
//! endpoint's inbox. Messages travel as encoded frames.

use super::{Transport, TransportError};
use async_trait::async_trait;
use tn_core::{Frame, Message, PeerId};
use tokio::sync::mpsc;

/// One process's endpoint on the mesh
#[derive(Debug)]
pub struct MeshTransport {
    rank: PeerId,
    /// Indexed by destination; `None` at our own rank
    outboxes: Vec<Option<mpsc::UnboundedSender<Frame>>>,
    inbox: mpsc::UnboundedReceiver<Frame>,
}

/// Build `size` connected endpoints, indexed by rank
pub fn mesh(size: u32) -> Vec<MeshTransport> {
    let (senders, receivers): (Vec<_>, Vec<_>) =
        (0..size).map(|_| mpsc::unbounded_channel::<Frame>()).unzip();

    receivers
        .into_iter()
        .zip(PeerId::all(size))
        .map(|(inbox, rank)| MeshTransport {
            rank,
            outboxes: senders
                .iter()
                .enumerate()
                .map(|(dest, tx)| (dest != rank.index()).then(|| tx.clone()))
                .collect(),
            inbox,
        })
        .collect()
}

#[async_trait]
impl Transport for MeshTransport {
    fn rank(&self) -> PeerId {
        self.rank
    }

    fn size(&self) -> usize {
        self.outboxes.len()
    }

    async fn send_to(&self, to: PeerId, message: Message) -> Result<(), TransportError> {
        if to == self.rank {
            return Err(TransportError::SelfAddressed(to));
        }
        let outbox = self
            .outboxes
            .get(to.index())
            .and_then(Option::as_ref)
            .ok_or(TransportError::UnknownPeer(to))?;
        outbox
            .send(message.encode())
            .map_err(|_| TransportError::Disconnected(to))
    }

    async fn recv(&mut self) -> Result<Message, TransportError> {
        let frame = self.inbox.recv().await.ok_or(TransportError::Closed)?;
        Ok(Message::decode(&frame)?)
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
