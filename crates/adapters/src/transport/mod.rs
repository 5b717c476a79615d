// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Point-to-point message transport

mod mesh;

pub use mesh::{mesh, MeshTransport};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransport, TransportCall};

use async_trait::async_trait;
use thiserror::Error;
use tn_core::{Message, PeerId, WireError};

/// Errors from transport operations
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("peer {0} is no longer reachable")]
    Disconnected(PeerId),
    #[error("unknown peer: {0}")]
    UnknownPeer(PeerId),
    #[error("cannot send to self ({0})")]
    SelfAddressed(PeerId),
    #[error("inbox closed: every peer has hung up")]
    Closed,
    #[error("malformed frame: {0}")]
    Wire(#[from] WireError),
}

/// Reliable, ordered, point-to-point delivery between the processes of a run
///
/// Messages from one sender to one receiver arrive in the order they were sent.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// This process's id
    fn rank(&self) -> PeerId;

    /// Number of processes, including this one
    fn size(&self) -> usize;

    async fn send_to(&self, to: PeerId, message: Message) -> Result<(), TransportError>;

    /// Send to every process except this one
    async fn broadcast(&self, message: Message) -> Result<(), TransportError> {
        let me = self.rank();
        for peer in (0..self.size()).filter_map(PeerId::from_index).filter(|p| *p != me) {
            self.send_to(peer, message).await?;
        }
        Ok(())
    }

    /// Wait for the next inbound message
    async fn recv(&mut self) -> Result<Message, TransportError>;
}
