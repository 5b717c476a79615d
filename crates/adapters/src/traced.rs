// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::transport::{Transport, TransportError};
use crate::workload::Workload;
use async_trait::async_trait;
use std::time::Duration;
use tn_core::{Message, PeerId, PoolSlot};
use tracing::Instrument;

/// Wrapper that adds tracing to any Transport
pub struct TracedTransport<T> {
    inner: T,
}

impl<T> TracedTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: Transport> Transport for TracedTransport<T> {
    fn rank(&self) -> PeerId {
        self.inner.rank()
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    async fn send_to(&self, to: PeerId, message: Message) -> Result<(), TransportError> {
        let result = self.inner.send_to(to, message).await;
        match &result {
            Ok(()) => tracing::trace!(%to, %message, "sent"),
            Err(e) => tracing::error!(%to, %message, error = %e, "send failed"),
        }
        result
    }

    async fn broadcast(&self, message: Message) -> Result<(), TransportError> {
        let span = tracing::debug_span!("transport.broadcast", %message);
        async {
            let result = self.inner.broadcast(message).await;
            match &result {
                Ok(()) => tracing::debug!(peers = self.inner.size().saturating_sub(1), "broadcast"),
                Err(e) => tracing::error!(error = %e, "broadcast failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn recv(&mut self) -> Result<Message, TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.recv().await;
        let waited_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(message) => tracing::debug!(%message, waited_ms, "received"),
            Err(e) => tracing::error!(error = %e, waited_ms, "recv failed"),
        }
        result
    }
}

/// Wrapper that adds tracing to any Workload
#[derive(Clone)]
pub struct TracedWorkload<W> {
    inner: W,
}

impl<W> TracedWorkload<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<W: Workload> Workload for TracedWorkload<W> {
    async fn on_admitted(&self, rank: PeerId, slot: &PoolSlot) -> Duration {
        let span = tracing::info_span!("workload.hold", %rank, pool = %slot);
        async {
            tracing::info!(capacity = slot.capacity, "holding");
            let held = self.inner.on_admitted(rank, slot).await;
            tracing::info!(held_ms = held.as_millis() as u64, "done");
            held
        }
        .instrument(span)
        .await
    }

    async fn rest(&self, rank: PeerId) {
        let start = std::time::Instant::now();
        self.inner.rest(rank).await;
        tracing::trace!(%rank, rested_ms = start.elapsed().as_millis() as u64, "rested");
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
