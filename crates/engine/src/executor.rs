// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use thiserror::Error;
use tn_adapters::{Transport, TransportError};
use tn_core::{Effect, Event, Message, PoolId};

/// Errors that can occur during effect execution
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Executes node effects against a transport
pub struct Executor<T> {
    transport: T,
    sent: u64,
    received: u64,
}

impl<T: Transport> Executor<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            sent: 0,
            received: 0,
        }
    }

    /// Frames handed to the transport so far
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Messages taken from the transport so far
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Execute a single effect
    ///
    /// Returns the pool when the effect admits this process into a section.
    pub async fn execute(&mut self, effect: Effect) -> Result<Option<PoolId>, ExecuteError> {
        use tn_core::TracedEffect;

        tracing::debug!(effect = effect.name(), fields = ?effect.fields(), "executing");

        match effect {
            Effect::Broadcast(message) => {
                self.transport.broadcast(message).await?;
                self.sent += self.transport.size().saturating_sub(1) as u64;
                Ok(None)
            }
            Effect::Send { to, message } => {
                self.transport.send_to(to, message).await?;
                self.sent += 1;
                Ok(None)
            }
            Effect::Enter { pool } => Ok(Some(pool)),
            Effect::Emit(event) => {
                log_event(&event);
                Ok(None)
            }
        }
    }

    /// Block until the next message arrives
    pub async fn recv(&mut self) -> Result<Message, ExecuteError> {
        let message = self.transport.recv().await?;
        self.received += 1;
        Ok(message)
    }
}

fn log_event(event: &Event) {
    match event {
        Event::Admitted {
            pool, timestamp, ..
        } => tracing::info!(%pool, ts = timestamp, "admitted"),
        Event::Released {
            pool, timestamp, ..
        } => tracing::info!(%pool, ts = timestamp, "released"),
        Event::PeerDeparted { departed, .. } => tracing::info!(%departed, "peer departed"),
        Event::Departed { timestamp, .. } => tracing::info!(ts = timestamp, "departed"),
        Event::RequestIssued {
            pool, timestamp, ..
        } => tracing::debug!(%pool, ts = timestamp, "requested"),
        Event::ReplyDeferred { pool, to, .. } => tracing::debug!(%pool, %to, "reply deferred"),
        Event::AckSent { pool, to, .. } => tracing::debug!(%pool, %to, "ack sent"),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
