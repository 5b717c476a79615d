// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event loop for one process

use crate::chooser::Chooser;
use crate::error::RuntimeError;
use crate::Executor;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tn_adapters::{Transport, Workload};
use tn_core::{
    Admission, ClusterConfig, Node, NodeInput, PeerId, PoolId, PoolSlot, ProtocolError, Stage,
    Timestamp,
};
use tokio::sync::Barrier;

/// What one process did over a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerReport {
    pub rank: PeerId,
    pub admissions: u32,
    pub messages_sent: u64,
    pub messages_received: u64,
    pub final_clock: Timestamp,
    pub held_ms: u64,
}

/// One process: a node driven by a transport, doing work through a workload
pub struct Peer<T, W> {
    node: Node,
    executor: Executor<T>,
    workload: W,
    stages: Vec<Stage>,
    chooser: Chooser,
    operations: u32,
    barrier: Option<Arc<Barrier>>,
    admissions: u32,
    held: Duration,
}

impl<T, W> Peer<T, W>
where
    T: Transport,
    W: Workload,
{
    pub fn new(transport: T, workload: W, config: &ClusterConfig) -> Result<Self, RuntimeError> {
        let configured = config.peers as usize;
        if transport.size() != configured {
            return Err(RuntimeError::SizeMismatch {
                transport: transport.size(),
                configured,
            });
        }

        Ok(Self {
            node: Node::new(transport.rank(), configured, &config.pool_specs()),
            executor: Executor::new(transport),
            workload,
            stages: config.stages(),
            chooser: Chooser::new(config.chooser),
            operations: config.operations,
            barrier: None,
            admissions: 0,
            held: Duration::ZERO,
        })
    }

    /// Wait on `barrier` after departing
    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn rank(&self) -> PeerId {
        self.node.id()
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Run every operation, depart, then wait for the rest of the cluster
    pub async fn run(mut self) -> Result<PeerReport, RuntimeError> {
        let rank = self.rank();
        tracing::info!(
            operations = self.operations,
            stages = self.stages.len(),
            "starting"
        );

        for op in 0..self.operations {
            for index in 0..self.stages.len() {
                let pool = self.chooser.choose(rank, op, index, &self.stages[index]);
                self.acquire(pool).await?;

                let slot = self.slot(pool)?;
                self.held += self.workload.on_admitted(rank, &slot).await;
                self.admissions += 1;

                self.apply(NodeInput::Exit).await?;
            }
            if op + 1 < self.operations {
                self.workload.rest(rank).await;
            }
        }

        self.apply(NodeInput::Depart).await?;
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        tracing::info!(admissions = self.admissions, clock = self.node.clock(), "finished");
        Ok(self.report())
    }

    /// Request `pool` and process messages until admitted
    async fn acquire(&mut self, pool: PoolId) -> Result<(), RuntimeError> {
        if self.apply(NodeInput::Request { pool }).await? {
            return Ok(());
        }
        loop {
            let message = self.executor.recv().await?;
            if self.apply(NodeInput::Deliver(message)).await? {
                return Ok(());
            }
            if let Admission::Waiting(reason) = self.node.admission() {
                tracing::trace!(%pool, %reason, "waiting");
            }
        }
    }

    /// Feed one input to the node and execute its effects. True once admitted.
    async fn apply(&mut self, input: NodeInput) -> Result<bool, RuntimeError> {
        let effects = self.node.transition(input)?;
        let mut entered = false;
        for effect in effects {
            entered |= self.executor.execute(effect).await?.is_some();
        }
        Ok(entered)
    }

    fn slot(&self, pool: PoolId) -> Result<PoolSlot, RuntimeError> {
        self.node
            .pool(pool)
            .map(|state| state.slot().clone())
            .ok_or(RuntimeError::Protocol(ProtocolError::UnknownPool(pool)))
    }

    fn report(&self) -> PeerReport {
        PeerReport {
            rank: self.rank(),
            admissions: self.admissions,
            messages_sent: self.executor.sent(),
            messages_received: self.executor.received(),
            final_clock: self.node.clock(),
            held_ms: self.held.as_millis() as u64,
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
