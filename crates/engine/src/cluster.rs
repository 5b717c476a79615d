// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run a whole cluster in one process

use crate::error::RuntimeError;
use crate::runtime::{Peer, PeerReport};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tn_adapters::{
    mesh, MonitoredWorkload, OccupancyMonitor, PoolOccupancy, TracedTransport, TracedWorkload,
    Workload,
};
use tn_core::ClusterConfig;
use tokio::sync::Barrier;
use tokio::task::JoinSet;
use tracing::Instrument;

/// Outcome of a cluster run
#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    /// One report per process, by rank
    pub peers: Vec<PeerReport>,
    /// Every pool that was entered, by id
    pub pools: Vec<PoolOccupancy>,
    pub elapsed_ms: u64,
}

impl ClusterReport {
    /// Pools whose peak holder count exceeded their capacity
    pub fn violations(&self) -> Vec<&PoolOccupancy> {
        self.pools.iter().filter(|p| p.violated()).collect()
    }

    pub fn total_admissions(&self) -> u64 {
        self.peers.iter().map(|p| u64::from(p.admissions)).sum()
    }
}

/// Spawn one task per configured process over an in-memory mesh and wait
/// for all of them
///
/// The first failing process aborts the rest.
pub async fn run_cluster<W: Workload>(
    config: &ClusterConfig,
    workload: W,
) -> Result<ClusterReport, RuntimeError> {
    config.validate()?;

    let size = config.peers as usize;
    let monitor = OccupancyMonitor::new();
    let workload = MonitoredWorkload::new(TracedWorkload::new(workload), monitor.clone());
    let barrier = Arc::new(Barrier::new(size));
    let start = Instant::now();

    tracing::info!(
        peers = size,
        operations = config.operations,
        pools = config.pool_specs().len(),
        "starting cluster"
    );

    let mut tasks = JoinSet::new();
    for transport in mesh(config.peers) {
        let peer = Peer::new(TracedTransport::new(transport), workload.clone(), config)?
            .with_barrier(barrier.clone());
        let span = tracing::info_span!("peer", rank = %peer.rank());
        tasks.spawn(peer.run().instrument(span));
    }

    let mut peers = Vec::with_capacity(size);
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined.map_err(RuntimeError::from).and_then(|result| result);
        match outcome {
            Ok(report) => peers.push(report),
            Err(e) => {
                tracing::error!(error = %e, "peer failed, stopping cluster");
                tasks.abort_all();
                return Err(e);
            }
        }
    }
    peers.sort_by_key(|report| report.rank);

    let report = ClusterReport {
        peers,
        pools: monitor.snapshot(),
        elapsed_ms: start.elapsed().as_millis() as u64,
    };
    tracing::info!(
        admissions = report.total_admissions(),
        violations = report.violations().len(),
        elapsed_ms = report.elapsed_ms,
        "cluster finished"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;
