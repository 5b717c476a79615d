// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whole clusters over the in-memory mesh never exceed pool capacity

use std::time::Duration;
use tn_adapters::FakeWorkload;
use tn_core::{ClusterConfig, PoolConfig, Protocol};
use tn_engine::{run_cluster, ClusterReport};

async fn run(config: &ClusterConfig) -> ClusterReport {
    tokio::time::timeout(
        Duration::from_secs(60),
        run_cluster(config, FakeWorkload::with_hold(Duration::from_millis(2))),
    )
    .await
    .expect("cluster deadlocked")
    .unwrap()
}

fn assert_safe_and_complete(config: &ClusterConfig, report: &ClusterReport) {
    let expected = u64::from(config.peers) * u64::from(config.operations) * config.pools.len() as u64;
    assert_eq!(report.total_admissions(), expected);
    for pool in &report.pools {
        assert!(
            pool.peak <= pool.slot.capacity,
            "{} peaked at {} with capacity {}",
            pool.slot,
            pool.peak,
            pool.slot.capacity
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn steal_then_fence() {
    let config = ClusterConfig::default()
        .with_peers(6)
        .with_operations(3)
        .with_pools(vec![PoolConfig::new("steal", 1), PoolConfig::new("fence", 3)]);
    let report = run(&config).await;
    assert_safe_and_complete(&config, &report);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn partitioned_houses() {
    let config = ClusterConfig::default()
        .with_peers(5)
        .with_operations(4)
        .with_pools(vec![PoolConfig::new("house", 1).with_instances(5)]);
    let report = run(&config).await;
    assert_safe_and_complete(&config, &report);
    assert_eq!(report.pools.len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn quorum_then_pooled() {
    let config = ClusterConfig::default()
        .with_peers(5)
        .with_operations(3)
        .with_pools(vec![
            PoolConfig::new("house", 1).with_protocol(Protocol::Quorum),
            PoolConfig::new("fence", 2),
        ]);
    let report = run(&config).await;
    assert_safe_and_complete(&config, &report);
}
