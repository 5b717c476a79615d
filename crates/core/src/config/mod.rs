// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster configuration
//!
//! One TOML document describes a run: process count, operations per process,
//! the ordered list of pools each operation visits, and the workload timing.

mod pool;
mod workload;

pub use pool::{PoolConfig, PoolSpec, Stage};
pub use workload::{ChooserKind, WorkloadConfig};

use crate::admission::Protocol;
use crate::id::PoolId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("peers must be at least 1")]
    NoPeers,
    #[error("at least one [[pool]] is required")]
    NoPools,
    #[error("duplicate pool name: {0}")]
    DuplicatePool(String),
    #[error("pool {0}: capacity must be at least 1")]
    ZeroCapacity(String),
    #[error("pool {0}: instances must be at least 1")]
    ZeroInstances(String),
    #[error("pool {pool}: quorum protocol requires capacity 1, got {capacity}")]
    QuorumCapacity { pool: String, capacity: u32 },
    #[error("workload: min_hold exceeds max_hold")]
    HoldRange,
    #[error("workload: min_rest exceeds max_rest")]
    RestRange,
    #[error("too many pool instances for the wire format: {0}")]
    TooManyPools(u64),
}

/// A complete run description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfig {
    /// Number of processes
    pub peers: u32,
    /// Operation cycles each process performs before departing
    pub operations: u32,
    #[serde(default)]
    pub chooser: ChooserKind,
    #[serde(default)]
    pub workload: WorkloadConfig,
    /// Pools visited, in order, by every operation
    #[serde(rename = "pool", default)]
    pub pools: Vec<PoolConfig>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            peers: 4,
            operations: 2,
            chooser: ChooserKind::default(),
            workload: WorkloadConfig::default(),
            pools: vec![
                PoolConfig::new("house", 1),
                PoolConfig::new("fence", 2),
            ],
        }
    }
}

impl ClusterConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ClusterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_peers(mut self, peers: u32) -> Self {
        self.peers = peers;
        self
    }

    pub fn with_operations(mut self, operations: u32) -> Self {
        self.operations = operations;
        self
    }

    pub fn with_pools(mut self, pools: Vec<PoolConfig>) -> Self {
        self.pools = pools;
        self
    }

    pub fn with_workload(mut self, workload: WorkloadConfig) -> Self {
        self.workload = workload;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.peers == 0 {
            return Err(ConfigError::NoPeers);
        }
        if self.pools.is_empty() {
            return Err(ConfigError::NoPools);
        }

        let mut names = HashSet::new();
        for pool in &self.pools {
            if !names.insert(pool.name.as_str()) {
                return Err(ConfigError::DuplicatePool(pool.name.clone()));
            }
            if pool.capacity == 0 {
                return Err(ConfigError::ZeroCapacity(pool.name.clone()));
            }
            if pool.instances == 0 {
                return Err(ConfigError::ZeroInstances(pool.name.clone()));
            }
            if pool.protocol == Protocol::Quorum && pool.capacity != 1 {
                return Err(ConfigError::QuorumCapacity {
                    pool: pool.name.clone(),
                    capacity: pool.capacity,
                });
            }
        }

        let total: u64 = self.pools.iter().map(|p| u64::from(p.instances)).sum();
        if total > i32::MAX as u64 {
            return Err(ConfigError::TooManyPools(total));
        }

        self.workload.validate()
    }

    /// Flatten every pool instance into the arena every process shares
    ///
    /// Ids are assigned in declaration order, instances contiguous, so all
    /// processes agree on them without coordination.
    pub fn pool_specs(&self) -> Vec<PoolSpec> {
        self.stages()
            .into_iter()
            .zip(&self.pools)
            .flat_map(|(stage, pool)| {
                (0..stage.instances).map(move |instance| PoolSpec {
                    id: stage.pool(instance),
                    name: pool.name.clone(),
                    instance,
                    capacity: pool.capacity as usize,
                    protocol: pool.protocol,
                })
            })
            .collect()
    }

    /// One stage per configured pool, in visiting order
    pub fn stages(&self) -> Vec<Stage> {
        let mut next = 0u32;
        self.pools
            .iter()
            .map(|pool| {
                let stage = Stage {
                    name: pool.name.clone(),
                    first: PoolId(next),
                    instances: pool.instances,
                };
                next += pool.instances;
                stage
            })
            .collect()
    }
}
