// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool declarations and their flattened form

use crate::admission::Protocol;
use crate::id::PoolId;
use serde::{Deserialize, Serialize};

/// A `[[pool]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolConfig {
    pub name: String,
    /// Concurrent holders allowed (k)
    #[serde(default = "default_one")]
    pub capacity: u32,
    /// Independent resource instances, each its own pool
    #[serde(default = "default_one")]
    pub instances: u32,
    #[serde(default)]
    pub protocol: Protocol,
}

fn default_one() -> u32 {
    1
}

impl PoolConfig {
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
            instances: 1,
            protocol: Protocol::Witness,
        }
    }

    pub fn with_instances(mut self, instances: u32) -> Self {
        self.instances = instances;
        self
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }
}

/// One concrete pool (a single instance of a declared pool)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSpec {
    pub id: PoolId,
    pub name: String,
    pub instance: u32,
    pub capacity: usize,
    pub protocol: Protocol,
}

/// A declared pool as a step of every operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub name: String,
    pub first: PoolId,
    pub instances: u32,
}

impl Stage {
    /// Arena id of `instance`, wrapped into range
    pub fn pool(&self, instance: u32) -> PoolId {
        PoolId(self.first.0 + instance % self.instances.max(1))
    }
}
