// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workload timing and resource-instance selection

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How each operation picks an instance of a partitioned pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChooserKind {
    /// `(rank + operation) % instances`
    #[default]
    RoundRobin,
    /// Hash of `(rank, operation, stage)`
    Hashed,
}

/// Critical-section and pause durations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkloadConfig {
    #[serde(with = "humantime_serde")]
    pub min_hold: Duration,
    #[serde(with = "humantime_serde")]
    pub max_hold: Duration,
    #[serde(with = "humantime_serde", default)]
    pub min_rest: Duration,
    #[serde(with = "humantime_serde", default)]
    pub max_rest: Duration,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            min_hold: Duration::from_millis(50),
            max_hold: Duration::from_millis(150),
            min_rest: Duration::ZERO,
            max_rest: Duration::from_millis(50),
        }
    }
}

impl WorkloadConfig {
    /// Fixed hold, no rest
    pub fn fixed(hold: Duration) -> Self {
        Self {
            min_hold: hold,
            max_hold: hold,
            min_rest: Duration::ZERO,
            max_rest: Duration::ZERO,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_hold > self.max_hold {
            return Err(ConfigError::HoldRange);
        }
        if self.min_rest > self.max_rest {
            return Err(ConfigError::RestRange);
        }
        Ok(())
    }
}
