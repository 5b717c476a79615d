// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod check;
pub mod config;
pub mod run;

use crate::error::CliError;
use std::path::Path;
use tn_core::ClusterConfig;

/// Load `path`, or the built-in default when no path is given
pub fn load_config(path: Option<&Path>) -> Result<ClusterConfig, CliError> {
    match path {
        Some(path) => ClusterConfig::load(path).map_err(|e| CliError::invalid_config(path, e)),
        None => Ok(ClusterConfig::default()),
    }
}
