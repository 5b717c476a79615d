// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use crate::ExecuteError;
use thiserror::Error;
use tn_core::{ConfigError, ProtocolError};

/// Errors that can occur in the runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("execute error: {0}")]
    Execute(#[from] ExecuteError),
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("transport spans {transport} processes, configuration expects {configured}")]
    SizeMismatch { transport: usize, configured: usize },
    #[error("peer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
