// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! turnstile execution engine

mod chooser;
mod cluster;
mod error;
mod executor;
mod runtime;

pub use chooser::Chooser;
pub use cluster::{run_cluster, ClusterReport};
pub use error::RuntimeError;
pub use executor::{ExecuteError, Executor};
pub use runtime::{Peer, PeerReport};
