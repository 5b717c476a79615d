// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tn check`

use super::load_config;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Configuration file to validate
    #[arg(short, long)]
    pub config: PathBuf,
}

pub fn check(args: CheckArgs) -> Result<()> {
    let config = load_config(Some(&args.config))?;

    println!(
        "ok: {} processes, {} operations, chooser {}",
        config.peers,
        config.operations,
        match config.chooser {
            tn_core::ChooserKind::RoundRobin => "round-robin",
            tn_core::ChooserKind::Hashed => "hashed",
        }
    );
    for pool in &config.pools {
        println!(
            "  {:<12} capacity {} x{} ({})",
            pool.name, pool.capacity, pool.instances, pool.protocol
        );
    }
    Ok(())
}
