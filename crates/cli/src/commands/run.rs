// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tn run`

use super::load_config;
use crate::error::CliError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tn_adapters::SleepWorkload;
use tn_engine::{run_cluster, ClusterReport};
use tracing::{error, info};

#[derive(Args)]
pub struct RunArgs {
    /// Cluster configuration (TOML); the built-in default when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the number of processes
    #[arg(short = 'n', long)]
    pub peers: Option<u32>,

    /// Override the operations each process performs
    #[arg(short, long)]
    pub operations: Option<u32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(peers) = args.peers {
        config.peers = peers;
    }
    if let Some(operations) = args.operations {
        config.operations = operations;
    }
    config.validate().map_err(|e| {
        CliError::new("invalid run parameters")
            .with_context(e.to_string())
            .with_source(e)
    })?;

    info!(
        "Running {} processes for {} operations over {} pools",
        config.peers,
        config.operations,
        config.pool_specs().len()
    );
    let report = run_cluster(&config, SleepWorkload::new(config.workload.clone())).await?;
    let summary = RunSummary(report);
    output::print(&summary, args.format);

    let violations = summary.0.violations();
    if !violations.is_empty() {
        for pool in &violations {
            error!(
                "Pool {} peaked at {} holders with capacity {}",
                pool.slot, pool.peak, pool.slot.capacity
            );
        }
        return Err(CliError::capacity_exceeded(&violations).into());
    }
    info!("Run complete: {} admissions", summary.0.total_admissions());
    Ok(())
}

/// Printable form of a cluster report
#[derive(Serialize)]
#[serde(transparent)]
struct RunSummary(ClusterReport);

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.0;
        writeln!(
            f,
            "{} processes, {} admissions in {}ms",
            report.peers.len(),
            report.total_admissions(),
            report.elapsed_ms
        )?;

        writeln!(f)?;
        writeln!(
            f,
            "{:<6} {:>10} {:>8} {:>8} {:>8}",
            "PEER", "ADMITTED", "SENT", "RECV", "CLOCK"
        )?;
        for peer in &report.peers {
            writeln!(
                f,
                "{:<6} {:>10} {:>8} {:>8} {:>8}",
                peer.rank.to_string(),
                peer.admissions,
                peer.messages_sent,
                peer.messages_received,
                peer.final_clock
            )?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:<16} {:>8} {:>6} {:>10}",
            "POOL", "CAPACITY", "PEAK", "ADMITTED"
        )?;
        for pool in &report.pools {
            writeln!(
                f,
                "{:<16} {:>8} {:>6} {:>10}",
                pool.slot.to_string(),
                pool.slot.capacity,
                pool.peak,
                pool.admissions
            )?;
        }

        writeln!(f)?;
        if report.violations().is_empty() {
            write!(f, "status: ok")
        } else {
            write!(f, "status: CAPACITY EXCEEDED")
        }
    }
}
