// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tn config`

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tn_core::ClusterConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn config(args: ConfigArgs) -> Result<()> {
    let text = ClusterConfig::default().to_toml()?;
    match args.output {
        Some(path) => std::fs::write(&path, text)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => print!("{}", text),
    }
    Ok(())
}
