// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use std::fmt;
use std::path::Path;
use tn_adapters::PoolOccupancy;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// A configuration file that failed to load or validate
    pub fn invalid_config<E>(path: &Path, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CliError::new(format!("invalid configuration '{}'", path.display()))
            .with_context(source.to_string())
            .with_suggestion("Print a working template with: tn config")
            .with_source(source)
    }

    /// Pools that held more processes at once than they allow
    pub fn capacity_exceeded(pools: &[&PoolOccupancy]) -> Self {
        let mut err = CliError::new("capacity exceeded");
        for pool in pools {
            err = err.with_context(format!(
                "{} reached {} holders with capacity {}",
                pool.slot, pool.peak, pool.slot.capacity
            ));
        }
        err.with_suggestion("Re-run with -vv to see admissions and releases per process")
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tn_core::{PoolId, PoolSlot};

    #[test]
    fn display_lists_context_and_numbered_suggestions() {
        let err = CliError::new("boom")
            .with_context("first")
            .with_suggestion("try a")
            .with_suggestion("try b");
        let text = err.to_string();
        assert!(text.starts_with("error: boom\n"));
        assert!(text.contains("  -> first"));
        assert!(text.contains("  1. try a"));
        assert!(text.contains("  2. try b"));
    }

    #[test]
    fn capacity_exceeded_names_each_pool() {
        let pool = PoolOccupancy {
            slot: PoolSlot {
                id: PoolId(0),
                name: "house".to_string(),
                instance: 2,
                capacity: 1,
            },
            current: 0,
            peak: 2,
            admissions: 4,
        };
        let text = CliError::capacity_exceeded(&[&pool]).to_string();
        assert!(text.contains("house[2] reached 2 holders with capacity 1"));
    }
}
