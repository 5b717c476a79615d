// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing infrastructure for effects

use crate::effect::{Effect, Event};

/// Trait for operations that should be traced
///
/// Provides consistent naming and structured fields for logging.
pub trait TracedEffect {
    /// Effect name for log spans (e.g., "broadcast", "enter")
    fn name(&self) -> &'static str;

    /// Key-value pairs for structured logging
    fn fields(&self) -> Vec<(&'static str, String)>;
}

impl TracedEffect for Effect {
    fn name(&self) -> &'static str {
        match self {
            Effect::Broadcast(_) => "broadcast",
            Effect::Send { .. } => "send",
            Effect::Enter { .. } => "enter",
            Effect::Emit(_) => "emit",
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Broadcast(message) => vec![("message", message.to_string())],
            Effect::Send { to, message } => {
                vec![("to", to.to_string()), ("message", message.to_string())]
            }
            Effect::Enter { pool } => vec![("pool", pool.to_string())],
            Effect::Emit(event) => event_fields(event),
        }
    }
}

fn event_fields(event: &Event) -> Vec<(&'static str, String)> {
    let mut fields = vec![("event", event.name().to_string())];
    match event {
        Event::RequestIssued { pool, timestamp, .. }
        | Event::Admitted { pool, timestamp, .. }
        | Event::Released { pool, timestamp, .. } => {
            fields.push(("pool", pool.to_string()));
            fields.push(("ts", timestamp.to_string()));
        }
        Event::ReplyDeferred { pool, to, .. } | Event::AckSent { pool, to, .. } => {
            fields.push(("pool", pool.to_string()));
            fields.push(("to", to.to_string()));
        }
        Event::PeerDeparted { departed, .. } => fields.push(("departed", departed.to_string())),
        Event::Departed { timestamp, .. } => fields.push(("ts", timestamp.to_string())),
    }
    fields
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
