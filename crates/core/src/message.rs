// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol messages and their fixed-size wire frame
//!
//! Frame layout, little-endian, 20 bytes:
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 4 | kind (`u32`) |
//! | 4 | 8 | timestamp (`u64`) |
//! | 12 | 4 | sender (`u32`) |
//! | 16 | 4 | pool (`i32`, `-1` when not applicable) |

use crate::clock::Timestamp;
use crate::id::{PeerId, PoolId};
use crate::queue::Request;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const FRAME_LEN: usize = 20;

/// Encoded message
pub type Frame = [u8; FRAME_LEN];

/// Wire value for "no pool"
const NO_POOL: i32 = -1;

/// Errors decoding a frame
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("frame must be 20 bytes, got {0}")]
    InvalidLength(usize),
    #[error("unknown message kind: {0}")]
    UnknownKind(u32),
    #[error("invalid pool id: {0}")]
    InvalidPool(i32),
}

/// Protocol verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Request,
    Release,
    Ack,
    Terminate,
}

impl MessageKind {
    pub fn code(self) -> u32 {
        match self {
            MessageKind::Request => 0,
            MessageKind::Release => 1,
            MessageKind::Ack => 2,
            MessageKind::Terminate => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageKind::Request => "REQUEST",
            MessageKind::Release => "RELEASE",
            MessageKind::Ack => "ACK",
            MessageKind::Terminate => "TERMINATE",
        }
    }
}

impl TryFrom<u32> for MessageKind {
    type Error = WireError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(MessageKind::Request),
            1 => Ok(MessageKind::Release),
            2 => Ok(MessageKind::Ack),
            3 => Ok(MessageKind::Terminate),
            other => Err(WireError::UnknownKind(other)),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A protocol message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub timestamp: Timestamp,
    pub sender: PeerId,
    pub pool: Option<PoolId>,
}

impl Message {
    pub fn request(request: Request, pool: PoolId) -> Self {
        Self {
            kind: MessageKind::Request,
            timestamp: request.timestamp,
            sender: request.owner,
            pool: Some(pool),
        }
    }

    pub fn release(timestamp: Timestamp, sender: PeerId, pool: PoolId) -> Self {
        Self {
            kind: MessageKind::Release,
            timestamp,
            sender,
            pool: Some(pool),
        }
    }

    pub fn ack(timestamp: Timestamp, sender: PeerId, pool: PoolId) -> Self {
        Self {
            kind: MessageKind::Ack,
            timestamp,
            sender,
            pool: Some(pool),
        }
    }

    pub fn terminate(timestamp: Timestamp, sender: PeerId) -> Self {
        Self {
            kind: MessageKind::Terminate,
            timestamp,
            sender,
            pool: None,
        }
    }

    /// Encode into a fixed-size frame
    pub fn encode(&self) -> Frame {
        let pool = self.pool.map_or(NO_POOL, |p| p.0 as i32);

        let mut frame = [0u8; FRAME_LEN];
        frame[0..4].copy_from_slice(&self.kind.code().to_le_bytes());
        frame[4..12].copy_from_slice(&self.timestamp.to_le_bytes());
        frame[12..16].copy_from_slice(&self.sender.0.to_le_bytes());
        frame[16..20].copy_from_slice(&pool.to_le_bytes());
        frame
    }

    /// Decode a frame produced by [`Message::encode`]
    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let frame: &Frame = bytes
            .try_into()
            .map_err(|_| WireError::InvalidLength(bytes.len()))?;

        let kind = MessageKind::try_from(u32::from_le_bytes(word(frame, 0)))?;
        let timestamp = u64::from_le_bytes([
            frame[4], frame[5], frame[6], frame[7], frame[8], frame[9], frame[10], frame[11],
        ]);
        let sender = PeerId(u32::from_le_bytes(word(frame, 12)));
        let pool = match i32::from_le_bytes(word(frame, 16)) {
            NO_POOL => None,
            id if id >= 0 => Some(PoolId(id as u32)),
            id => return Err(WireError::InvalidPool(id)),
        };

        Ok(Self {
            kind,
            timestamp,
            sender,
            pool,
        })
    }
}

fn word(frame: &Frame, at: usize) -> [u8; 4] {
    [frame[at], frame[at + 1], frame[at + 2], frame[at + 3]]
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pool {
            Some(pool) => write!(
                f,
                "{}(ts={}, from={}, {})",
                self.kind, self.timestamp, self.sender, pool
            ),
            None => write!(f, "{}(ts={}, from={})", self.kind, self.timestamp, self.sender),
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
