//! Opcode registry and typed payloads.
//!
//! The registry is a fixed table built into the binary; there is no runtime
//! registration of new message types.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::TransportError;
use crate::domain::Identity;

/// Tag identifying the payload type carried in a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Opcode {
    Ping = 0,
    Pong = 1,
    LookupNodeRequest = 2,
    LookupNodeResponse = 3,
}

impl Opcode {
    /// Every registered opcode, in tag order.
    pub const ALL: [Opcode; 4] = [
        Opcode::Ping,
        Opcode::Pong,
        Opcode::LookupNodeRequest,
        Opcode::LookupNodeResponse,
    ];

    /// Wire tag.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Look up an opcode by wire tag.
    pub fn from_u16(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_u16() == code)
    }

    /// Name of the payload type registered for this opcode.
    pub fn payload_name(self) -> &'static str {
        match self {
            Opcode::Ping => "Ping",
            Opcode::Pong => "Pong",
            Opcode::LookupNodeRequest => "LookupNodeRequest",
            Opcode::LookupNodeResponse => "LookupNodeResponse",
        }
    }

    /// True for opcodes that expect a reply.
    pub fn is_request(self) -> bool {
        matches!(self, Opcode::Ping | Opcode::LookupNodeRequest)
    }
}

impl TryFrom<u16> for Opcode {
    type Error = TransportError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::from_u16(code).ok_or(TransportError::UnknownOpcode(code))
    }
}

impl From<Opcode> for u16 {
    fn from(op: Opcode) -> Self {
        op.as_u16()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.payload_name(), self.as_u16())
    }
}

/// A message body type bound to one opcode.
pub trait Payload: Serialize + DeserializeOwned {
    const OPCODE: Opcode;
}

/// Liveness probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ping;

/// Reply to [`Ping`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pong;

/// Ask a peer for the identities it knows closest to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupNodeRequest {
    pub target: Identity,
}

/// Closest identities known to the responding peer, closest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupNodeResponse {
    pub peers: Vec<Identity>,
}

impl Payload for Ping {
    const OPCODE: Opcode = Opcode::Ping;
}

impl Payload for Pong {
    const OPCODE: Opcode = Opcode::Pong;
}

impl Payload for LookupNodeRequest {
    const OPCODE: Opcode = Opcode::LookupNodeRequest;
}

impl Payload for LookupNodeResponse {
    const OPCODE: Opcode = Opcode::LookupNodeResponse;
}
