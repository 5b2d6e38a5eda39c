//! Transport errors.

use std::io;

use thiserror::Error;

/// Errors raised while framing, encoding or decoding messages.
///
/// Each decode failure is a distinct variant so callers can decide per
/// condition whether to drop the connection.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The length prefix was zero.
    #[error("received an empty message from a peer")]
    EmptyMessage,

    /// The length prefix (or an outgoing payload) exceeds the ceiling.
    #[error("message has length of {size} which is either broken or too large (max: {max})")]
    MessageTooLarge { size: usize, max: usize },

    /// The stream ended partway through a frame.
    #[error("stream ended mid-frame: expected {expected} bytes, received {received}")]
    Truncated { expected: usize, received: usize },

    /// The payload could not be (de)serialized.
    #[error("malformed message: {0}")]
    Malformed(String),

    /// The message decoded but violates the validity contract.
    #[error("received an invalid message: {0}")]
    InvalidMessage(&'static str),

    /// The opcode is not in the registry.
    #[error("unknown opcode {0}")]
    UnknownOpcode(u16),

    /// A typed payload was requested for a message with another opcode.
    #[error("expected opcode {expected}, message carries opcode {actual}")]
    UnexpectedOpcode { expected: u16, actual: u16 },

    /// Underlying stream failure.
    #[error("stream error: {0}")]
    Io(#[from] io::Error),
}

impl TransportError {
    /// True when the peer closed the stream between frames.
    ///
    /// A stream cut off inside a frame is [`Truncated`](Self::Truncated)
    /// instead.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}

impl From<bincode::Error> for TransportError {
    fn from(err: bincode::Error) -> Self {
        match *err {
            bincode::ErrorKind::Io(e) => Self::Io(e),
            other => Self::Malformed(other.to_string()),
        }
    }
}
