//! Wire protocol: messages, opcodes, codec and length-prefixed framing.

pub mod codec;
mod error;
pub(crate) mod framing;
mod message;
mod opcode;
mod signing;

#[cfg(feature = "tokio")]
mod async_framing;

pub use error::TransportError;
pub use framing::{
    decode_frame, encode_frame, receive_message, send_message, write_message, FrameConfig,
    LENGTH_PREFIX_LEN, MAX_MESSAGE_SIZE,
};
pub use message::Message;
pub use opcode::{LookupNodeRequest, LookupNodeResponse, Opcode, Payload, Ping, Pong};
pub use signing::signing_payload;

#[cfg(feature = "tokio")]
pub use async_framing::{receive_message_async, send_message_async};
