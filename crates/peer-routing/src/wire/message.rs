//! The framed message entity.

use serde::{Deserialize, Serialize};

use super::codec;
use super::error::TransportError;
use super::opcode::{Opcode, Payload};
use crate::domain::Identity;

/// A message exchanged between peers.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Serialized payload, interpreted according to `opcode`.
    pub body: Vec<u8>,
    /// Sender-side sequence number.
    pub message_nonce: u64,
    /// Payload type tag (see [`Opcode`]).
    pub opcode: u16,
    /// Set when this message answers a request.
    pub reply_flag: bool,
    /// `message_nonce` of the request being answered; meaningful only when
    /// `reply_flag` is set.
    pub request_nonce: u64,
    /// Who sent the message.
    pub sender: Option<Identity>,
    /// Sender's signature over [`signing_payload`](super::signing_payload).
    /// Carried but not verified.
    pub signature: Vec<u8>,
}

impl Message {
    /// Build a request carrying `payload`.
    pub fn request<P: Payload>(
        sender: Identity,
        message_nonce: u64,
        payload: &P,
    ) -> Result<Self, TransportError> {
        Ok(Self {
            body: codec::encode(payload)?,
            message_nonce,
            opcode: P::OPCODE.as_u16(),
            reply_flag: false,
            request_nonce: 0,
            sender: Some(sender),
            signature: Vec::new(),
        })
    }

    /// Build a reply to `request` carrying `payload`.
    pub fn reply<P: Payload>(
        sender: Identity,
        message_nonce: u64,
        request: &Message,
        payload: &P,
    ) -> Result<Self, TransportError> {
        let mut message = Self::request(sender, message_nonce, payload)?;
        message.reply_flag = true;
        message.request_nonce = request.message_nonce;
        Ok(message)
    }

    /// Attach a signature produced by the caller.
    pub fn with_signature(mut self, signature: Vec<u8>) -> Self {
        self.signature = signature;
        self
    }

    /// Registered opcode, if the tag is known.
    pub fn kind(&self) -> Option<Opcode> {
        Opcode::from_u16(self.opcode)
    }

    /// Decode the body as payload `P`, checking the opcode first.
    pub fn decode_payload<P: Payload>(&self) -> Result<P, TransportError> {
        let expected = P::OPCODE.as_u16();
        if self.opcode != expected {
            return Err(TransportError::UnexpectedOpcode {
                expected,
                actual: self.opcode,
            });
        }
        codec::decode(&self.body)
    }

    /// Check the post-decode validity contract: the sender must be present
    /// with a non-empty public key and a non-empty address.
    pub fn validate(&self) -> Result<(), TransportError> {
        let sender = self
            .sender
            .as_ref()
            .ok_or(TransportError::InvalidMessage("no sender"))?;

        if sender.public_key().is_empty() {
            return Err(TransportError::InvalidMessage("sender has no public key"));
        }
        if sender.address().is_empty() {
            return Err(TransportError::InvalidMessage("sender has no address"));
        }

        Ok(())
    }

    /// Encode to the wire payload (without the length prefix).
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransportError> {
        codec::encode(self)
    }

    /// Decode a wire payload (without the length prefix) and validate it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransportError> {
        let message: Message = codec::decode(bytes)?;
        message.validate()?;
        Ok(message)
    }
}
