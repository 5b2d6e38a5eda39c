//! Structured binary codec for message payloads.
//!
//! bincode with fixed-width integers in network byte order. Trailing bytes
//! are rejected and decoding is bounded by the frame ceiling, so a hostile
//! length field inside the payload cannot force a large allocation.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::TransportError;
use super::framing::MAX_MESSAGE_SIZE;

fn options(limit: usize) -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_big_endian()
        .with_limit(limit as u64)
        .reject_trailing_bytes()
}

/// Encode a value, failing if it exceeds the protocol ceiling.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, TransportError> {
    encode_with_limit(value, MAX_MESSAGE_SIZE)
}

/// Encode a value, failing if it exceeds `limit` bytes.
pub fn encode_with_limit<T: Serialize + ?Sized>(
    value: &T,
    limit: usize,
) -> Result<Vec<u8>, TransportError> {
    let size = options(usize::MAX).serialized_size(value)? as usize;
    if size > limit {
        return Err(TransportError::MessageTooLarge { size, max: limit });
    }
    Ok(options(limit).serialize(value)?)
}

/// Decode a value from exactly `bytes`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, TransportError> {
    options(bytes.len())
        .deserialize(bytes)
        .map_err(|err| TransportError::Malformed(err.to_string()))
}
