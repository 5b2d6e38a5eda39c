//! Canonical byte string covered by a message signature.

use crate::domain::Identity;

const U32_SIZE: usize = 4;

/// Pack a sender and message body for signing.
///
/// Layout: `[u32 LE len(address)][address][u32 LE len(id)][id][body]`.
/// Only the packing is provided; signing and verification are left to the
/// caller.
pub fn signing_payload(sender: &Identity, body: &[u8]) -> Vec<u8> {
    let address = sender.address().as_bytes();
    let id = sender.id();

    let mut packed = Vec::with_capacity(U32_SIZE + address.len() + U32_SIZE + id.len() + body.len());
    packed.extend_from_slice(&(address.len() as u32).to_le_bytes());
    packed.extend_from_slice(address);
    packed.extend_from_slice(&(id.len() as u32).to_le_bytes());
    packed.extend_from_slice(id);
    packed.extend_from_slice(body);

    packed
}
