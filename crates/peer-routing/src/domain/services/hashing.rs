//! Identity hashing.

/// Width in bytes of ids derived with the default hasher.
pub const ID_LEN: usize = 32;

/// Derive a peer id from a public key with BLAKE3-256 (one-shot).
pub fn derive_id(public_key: &[u8]) -> Vec<u8> {
    blake3::hash(public_key).as_bytes().to_vec()
}
