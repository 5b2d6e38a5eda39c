//! Kademlia distance calculations over raw id bytes.

/// XOR two byte strings.
///
/// The result has the length of `a`; only the first `min(a.len(), b.len())`
/// bytes are combined, any remaining bytes stay zero.
pub fn xor_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut result = vec![0u8; a.len()];
    for (out, (x, y)) in result.iter_mut().zip(a.iter().zip(b.iter())) {
        *out = x ^ y;
    }
    result
}

/// Count the leading zero bits of `bytes`, most-significant byte first.
///
/// # Properties
/// - Result is in `[0, len*8 - 1]` for non-empty input
/// - All-zero input returns `len*8 - 1` (the last bucket), never `len*8`
/// - Empty input returns 0
pub fn prefix_len(bytes: &[u8]) -> usize {
    for (i, b) in bytes.iter().enumerate() {
        if *b != 0 {
            return i * 8 + b.leading_zeros() as usize;
        }
    }

    (bytes.len() * 8).saturating_sub(1)
}

/// Bucket index of `remote` relative to `local`.
///
/// Fused form of `prefix_len(&xor_bytes(remote, local))` that skips the
/// intermediate allocation. Used on the routing hot path.
#[inline]
pub fn bucket_for_peer(local: &[u8], remote: &[u8]) -> usize {
    for (i, (l, r)) in remote.iter().zip(local.iter()).enumerate() {
        let xor = l ^ r;
        if xor != 0 {
            return i * 8 + xor.leading_zeros() as usize;
        }
    }

    (remote.len() * 8).saturating_sub(1)
}
