//! Identity Hasher Adapters

use crate::domain::ID_LEN;
use crate::ports::IdentityHasher;

/// BLAKE3 identity hasher.
///
/// The default output is the 32-byte BLAKE3-256 digest, which matches
/// [`Identity::new`](crate::domain::Identity::new). Other widths read the
/// BLAKE3 extendable output, so a 32-byte hasher and the default agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blake3IdentityHasher {
    output_len: usize,
}

impl Blake3IdentityHasher {
    /// Hasher producing 32-byte ids.
    pub fn new() -> Self {
        Self { output_len: ID_LEN }
    }

    /// Hasher producing `output_len`-byte ids (at least one byte).
    pub fn with_output_len(output_len: usize) -> Self {
        Self {
            output_len: output_len.max(1),
        }
    }
}

impl Default for Blake3IdentityHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityHasher for Blake3IdentityHasher {
    fn hash(&self, public_key: &[u8]) -> Vec<u8> {
        if self.output_len == ID_LEN {
            return blake3::hash(public_key).as_bytes().to_vec();
        }

        let mut out = vec![0u8; self.output_len];
        let mut hasher = blake3::Hasher::new();
        hasher.update(public_key);
        hasher.finalize_xof().fill(&mut out);
        out
    }

    fn output_len(&self) -> usize {
        self.output_len
    }
}
