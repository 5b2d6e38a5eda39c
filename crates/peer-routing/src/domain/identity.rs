//! Peer identity: network address, public key, and the key's content hash.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::services::{derive_id, prefix_len, xor_bytes};
use super::value_objects::Distance;
use crate::ports::IdentityHasher;

/// Identity of a node in the routing metric space.
///
/// `id` is a fixed-width hash of `public_key` and is the only field that
/// takes part in equality, ordering and hashing. Two identities announcing
/// different addresses for the same key are the same peer.
///
/// # Security (Timing Attack Prevention)
///
/// Equality runs in time independent of where the ids differ, so a peer
/// cannot probe for ids it does not know through response timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    address: String,
    id: Vec<u8>,
    public_key: Vec<u8>,
}

impl Identity {
    /// Create an identity, deriving `id` from `public_key` with BLAKE3-256.
    pub fn new(address: impl Into<String>, public_key: impl Into<Vec<u8>>) -> Self {
        let public_key = public_key.into();
        Self {
            address: address.into(),
            id: derive_id(&public_key),
            public_key,
        }
    }

    /// Create an identity, deriving `id` with a caller-supplied hasher.
    pub fn with_hasher<H: IdentityHasher + ?Sized>(
        address: impl Into<String>,
        public_key: impl Into<Vec<u8>>,
        hasher: &H,
    ) -> Self {
        let public_key = public_key.into();
        Self {
            address: address.into(),
            id: hasher.hash(&public_key),
            public_key,
        }
    }

    /// Assemble an identity from already known parts.
    ///
    /// No check is made that `id` is the hash of `public_key`.
    pub fn from_parts(
        address: impl Into<String>,
        id: impl Into<Vec<u8>>,
        public_key: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            address: address.into(),
            id: id.into(),
            public_key: public_key.into(),
        }
    }

    /// Network-reachable endpoint of the peer.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Content hash of the public key; the metric-space coordinate.
    pub fn id(&self) -> &[u8] {
        &self.id
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Hex encoding of the public key.
    pub fn public_key_hex(&self) -> String {
        hex::encode(&self.public_key)
    }

    /// XOR of the two public keys, truncated to the shorter key.
    ///
    /// The address is copied from `self` and the id is left empty.
    pub fn xor_public_key(&self, other: &Identity) -> Identity {
        Identity {
            address: self.address.clone(),
            id: Vec::new(),
            public_key: xor_bytes(&self.public_key, &other.public_key),
        }
    }

    /// XOR of the two ids, truncated to the shorter id.
    ///
    /// The address is copied from `self` and the public key is left empty.
    pub fn xor_id(&self, other: &Identity) -> Identity {
        Identity {
            address: self.address.clone(),
            id: xor_bytes(&self.id, &other.id),
            public_key: Vec::new(),
        }
    }

    /// Number of leading zero bits in `id`.
    ///
    /// An all-zero id reports `len*8 - 1` so the value is always a valid
    /// bucket index.
    pub fn prefix_len(&self) -> usize {
        prefix_len(&self.id)
    }

    /// XOR distance to `other`, comparable byte-lexicographically.
    pub fn distance(&self, other: &Identity) -> Distance {
        Distance::new(xor_bytes(&self.id, &other.id))
    }
}

impl PartialEq for Identity {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.id.len() != other.id.len() {
            return false;
        }
        let mut diff = 0u8;
        for (a, b) in self.id.iter().zip(other.id.iter()) {
            diff |= a ^ b;
        }
        diff == 0
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Identity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID{{Address: {}, ID: {}}}", self.address, hex::encode(&self.id))
    }
}
