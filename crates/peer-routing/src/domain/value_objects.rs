//! Value Objects for the routing domain

use serde::Deserialize;

use super::routing_table::BUCKET_SIZE;

/// XOR distance between two identities.
///
/// Holds the raw XOR of the two ids. Ordering is byte-lexicographic, so a
/// smaller value means a longer shared prefix (closer in the metric space).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(Vec<u8>);

impl Distance {
    /// Wrap raw XOR bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Bucket index this distance falls into (leading zero bits).
    pub fn bucket_index(&self) -> usize {
        super::services::prefix_len(&self.0)
    }

    /// True when both identities share the same id.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

/// Routing table tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Nominal bucket capacity, K (default: 16)
    pub bucket_size: usize,
    /// Number of peers returned when answering a lookup (default: 16)
    pub lookup_count: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            bucket_size: BUCKET_SIZE,
            lookup_count: BUCKET_SIZE,
        }
    }
}

impl RoutingConfig {
    /// Create a config suitable for testing (smaller values)
    pub fn for_testing() -> Self {
        Self {
            bucket_size: 3,
            lookup_count: 4,
        }
    }
}
