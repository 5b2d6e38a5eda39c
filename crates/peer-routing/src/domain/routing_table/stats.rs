//! Routing table statistics.

/// Point-in-time occupancy of a routing table.
///
/// Buckets are sampled one at a time, so the numbers may be slightly
/// inconsistent with each other under concurrent updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoutingTableStats {
    /// Peers in the table, excluding the local node
    pub total_peers: usize,
    /// Buckets holding at least one identity
    pub buckets_used: usize,
    /// Occupancy of the fullest bucket
    pub largest_bucket: usize,
    /// Number of buckets (id length in bits)
    pub num_buckets: usize,
}
