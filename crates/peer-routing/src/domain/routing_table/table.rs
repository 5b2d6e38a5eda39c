//! Main RoutingTable implementation.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::domain::{bucket_for_peer, sort_peers_by_distance, Identity, RoutingConfig};

use super::bucket::{Bucket, BucketUpdate};
use super::stats::RoutingTableStats;

/// The routing table implementing a Kademlia DHT
///
/// Holds one bucket per possible XOR prefix length (`id_len * 8` buckets).
/// All operations take `&self`; the table is meant to be shared behind an
/// `Arc` by every connection worker of a node.
///
/// # Robustness
///
/// Identities whose id length differs from the local id are never inserted
/// and never reported. Such peers degrade to no-ops instead of errors so a
/// malformed peer cannot destabilise the node.
#[derive(Debug)]
pub struct RoutingTable {
    /// Our own identity (immutable after creation)
    self_id: Identity,
    /// One bucket per XOR prefix length
    buckets: Vec<Bucket>,
    /// Nominal bucket capacity (K)
    bucket_size: usize,
}

impl RoutingTable {
    /// Create a routing table with the default bucket size and register
    /// `self_id` in it.
    pub fn new(self_id: Identity) -> Self {
        Self::with_config(self_id, &RoutingConfig::default())
    }

    /// Create a routing table using `config.bucket_size` as K.
    pub fn with_config(self_id: Identity, config: &RoutingConfig) -> Self {
        Self::with_bucket_size(self_id, config.bucket_size)
    }

    /// Create a routing table with an explicit bucket size.
    pub fn with_bucket_size(self_id: Identity, bucket_size: usize) -> Self {
        let num_buckets = self_id.id().len() * 8;
        let buckets = (0..num_buckets).map(|_| Bucket::new()).collect();

        let table = Self {
            self_id: self_id.clone(),
            buckets,
            bucket_size,
        };
        table.update(&self_id);

        table
    }

    /// Identity of the node hosting this table.
    pub fn self_id(&self) -> &Identity {
        &self.self_id
    }

    /// Nominal bucket capacity (K).
    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Total identities across all buckets, the local node included.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    /// True only for a table built from an empty id (no buckets).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bucket index of `target`, or `None` if its id length does not match.
    pub fn bucket_index(&self, target: &Identity) -> Option<usize> {
        if target.id().len() != self.self_id.id().len() {
            return None;
        }
        Some(bucket_for_peer(self.self_id.id(), target.id()))
    }

    fn home_bucket(&self, target: &Identity) -> Option<(usize, &Bucket)> {
        let index = self.bucket_index(target)?;
        self.bucket(index).map(|bucket| (index, bucket))
    }

    /// Record that `target` was seen.
    ///
    /// Known peers move to the most recently used position of their bucket.
    /// Unknown peers are inserted at the front while the bucket holds
    /// `<= K` entries and dropped otherwise.
    pub fn update(&self, target: &Identity) {
        let Some((index, bucket)) = self.home_bucket(target) else {
            trace!(peer = %target, "ignoring update for peer with mismatched id length");
            return;
        };

        match bucket.touch_or_insert(target, self.bucket_size) {
            BucketUpdate::Inserted => debug!(peer = %target, bucket = index, "peer inserted"),
            BucketUpdate::MovedToFront => trace!(peer = %target, bucket = index, "peer refreshed"),
            BucketUpdate::Rejected => debug!(peer = %target, bucket = index, "bucket full, peer dropped"),
        }
    }

    /// Remove a peer with O(bucket_size) time complexity.
    ///
    /// Returns whether a removal happened.
    pub fn remove(&self, target: &Identity) -> bool {
        let Some((index, bucket)) = self.home_bucket(target) else {
            return false;
        };

        let removed = bucket.remove(target);
        if removed {
            debug!(peer = %target, bucket = index, "peer removed");
        }
        removed
    }

    /// Check if a peer exists with O(bucket_size) time complexity.
    pub fn exists(&self, target: &Identity) -> bool {
        self.home_bucket(target)
            .map(|(_, bucket)| bucket.contains(target))
            .unwrap_or(false)
    }

    /// All known peers except ourselves, deduplicated by public key.
    ///
    /// Buckets are read-locked one at a time, so the result is a best-effort
    /// snapshot rather than a consistent view of the whole table.
    pub fn get_peers(&self) -> Vec<Identity> {
        let mut peers = Vec::new();
        self.visit_unique_peers(|peer| peers.push(peer.clone()));
        peers
    }

    /// Addresses of all known peers except ourselves.
    pub fn get_peer_addresses(&self) -> Vec<String> {
        let mut addresses = Vec::new();
        self.visit_unique_peers(|peer| addresses.push(peer.address().to_string()));
        addresses
    }

    fn visit_unique_peers(&self, mut visit: impl FnMut(&Identity)) {
        let mut visited = HashSet::new();
        visited.insert(self.self_id.public_key_hex());

        for bucket in &self.buckets {
            let peers = bucket.read();
            for peer in peers.iter() {
                if visited.insert(peer.public_key_hex()) {
                    visit(peer);
                }
            }
        }
    }

    /// Up to `count` peers with the smallest XOR distance to `target`.
    ///
    /// Starts from `target`'s home bucket and widens symmetrically one bucket
    /// at a time until at least `count` candidates are gathered or the id
    /// space is exhausted. Results near the edges of the id space may be
    /// fewer than `count`.
    pub fn find_closest_peers(&self, target: &Identity, count: usize) -> Vec<Identity> {
        let Some(home) = self.bucket_index(target) else {
            return Vec::new();
        };

        let mut peers = Vec::new();
        self.collect_bucket(home, &mut peers);

        let num_buckets = self.buckets.len();
        let mut offset = 1;
        while peers.len() < count && (offset <= home || home + offset < num_buckets) {
            if offset <= home {
                self.collect_bucket(home - offset, &mut peers);
            }
            if home + offset < num_buckets {
                self.collect_bucket(home + offset, &mut peers);
            }
            offset += 1;
        }

        sort_peers_by_distance(&mut peers, target);
        peers.truncate(count);
        peers
    }

    fn collect_bucket(&self, index: usize, out: &mut Vec<Identity>) {
        if let Some(bucket) = self.bucket(index) {
            out.extend(bucket.read().iter().cloned());
        }
    }

    /// Get a bucket by index; `None` when out of range.
    pub fn bucket(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    /// Occupancy statistics.
    pub fn stats(&self) -> RoutingTableStats {
        let sizes: Vec<usize> = self.buckets.iter().map(Bucket::len).collect();
        let self_entries = usize::from(self.exists(&self.self_id));

        RoutingTableStats {
            total_peers: sizes.iter().sum::<usize>().saturating_sub(self_entries),
            buckets_used: sizes.iter().filter(|len| **len > 0).count(),
            largest_bucket: sizes.iter().copied().max().unwrap_or(0),
            num_buckets: sizes.len(),
        }
    }
}
