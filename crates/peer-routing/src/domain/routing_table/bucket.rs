//! Bucket implementation for Kademlia routing.

use std::collections::VecDeque;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::domain::Identity;

/// Outcome of offering an identity to a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketUpdate {
    /// Identity was already present and is now most recently used.
    MovedToFront,
    /// Identity was new and has been inserted at the front.
    Inserted,
    /// Identity was new but the bucket is at capacity.
    Rejected,
}

/// A bucket storing peers at one XOR prefix length from the local node.
///
/// Entries are ordered most recently used first. Each bucket carries its own
/// reader-writer lock so that operations on different buckets never contend.
#[derive(Debug, Default)]
pub struct Bucket {
    peers: RwLock<VecDeque<Identity>>,
}

impl Bucket {
    /// Create a new empty bucket
    pub fn new() -> Self {
        Self {
            peers: RwLock::new(VecDeque::new()),
        }
    }

    /// Get the number of peers in this bucket
    pub fn len(&self) -> usize {
        self.peers.read().len()
    }

    /// Check if the bucket is empty
    pub fn is_empty(&self) -> bool {
        self.peers.read().is_empty()
    }

    /// Snapshot of the bucket, most recently used first.
    pub fn peers(&self) -> Vec<Identity> {
        self.peers.read().iter().cloned().collect()
    }

    /// Most recently used peer.
    pub fn front(&self) -> Option<Identity> {
        self.peers.read().front().cloned()
    }

    /// Least recently used peer.
    pub fn back(&self) -> Option<Identity> {
        self.peers.read().back().cloned()
    }

    /// Check if bucket contains a peer (shared lock).
    pub fn contains(&self, target: &Identity) -> bool {
        self.peers.read().iter().any(|p| p == target)
    }

    /// Hold the shared lock while iterating.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, VecDeque<Identity>> {
        self.peers.read()
    }

    /// Move `target` to the front, or insert it at the front when there is room.
    ///
    /// A new entry is admitted while `len <= capacity`.
    pub(crate) fn touch_or_insert(&self, target: &Identity, capacity: usize) -> BucketUpdate {
        let mut peers = self.peers.write();

        if let Some(pos) = peers.iter().position(|p| p == target) {
            if let Some(existing) = peers.remove(pos) {
                peers.push_front(existing);
            }
            return BucketUpdate::MovedToFront;
        }

        if peers.len() <= capacity {
            peers.push_front(target.clone());
            BucketUpdate::Inserted
        } else {
            BucketUpdate::Rejected
        }
    }

    /// Remove the first entry equal to `target`.
    pub(crate) fn remove(&self, target: &Identity) -> bool {
        let mut peers = self.peers.write();

        match peers.iter().position(|p| p == target) {
            Some(pos) => peers.remove(pos).is_some(),
            None => false,
        }
    }
}
