//! Peer sorting and selection.

use crate::domain::Identity;

/// Sort peers by XOR distance from a target identity (closest first).
///
/// Distances are compared byte-lexicographically, so the peer sharing the
/// longest id prefix with `target` sorts first.
pub fn sort_peers_by_distance(peers: &mut [Identity], target: &Identity) {
    peers.sort_by_cached_key(|peer| peer.distance(target));
}

/// Find the k closest peers to a target from a list.
///
/// # Returns
/// Up to k peers sorted by distance (closest first)
pub fn find_k_closest(peers: &[Identity], target: &Identity, k: usize) -> Vec<Identity> {
    let mut sorted = peers.to_vec();
    sort_peers_by_distance(&mut sorted, target);
    sorted.truncate(k);
    sorted
}
