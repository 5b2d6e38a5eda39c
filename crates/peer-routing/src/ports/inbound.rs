//! # Driving Ports (Inbound API)
//!
//! The routing operations this crate exposes to a peer-discovery layer.

use crate::domain::Identity;

/// Primary API for interacting with the local routing table.
///
/// None of these operations fail: identities with a mismatched id length are
/// ignored and queries about them report nothing.
///
/// # Example
///
/// ```rust,ignore
/// use peer_routing::ports::PeerRoutingApi;
///
/// fn refresh<T: PeerRoutingApi>(api: &T, target: &Identity) {
///     let closest = api.find_closest_peers(target, 16);
///     println!("Found {} peers", closest.len());
/// }
/// ```
pub trait PeerRoutingApi {
    /// Record that a peer was seen (insert or move to most recently used).
    fn update(&self, peer: &Identity);

    /// Remove a peer. Returns whether it was present.
    fn remove(&self, peer: &Identity) -> bool;

    /// Check if a peer is in the routing table.
    fn exists(&self, peer: &Identity) -> bool;

    /// All known peers, excluding the local node.
    fn get_peers(&self) -> Vec<Identity>;

    /// Addresses of all known peers, excluding the local node.
    fn get_peer_addresses(&self) -> Vec<String>;

    /// Up to `count` peers closest to `target` by XOR distance, closest first.
    fn find_closest_peers(&self, target: &Identity, count: usize) -> Vec<Identity>;
}
