//! Domain Services - Pure functions for Kademlia operations
//!
//! All functions in this module are pure (no I/O, no state mutation)
//! and deterministic (same inputs → same outputs).

mod distance;
mod hashing;
mod sorting;

pub use distance::{bucket_for_peer, prefix_len, xor_bytes};
pub use hashing::{derive_id, ID_LEN};
pub use sorting::{find_k_closest, sort_peers_by_distance};
