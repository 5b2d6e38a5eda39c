//! # Peer Routing Service
//!
//! High-level service implementing the `PeerRoutingApi` port and answering
//! routing requests that arrive over framed connections.
//!
//! Every inbound message refreshes the sender in the shared routing table.
//! `Ping` is answered with `Pong` and `LookupNodeRequest` with the closest
//! known peers.

// Semantic submodules
mod api;
mod core;
mod handler;

// Re-export public API
pub use core::PeerRoutingService;
