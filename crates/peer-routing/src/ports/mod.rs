//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** APIs this crate exposes to consumers
//! - **Driven Ports (Outbound):** SPIs this crate requires from adapters

pub mod inbound;
pub mod outbound;

pub use inbound::PeerRoutingApi;
pub use outbound::{FrameSink, IdentityHasher};
