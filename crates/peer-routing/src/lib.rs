//! # Peer Routing
//!
//! Kademlia-style routing table and length-prefixed message transport for
//! a peer-to-peer node.
//!
//! ## Overview
//!
//! - **Identity:** a peer is `(address, id, public_key)`; the id is the
//!   BLAKE3-256 hash of the public key and is the only thing compared.
//! - **Routing table:** one bucket per XOR prefix length (256 for 32-byte
//!   ids), each an MRU-ordered list behind its own lock. The table is
//!   shared by reference between all connection workers.
//! - **Transport:** messages are serialized with a fixed-width big-endian
//!   binary codec and framed with a 4-byte big-endian length prefix. Frames
//!   of zero bytes or more than 4,000,000 bytes are rejected.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** identities, XOR distance, buckets, routing table
//! - **Ports Layer:** the routing API and the hashing and byte-sink SPIs
//! - **Wire Layer:** message model, opcodes, codec and framing
//! - **Service Layer:** answers `Ping` and `LookupNodeRequest`
//! - **Adapters Layer:** TCP connections, TOML config, tracing setup
//!
//! ## Features
//!
//! - `tokio` - async framing over `tokio::io` streams
//!
//! ## Example
//!
//! ```rust
//! use peer_routing::{Identity, RoutingTable};
//!
//! let local = Identity::new("127.0.0.1:3000", vec![1u8; 32]);
//! let table = RoutingTable::new(local.clone());
//!
//! let peer = Identity::new("127.0.0.1:3001", vec![2u8; 32]);
//! table.update(&peer);
//!
//! assert!(table.exists(&peer));
//! assert_eq!(table.get_peer_addresses(), vec!["127.0.0.1:3001"]);
//! assert_eq!(table.find_closest_peers(&peer, 1), vec![peer]);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod wire;

// Domain entities
pub use domain::{
    Bucket, BucketUpdate, Distance, Identity, RoutingConfig, RoutingTable, RoutingTableStats,
    BUCKET_SIZE, ID_LEN,
};

// Domain services
pub use domain::{bucket_for_peer, derive_id, find_k_closest, prefix_len, sort_peers_by_distance, xor_bytes};

// Port traits
pub use ports::{FrameSink, IdentityHasher, PeerRoutingApi};

// Wire protocol
pub use wire::{
    decode_frame, encode_frame, receive_message, send_message, signing_payload, write_message,
    FrameConfig, LookupNodeRequest, LookupNodeResponse, Message, Opcode, Payload, Ping, Pong,
    TransportError, LENGTH_PREFIX_LEN, MAX_MESSAGE_SIZE,
};

#[cfg(feature = "tokio")]
pub use wire::{receive_message_async, send_message_async};

// Adapters
pub use adapters::{
    filter_peer_addresses, init_tracing, normalize_address, Blake3IdentityHasher, ConfigError,
    NodeConfig, PeerConnection, TelemetryError,
};

// Service
pub use service::PeerRoutingService;
