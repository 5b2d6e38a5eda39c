//! # Adapters Layer
//!
//! Concrete implementations at the edges of the crate: id hashing, address
//! normalisation, blocking TCP connections, configuration files and the
//! tracing subscriber.

pub mod address;
pub mod config;
pub mod connection;
pub mod hashing;
pub mod telemetry;

pub use address::{filter_peer_addresses, normalize_address};
pub use config::{ConfigError, NodeConfig, DEFAULT_LOG_FILTER};
pub use connection::PeerConnection;
pub use hashing::Blake3IdentityHasher;
pub use telemetry::{init_tracing, TelemetryError};
