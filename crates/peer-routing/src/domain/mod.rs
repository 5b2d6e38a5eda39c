//! Domain Layer - Pure routing logic with no I/O
//!
//! This module contains the core Kademlia logic:
//! - Peer identities and XOR distance calculation
//! - Routing table with per-bucket locking
//! - Nearest-peer queries

pub mod identity;
pub mod routing_table;
pub mod services;
pub mod value_objects;

pub use identity::Identity;
pub use routing_table::*;
pub use services::*;
pub use value_objects::*;
