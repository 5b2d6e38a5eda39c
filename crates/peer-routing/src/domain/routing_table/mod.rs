//! Routing Table Implementation
//!
//! Kademlia routing table: one bucket per XOR prefix length, each bucket
//! independently locked so that routing updates driven by different
//! connections proceed in parallel.

mod bucket;
mod config;
mod stats;
mod table;

pub use bucket::{Bucket, BucketUpdate};
pub use config::BUCKET_SIZE;
pub use stats::RoutingTableStats;
pub use table::RoutingTable;
