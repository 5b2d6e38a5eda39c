use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::adapters::NodeConfig;
use crate::domain::{Identity, RoutingTable, RoutingTableStats};
use crate::wire::{LookupNodeRequest, Message, Ping, TransportError};

/// Peer Routing Service implementing the driving port.
///
/// Wraps a shared `RoutingTable` together with the local identity and a
/// message nonce counter. The service is `Sync`; one instance serves every
/// connection of a node.
///
/// # Example
///
/// ```rust,ignore
/// use peer_routing::{Identity, NodeConfig, PeerRoutingService};
///
/// let local = Identity::new("127.0.0.1:3000", public_key);
/// let service = PeerRoutingService::new(local, NodeConfig::default());
///
/// let request = service.ping()?;
/// connection.send(&request)?;
/// ```
pub struct PeerRoutingService {
    /// The underlying routing table (domain layer)
    pub(crate) routing_table: Arc<RoutingTable>,
    /// Identity stamped on every outgoing message
    pub(crate) local: Identity,
    /// Node configuration
    pub(crate) config: NodeConfig,
    next_nonce: AtomicU64,
}

impl PeerRoutingService {
    /// Create a service with a fresh routing table sized from `config`.
    pub fn new(local: Identity, config: NodeConfig) -> Self {
        let routing_table = Arc::new(RoutingTable::with_config(local.clone(), &config.routing));
        Self::with_routing_table(routing_table, config)
    }

    /// Create a service around an existing (possibly shared) routing table.
    ///
    /// The local identity is taken from the table.
    pub fn with_routing_table(routing_table: Arc<RoutingTable>, config: NodeConfig) -> Self {
        Self {
            local: routing_table.self_id().clone(),
            routing_table,
            config,
            next_nonce: AtomicU64::new(1),
        }
    }

    /// Get the underlying routing table.
    pub fn routing_table(&self) -> &Arc<RoutingTable> {
        &self.routing_table
    }

    /// Our own identity.
    pub fn local_identity(&self) -> &Identity {
        &self.local
    }

    /// Node configuration in effect.
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Routing table occupancy.
    pub fn stats(&self) -> RoutingTableStats {
        self.routing_table.stats()
    }

    /// Allocate the next outgoing message nonce (starts at 1).
    pub fn next_nonce(&self) -> u64 {
        self.next_nonce.fetch_add(1, Ordering::Relaxed)
    }

    /// Build a `Ping` request.
    pub fn ping(&self) -> Result<Message, TransportError> {
        Message::request(self.local.clone(), self.next_nonce(), &Ping)
    }

    /// Build a `LookupNodeRequest` for the peers closest to `target`.
    pub fn lookup(&self, target: &Identity) -> Result<Message, TransportError> {
        let payload = LookupNodeRequest {
            target: target.clone(),
        };
        Message::request(self.local.clone(), self.next_nonce(), &payload)
    }
}
