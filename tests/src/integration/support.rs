//! Shared fixtures: nodes listening on loopback.

use std::io;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;

use peer_routing::{
    Identity, Message, NodeConfig, PeerConnection, PeerRoutingService, TransportError,
};

/// Identity with a random public key.
pub fn random_identity(address: impl Into<String>) -> Identity {
    let key: [u8; 32] = rand::random();
    Identity::new(address, key.to_vec())
}

/// A node serving every inbound connection on its own thread.
pub struct TestNode {
    pub service: Arc<PeerRoutingService>,
    pub address: SocketAddr,
}

impl TestNode {
    /// Bind to an ephemeral loopback port and start accepting.
    pub fn spawn(config: NodeConfig) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let address = listener.local_addr()?;
        let service = Arc::new(PeerRoutingService::new(
            random_identity(address.to_string()),
            config,
        ));

        let acceptor = Arc::clone(&service);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let service = Arc::clone(&acceptor);
                thread::spawn(move || {
                    if let Ok(connection) = PeerConnection::from_tcp(stream, service.config().transport)
                    {
                        let _ = service.serve(&connection);
                    }
                });
            }
        });

        Ok(Self { service, address })
    }

    pub fn identity(&self) -> &Identity {
        self.service.local_identity()
    }

    /// Open a client connection to this node.
    pub fn connect(&self) -> io::Result<PeerConnection> {
        PeerConnection::connect(&self.address.to_string(), self.service.config().transport)
    }
}

/// Send `request` and wait for the next inbound message, recording it with
/// `client` the way a serving node would.
pub fn round_trip(
    client: &PeerRoutingService,
    connection: &PeerConnection,
    request: &Message,
) -> Result<Message, TransportError> {
    connection.send(request)?;
    let reply = connection.receive()?;
    client.handle_message(&reply);
    Ok(reply)
}
