//! # Integration Test Flows
//!
//! Two or more nodes exchanging framed messages over loopback TCP.
//!
//! ## Flows Tested:
//!
//! 1. **Ping → Pong**: both sides learn each other
//! 2. **LookupNodeRequest → LookupNodeResponse**: closest peers, closest first
//! 3. **Bootstrap**: a fresh node fills its table from one seed node
//! 4. **Protocol violations**: the serving side drops the connection

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpStream;
    use std::time::Duration;

    use peer_routing::{
        filter_peer_addresses, FrameConfig, LookupNodeResponse, Message, NodeConfig, Opcode,
        PeerRoutingApi, PeerRoutingService, Ping, Pong,
    };

    use crate::integration::support::{random_identity, round_trip, TestNode};

    fn client(address: &str) -> PeerRoutingService {
        PeerRoutingService::new(random_identity(address), NodeConfig::default())
    }

    // =============================================================================
    // PING / PONG
    // =============================================================================

    #[test]
    fn test_ping_pong_introduces_both_sides() {
        let server = TestNode::spawn(NodeConfig::default()).unwrap();
        let client = client("127.0.0.1:50001");
        let connection = server.connect().unwrap();

        let ping = client.ping().unwrap();
        let reply = round_trip(&client, &connection, &ping).unwrap();

        assert_eq!(reply.kind(), Some(Opcode::Pong));
        assert!(reply.reply_flag);
        assert_eq!(reply.request_nonce, ping.message_nonce);
        assert_eq!(reply.decode_payload::<Pong>().unwrap(), Pong);
        assert_eq!(reply.sender.as_ref(), Some(server.identity()));

        assert!(client.exists(server.identity()));
        assert!(server.service.exists(client.local_identity()));
        assert_eq!(
            server.service.get_peer_addresses(),
            vec!["127.0.0.1:50001".to_string()]
        );
    }

    #[test]
    fn test_many_requests_on_one_connection() {
        let server = TestNode::spawn(NodeConfig::default()).unwrap();
        let client = client("127.0.0.1:50002");
        let connection = server.connect().unwrap();

        for _ in 0..50 {
            let ping = client.ping().unwrap();
            let reply = round_trip(&client, &connection, &ping).unwrap();
            assert_eq!(reply.request_nonce, ping.message_nonce);
        }

        // One peer, refreshed fifty times.
        assert_eq!(server.service.get_peers().len(), 1);
    }

    // =============================================================================
    // LOOKUP
    // =============================================================================

    #[test]
    fn test_lookup_returns_servers_closest_peers() {
        let server = TestNode::spawn(NodeConfig::default()).unwrap();
        for port in 0..64u16 {
            server
                .service
                .update(&random_identity(format!("10.1.0.1:{}", 7000 + port)));
        }
        let client = client("127.0.0.1:50003");
        let connection = server.connect().unwrap();
        let target = random_identity("10.2.0.1:7000");

        let reply = round_trip(&client, &connection, &client.lookup(&target).unwrap()).unwrap();
        let response = reply.decode_payload::<LookupNodeResponse>().unwrap();

        let lookup_count = NodeConfig::default().routing.lookup_count;
        assert_eq!(reply.kind(), Some(Opcode::LookupNodeResponse));
        assert!(!response.peers.is_empty());
        assert!(response.peers.len() <= lookup_count);
        assert_eq!(
            response.peers,
            server.service.find_closest_peers(&target, lookup_count)
        );
        for pair in response.peers.windows(2) {
            assert!(pair[0].distance(&target) < pair[1].distance(&target));
        }
    }

    #[test]
    fn test_bootstrap_from_seed_node() {
        let seed = TestNode::spawn(NodeConfig::default()).unwrap();
        let others: Vec<TestNode> = (0..5)
            .map(|_| TestNode::spawn(NodeConfig::default()).unwrap())
            .collect();

        // Every other node introduces itself to the seed.
        for node in &others {
            let connection = seed.connect().unwrap();
            round_trip(&node.service, &connection, &node.service.ping().unwrap()).unwrap();
        }

        // A fresh node asks the seed for peers close to itself.
        let fresh = TestNode::spawn(NodeConfig::default()).unwrap();
        let connection = seed.connect().unwrap();
        let request = fresh.service.lookup(fresh.identity()).unwrap();
        let reply = round_trip(&fresh.service, &connection, &request).unwrap();
        let response = reply.decode_payload::<LookupNodeResponse>().unwrap();

        for peer in &response.peers {
            fresh.service.update(peer);
        }

        let own = fresh.address.to_string();
        let mut learned = filter_peer_addresses(&own, &fresh.service.get_peer_addresses());
        learned.sort();
        let mut expected: Vec<String> = others
            .iter()
            .map(|n| n.address.to_string())
            .chain(std::iter::once(seed.address.to_string()))
            .collect();
        expected.sort();

        assert_eq!(learned, expected);

        // The learned addresses are reachable.
        for node in &others {
            let connection = node.connect().unwrap();
            let reply =
                round_trip(&fresh.service, &connection, &fresh.service.ping().unwrap()).unwrap();
            assert_eq!(reply.kind(), Some(Opcode::Pong));
        }
    }

    // =============================================================================
    // PROTOCOL VIOLATIONS
    // =============================================================================

    fn assert_server_hangs_up(mut stream: TcpStream) {
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let mut rest = Vec::new();
        let read = stream.read_to_end(&mut rest);
        assert!(
            matches!(read, Ok(0)) || read.is_err(),
            "server must close without replying, got {read:?}"
        );
    }

    #[test]
    fn test_zero_length_frame_closes_connection() {
        let server = TestNode::spawn(NodeConfig::default()).unwrap();
        let mut stream = TcpStream::connect(server.address).unwrap();

        stream.write_all(&[0, 0, 0, 0]).unwrap();

        assert_server_hangs_up(stream);
    }

    #[test]
    fn test_oversized_length_prefix_closes_connection() {
        let server = TestNode::spawn(NodeConfig::default()).unwrap();
        let mut stream = TcpStream::connect(server.address).unwrap();

        stream.write_all(&4_000_001u32.to_be_bytes()).unwrap();

        assert_server_hangs_up(stream);
    }

    #[test]
    fn test_message_without_sender_closes_connection() {
        let server = TestNode::spawn(NodeConfig::default()).unwrap();
        let mut message = Message::request(random_identity("127.0.0.1:1"), 1, &Ping).unwrap();
        message.sender = None;
        let payload = message.to_bytes().unwrap();
        let mut frame = (payload.len() as u32).to_be_bytes().to_vec();
        frame.extend_from_slice(&payload);

        let mut stream = TcpStream::connect(server.address).unwrap();
        stream.write_all(&frame).unwrap();

        assert_server_hangs_up(stream);
        assert!(server.service.get_peers().is_empty());
    }

    #[test]
    fn test_server_keeps_serving_other_connections_after_violation() {
        let server = TestNode::spawn(NodeConfig::default()).unwrap();
        let mut bad = TcpStream::connect(server.address).unwrap();
        bad.write_all(&[0, 0, 0, 0]).unwrap();
        assert_server_hangs_up(bad);

        let client = client("127.0.0.1:50004");
        let connection = server.connect().unwrap();
        let reply = round_trip(&client, &connection, &client.ping().unwrap()).unwrap();

        assert_eq!(reply.kind(), Some(Opcode::Pong));
    }

    // =============================================================================
    // ASYNC FRAMING
    // =============================================================================

    #[tokio::test]
    async fn test_async_client_against_blocking_server() {
        use peer_routing::{receive_message_async, send_message_async};
        use tokio::net::TcpStream;
        use tokio::sync::Mutex;

        let server = TestNode::spawn(NodeConfig::default()).unwrap();
        let client = client("127.0.0.1:50005");

        let stream = TcpStream::connect(server.address).await.unwrap();
        let (mut reader, writer) = stream.into_split();
        let writer = Mutex::new(writer);
        let config = FrameConfig::default();

        let ping = client.ping().unwrap();
        send_message_async(&writer, &ping, &config).await.unwrap();
        let reply = receive_message_async(&mut reader, &config).await.unwrap();

        assert_eq!(reply.kind(), Some(Opcode::Pong));
        assert_eq!(reply.request_nonce, ping.message_nonce);
        assert!(server.service.exists(client.local_identity()));
    }
}
