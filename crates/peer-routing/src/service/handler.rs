//! Inbound message handling.

use std::io::Read;

use tracing::{debug, trace, warn};

use crate::adapters::PeerConnection;
use crate::ports::FrameSink;
use crate::service::PeerRoutingService;
use crate::wire::{LookupNodeRequest, LookupNodeResponse, Message, Opcode, Pong, TransportError};

impl PeerRoutingService {
    /// Process one inbound message and build the reply, if any.
    ///
    /// The sender is recorded in the routing table first, whatever the
    /// message carries. Replies and unregistered opcodes produce nothing.
    pub fn handle_message(&self, message: &Message) -> Option<Message> {
        if let Some(sender) = &message.sender {
            self.routing_table.update(sender);
        }

        if message.reply_flag {
            trace!(opcode = message.opcode, request_nonce = message.request_nonce, "reply received");
            return None;
        }

        let op = match message.kind() {
            Some(op) if op.is_request() => op,
            Some(op) => {
                trace!(%op, "no handler for opcode");
                return None;
            }
            None => {
                debug!(opcode = message.opcode, "ignoring unknown opcode");
                return None;
            }
        };

        let reply = if op == Opcode::LookupNodeRequest {
            let request = match message.decode_payload::<LookupNodeRequest>() {
                Ok(request) => request,
                Err(err) => {
                    warn!(error = %err, "dropping undecodable lookup request");
                    return None;
                }
            };
            let peers = self
                .routing_table
                .find_closest_peers(&request.target, self.config.routing.lookup_count);
            debug!(found = peers.len(), "answering lookup");
            Message::reply(
                self.local.clone(),
                self.next_nonce(),
                message,
                &LookupNodeResponse { peers },
            )
        } else {
            Message::reply(self.local.clone(), self.next_nonce(), message, &Pong)
        };

        match reply {
            Ok(reply) => Some(reply),
            Err(err) => {
                warn!(error = %err, "failed to build reply");
                None
            }
        }
    }

    /// Answer requests on `connection` until it closes or fails.
    ///
    /// Returns `Ok(())` when the peer closes the stream between frames and
    /// the first other error otherwise, including a stream that ends
    /// partway through a frame.
    pub fn serve<R: Read, W: FrameSink>(
        &self,
        connection: &PeerConnection<R, W>,
    ) -> Result<(), TransportError> {
        debug!(peer = ?connection.peer_addr(), "serving connection");
        loop {
            let message = match connection.receive() {
                Ok(message) => message,
                Err(err) if err.is_closed() => {
                    debug!(peer = ?connection.peer_addr(), "connection closed by peer");
                    return Ok(());
                }
                Err(err) => return Err(err),
            };

            if let Some(reply) = self.handle_message(&message) {
                connection.send(&reply)?;
            }
        }
    }
}
