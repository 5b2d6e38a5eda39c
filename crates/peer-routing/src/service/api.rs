use crate::domain::Identity;
use crate::ports::PeerRoutingApi;
use crate::service::PeerRoutingService;

impl PeerRoutingApi for PeerRoutingService {
    fn update(&self, peer: &Identity) {
        self.routing_table.update(peer);
    }

    fn remove(&self, peer: &Identity) -> bool {
        self.routing_table.remove(peer)
    }

    fn exists(&self, peer: &Identity) -> bool {
        self.routing_table.exists(peer)
    }

    fn get_peers(&self) -> Vec<Identity> {
        self.routing_table.get_peers()
    }

    fn get_peer_addresses(&self) -> Vec<String> {
        self.routing_table.get_peer_addresses()
    }

    fn find_closest_peers(&self, target: &Identity, count: usize) -> Vec<Identity> {
        self.routing_table.find_closest_peers(target, count)
    }
}
