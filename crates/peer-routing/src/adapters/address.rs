//! Peer address normalisation.
//!
//! Addresses are plain `host:port` strings. No name resolution happens here:
//! IP literals are canonicalised, host names are lowercased and kept as is.

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};

const TCP_SCHEME: &str = "tcp://";

/// Bring an address into canonical `host:port` form.
///
/// Returns `None` for anything that is not `host:port` with a valid port.
pub fn normalize_address(address: &str) -> Option<String> {
    let address = address.trim();
    let address = address.strip_prefix(TCP_SCHEME).unwrap_or(address);

    if let Ok(socket) = address.parse::<SocketAddr>() {
        return Some(socket.to_string());
    }

    let (host, port) = address.rsplit_once(':')?;
    let port: u16 = port.parse().ok()?;

    // A bare IPv6 literal must be bracketed; anything else with a colon is
    // not a host name either.
    if host.is_empty() || host.contains(':') || host.contains('[') {
        return None;
    }
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Some(SocketAddr::new(ip, port).to_string());
    }
    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return None;
    }

    Some(format!("{}:{}", host.to_ascii_lowercase(), port))
}

/// Normalise and deduplicate a peer address list.
///
/// Empty and unparseable entries are dropped, as is any entry equal to
/// `own`. First occurrence wins; order is otherwise preserved.
pub fn filter_peer_addresses<S: AsRef<str>>(own: &str, peers: &[S]) -> Vec<String> {
    let mut visited = HashSet::new();
    visited.insert(normalize_address(own).unwrap_or_else(|| own.to_string()));

    let mut filtered = Vec::new();
    for peer in peers {
        let peer = peer.as_ref();
        if peer.is_empty() {
            continue;
        }

        let Some(resolved) = normalize_address(peer) else {
            continue;
        };
        if visited.insert(resolved.clone()) {
            filtered.push(resolved);
        }
    }
    filtered
}
