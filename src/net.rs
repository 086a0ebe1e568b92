// src/net.rs

//! Best-effort local address discovery for the startup banner.
//!
//! The daemon shows its own IPv4 address on the matrix once at startup so a
//! user standing in front of the panel knows where to point a client. When
//! discovery fails (no route, air-gapped box) the banner falls back to a
//! placeholder; nothing else in the daemon depends on this.

use std::net::{IpAddr, UdpSocket};

use tracing::debug;

/// Discover the local IPv4 address used for outbound traffic.
///
/// Connects a UDP socket to a public address; no packet is sent, the kernel
/// just picks a source address for the route. Returns `None` when the host
/// has no usable route.
pub fn local_ipv4() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    let addr = socket.local_addr().ok()?;

    if addr.ip().is_unspecified() {
        return None;
    }

    debug!(ip = %addr.ip(), "discovered local address");
    Some(addr.ip())
}

/// Banner text for startup: the local address, or a placeholder.
pub fn banner_text() -> String {
    match local_ipv4() {
        Some(ip) => ip.to_string(),
        None => "Ready".to_string(),
    }
}
