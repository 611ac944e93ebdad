//! Module `parser`
//!
//! Two input grammars, both producing a `DataEndpoint`:
//!
//! - legacy (PORT): six comma-separated decimal fields, the first four are
//!   IPv4 octets, the last two encode the port as `high * 256 + low`;
//! - extended (EPRT): pipe-delimited fields where field index 2 is a host
//!   (name or address) and field index 3 is a numeric port.
//!
//! Parse failures are errors surfaced as replies, never panics.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};

use crate::error::EndpointError;

/// A resolved data-connection target, produced by PORT/EPRT and consumed by
/// the next RETR/STOR (single-use).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEndpoint {
    addr: IpAddr,
    port: u16,
}

impl DataEndpoint {
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}

/// Parses a legacy `h1,h2,h3,h4,p1,p2` PORT argument.
pub fn parse_port_arg(arg: &str) -> Result<DataEndpoint, EndpointError> {
    let fields: Vec<&str> = arg.split(',').map(str::trim).collect();
    if fields.len() != 6 {
        return Err(EndpointError::Malformed(arg.to_string()));
    }

    let mut octets = [0u8; 4];
    for (octet, field) in octets.iter_mut().zip(&fields[..4]) {
        *octet = field
            .parse()
            .map_err(|_| EndpointError::Malformed(arg.to_string()))?;
    }

    let high: u8 = fields[4]
        .parse()
        .map_err(|_| EndpointError::Malformed(arg.to_string()))?;
    let low: u8 = fields[5]
        .parse()
        .map_err(|_| EndpointError::Malformed(arg.to_string()))?;

    Ok(DataEndpoint {
        addr: IpAddr::V4(Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3])),
        port: u16::from(high) * 256 + u16::from(low),
    })
}

/// Parses an extended `|proto|host|port|` EPRT argument.
pub fn parse_eprt_arg(arg: &str) -> Result<DataEndpoint, EndpointError> {
    let fields: Vec<&str> = arg.split('|').collect();
    if fields.len() <= 3 {
        return Err(EndpointError::Malformed(arg.to_string()));
    }

    let host = fields[2];
    let port: u16 = fields[3]
        .parse()
        .map_err(|_| EndpointError::Malformed(arg.to_string()))?;

    let addr = resolve_host(host)?;
    Ok(DataEndpoint { addr, port })
}

/// Resolves a host field that may be an address literal or a name.
fn resolve_host(host: &str) -> Result<IpAddr, EndpointError> {
    if host.is_empty() {
        return Err(EndpointError::Unresolvable(host.to_string()));
    }

    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    (host, 0u16)
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|sock| sock.ip())
        .ok_or_else(|| EndpointError::Unresolvable(host.to_string()))
}
