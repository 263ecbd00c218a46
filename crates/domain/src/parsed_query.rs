use bytes::Bytes;
use std::net::Ipv4Addr;

/// A DNS query lifted out of an intercepted IPv4/UDP datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub source_address: Ipv4Addr,
    pub source_port: u16,
    pub dns_payload: Bytes,
}

impl ParsedQuery {
    pub fn new(source_address: Ipv4Addr, source_port: u16, dns_payload: impl Into<Bytes>) -> Self {
        Self {
            source_address,
            source_port,
            dns_payload: dns_payload.into(),
        }
    }

    /// DNS message ID, when the payload is long enough to carry one.
    pub fn message_id(&self) -> Option<u16> {
        self.dns_payload
            .get(..2)
            .map(|id| u16::from_be_bytes([id[0], id[1]]))
    }
}
