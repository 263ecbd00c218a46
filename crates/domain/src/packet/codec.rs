use super::{
    ipv4_checksum, DEFAULT_TTL, DNS_PORT, FLAG_DONT_FRAGMENT, IPV4_HEADER_LEN, IPV4_VERSION,
    MAX_REPLY_PAYLOAD, PROTOCOL_UDP, UDP_HEADER_LEN,
};
use crate::{DomainError, ParsedQuery};
use bytes::Bytes;
use std::net::Ipv4Addr;

/// Extracts a DNS query from a raw IPv4/UDP datagram.
///
/// Returns `None` for anything that is not an IPv4 UDP datagram addressed to
/// port 53 with a non-empty payload, including truncated input.
pub fn decode(raw: &[u8]) -> Option<ParsedQuery> {
    let first = *raw.first()?;
    if first >> 4 != IPV4_VERSION {
        return None;
    }

    if *raw.get(9)? != PROTOCOL_UDP {
        return None;
    }

    let ip_header_len = usize::from(first & 0x0F) * 4;
    if ip_header_len < IPV4_HEADER_LEN {
        return None;
    }

    let udp = raw.get(ip_header_len..ip_header_len + UDP_HEADER_LEN)?;
    let destination_port = u16::from_be_bytes([udp[2], udp[3]]);
    if destination_port != DNS_PORT {
        return None;
    }

    let payload = &raw[ip_header_len + UDP_HEADER_LEN..];
    if payload.is_empty() {
        return None;
    }

    Some(ParsedQuery {
        source_address: Ipv4Addr::new(raw[12], raw[13], raw[14], raw[15]),
        source_port: u16::from_be_bytes([udp[0], udp[1]]),
        dns_payload: Bytes::copy_from_slice(payload),
    })
}

/// Builds an IPv4/UDP datagram carrying `payload`.
///
/// The IPv4 header has no options, ID 0, DF set and TTL 64. The UDP checksum
/// is left at zero, which IPv4 defines as "not computed".
pub fn encode_reply(
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
    src_port: u16,
    dst_port: u16,
    payload: &[u8],
) -> Result<Vec<u8>, DomainError> {
    if payload.len() > MAX_REPLY_PAYLOAD {
        return Err(DomainError::PayloadTooLarge(payload.len()));
    }

    let udp_len = (UDP_HEADER_LEN + payload.len()) as u16;
    let total_len = (IPV4_HEADER_LEN + UDP_HEADER_LEN + payload.len()) as u16;

    let mut packet = Vec::with_capacity(usize::from(total_len));

    packet.push((IPV4_VERSION << 4) | (IPV4_HEADER_LEN / 4) as u8);
    packet.push(0);
    packet.extend_from_slice(&total_len.to_be_bytes());
    packet.extend_from_slice(&0u16.to_be_bytes());
    packet.extend_from_slice(&FLAG_DONT_FRAGMENT.to_be_bytes());
    packet.push(DEFAULT_TTL);
    packet.push(PROTOCOL_UDP);
    packet.extend_from_slice(&[0, 0]);
    packet.extend_from_slice(&src_addr.octets());
    packet.extend_from_slice(&dst_addr.octets());

    let checksum = ipv4_checksum(&packet[..IPV4_HEADER_LEN]);
    packet[10..12].copy_from_slice(&checksum.to_be_bytes());

    packet.extend_from_slice(&src_port.to_be_bytes());
    packet.extend_from_slice(&dst_port.to_be_bytes());
    packet.extend_from_slice(&udp_len.to_be_bytes());
    packet.extend_from_slice(&[0, 0]);

    packet.extend_from_slice(payload);
    Ok(packet)
}
