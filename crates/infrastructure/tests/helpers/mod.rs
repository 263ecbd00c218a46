#![allow(dead_code)]

pub mod doh_server_mock;
pub mod memory_interface;

pub use doh_server_mock::{MockAnswer, MockDohServer};
pub use memory_interface::{MemoryInterface, MockInterfaceFactory};

use ferrous_tunnel_domain::config::{DispatchConfig, InterfaceConfig};
use ferrous_tunnel_domain::packet;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::Ipv4Addr;
use std::str::FromStr;

pub const CLIENT: Ipv4Addr = Ipv4Addr::new(10, 8, 0, 1);
pub const VIRTUAL_DNS: Ipv4Addr = Ipv4Addr::new(10, 8, 0, 2);

/// Short timeouts and a fast idle poll so tests stay quick.
pub fn fast_dispatch() -> DispatchConfig {
    DispatchConfig {
        workers: 2,
        queue_capacity: 16,
        connect_timeout_ms: 500,
        read_timeout_ms: 500,
        idle_poll_ms: 2,
        shutdown_grace_ms: 300,
    }
}

pub fn interface_config() -> InterfaceConfig {
    InterfaceConfig::default()
}

/// IPv4/UDP datagram from the client to the virtual resolver.
pub fn client_datagram(source_port: u16, dns_payload: &[u8]) -> Vec<u8> {
    packet::encode_reply(CLIENT, VIRTUAL_DNS, source_port, 53, dns_payload).unwrap()
}

/// Serialized recursive A query.
pub fn dns_query(id: u16, domain: &str) -> Vec<u8> {
    let mut query = Query::new();
    query.set_name(Name::from_str(domain).unwrap());
    query.set_query_type(RecordType::A);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.metadata.recursion_desired = true;
    message.add_query(query);

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

/// Response echoing the ID and question of `query`.
pub fn dns_response_for(query: &[u8]) -> Vec<u8> {
    let request = Message::from_vec(query).unwrap();

    let mut message = Message::new(request.metadata.id, MessageType::Response, OpCode::Query);
    message.metadata.recursion_desired = true;
    message.metadata.recursion_available = true;
    for query in &request.queries {
        message.add_query(query.clone());
    }

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

pub fn message_id(dns_payload: &[u8]) -> u16 {
    u16::from_be_bytes([dns_payload[0], dns_payload[1]])
}
