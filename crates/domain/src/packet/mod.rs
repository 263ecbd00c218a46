//! IPv4/UDP framing for intercepted DNS traffic.
//!
//! Only the IP and UDP layers are inspected; DNS content passes through
//! untouched in both directions.
//!
//! ```text
//!  0      1      2      3
//! +------+------+-------------+
//! |ver/ihl| dscp | total length|  IPv4, 20 bytes without options
//! |   identification | flags  |
//! | ttl  |proto |  checksum   |
//! |        source address     |
//! |     destination address   |
//! +------+------+-------------+
//! |  src port   |  dst port   |  UDP, 8 bytes
//! |   length    |  checksum   |
//! +-------------+-------------+
//! |        DNS payload ...    |
//! ```

mod checksum;
mod codec;

pub use checksum::ipv4_checksum;
pub use codec::{decode, encode_reply};

pub const IPV4_VERSION: u8 = 4;
pub const IPV4_HEADER_LEN: usize = 20;
pub const UDP_HEADER_LEN: usize = 8;
pub const PROTOCOL_UDP: u8 = 17;
pub const DNS_PORT: u16 = 53;
pub const DEFAULT_TTL: u8 = 64;
pub const FLAG_DONT_FRAGMENT: u16 = 0x4000;

/// Largest DNS payload that still fits the 16-bit IPv4 total length.
pub const MAX_REPLY_PAYLOAD: usize = u16::MAX as usize - IPV4_HEADER_LEN - UDP_HEADER_LEN;
