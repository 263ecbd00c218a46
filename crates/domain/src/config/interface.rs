use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Parameters of the DNS-only virtual interface.
///
/// The device gets `address/prefix_len` and a point-to-point peer at
/// `dns_address`, which is the only routed destination. Every synthesized
/// reply uses `dns_address` as its source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InterfaceConfig {
    /// Requested device name; the OS picks one when absent.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_address")]
    pub address: Ipv4Addr,

    #[serde(default = "default_prefix_len")]
    pub prefix_len: u8,

    #[serde(default = "default_dns_address")]
    pub dns_address: Ipv4Addr,

    #[serde(default = "default_mtu")]
    pub mtu: u16,

    /// Adopt a descriptor already opened by the host instead of creating a device.
    #[serde(default)]
    pub fd: Option<i32>,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            name: None,
            address: default_address(),
            prefix_len: default_prefix_len(),
            dns_address: default_dns_address(),
            mtu: default_mtu(),
            fd: None,
        }
    }
}

fn default_address() -> Ipv4Addr {
    Ipv4Addr::new(10, 8, 0, 1)
}

fn default_prefix_len() -> u8 {
    32
}

fn default_dns_address() -> Ipv4Addr {
    Ipv4Addr::new(10, 8, 0, 2)
}

fn default_mtu() -> u16 {
    1500
}
