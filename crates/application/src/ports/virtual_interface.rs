use async_trait::async_trait;
use ferrous_tunnel_domain::config::InterfaceConfig;
use ferrous_tunnel_domain::DomainError;
use std::sync::Arc;

/// Host-provided packet device carrying raw IPv4 datagrams.
#[async_trait]
pub trait VirtualInterface: Send + Sync {
    /// Reads one datagram into `buf`. `Ok(0)` means no data was available.
    async fn read_packet(&self, buf: &mut [u8]) -> Result<usize, DomainError>;

    async fn write_packet(&self, packet: &[u8]) -> Result<(), DomainError>;

    /// Releases the device. Any I/O after this fails with `InterfaceClosed`.
    async fn close(&self) -> Result<(), DomainError>;

    fn name(&self) -> &str;

    fn mtu(&self) -> u16;
}

/// Establishes a DNS-only virtual interface.
#[async_trait]
pub trait VirtualInterfaceFactory: Send + Sync {
    async fn establish(
        &self,
        config: &InterfaceConfig,
    ) -> Result<Arc<dyn VirtualInterface>, DomainError>;
}
