use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use ferrous_tunnel_application::ports::{VirtualInterface, VirtualInterfaceFactory};
use ferrous_tunnel_domain::config::InterfaceConfig;
use ferrous_tunnel_domain::DomainError;
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// TUN device restricted to DNS traffic towards the virtual resolver.
pub struct TunInterface {
    device: ArcSwapOption<tun_rs::AsyncDevice>,
    name: String,
    mtu: u16,
}

impl TunInterface {
    /// Creates a point-to-point device `address/prefix_len` → `dns_address`.
    ///
    /// Requires root or `CAP_NET_ADMIN` on Linux.
    pub fn create(config: &InterfaceConfig) -> Result<Self, DomainError> {
        let mut builder = tun_rs::DeviceBuilder::new();

        if let Some(ref name) = config.name {
            builder = builder.name(name);
        }

        let device = builder
            .ipv4(config.address, config.prefix_len, Some(config.dns_address))
            .mtu(config.mtu)
            .build_async()
            .map_err(|e| DomainError::InterfaceUnavailable(e.to_string()))?;

        let name = device
            .name()
            .map_err(|e| DomainError::InterfaceUnavailable(e.to_string()))?;

        info!(
            name = %name,
            address = %config.address,
            dns_address = %config.dns_address,
            mtu = config.mtu,
            "Created TUN device"
        );

        Ok(Self {
            device: ArcSwapOption::from_pointee(device),
            name,
            mtu: config.mtu,
        })
    }

    /// Wraps a descriptor already configured by the host.
    ///
    /// # Safety
    ///
    /// `fd` must be an open TUN descriptor; ownership passes to the returned
    /// interface, which closes it.
    pub unsafe fn from_fd(fd: RawFd, config: &InterfaceConfig) -> Result<Self, DomainError> {
        let device = tun_rs::AsyncDevice::from_fd(fd).map_err(|e| {
            DomainError::InterfaceUnavailable(format!("failed to adopt fd {}: {}", fd, e))
        })?;

        let name = config
            .name
            .clone()
            .unwrap_or_else(|| format!("tun-fd{}", fd));
        info!(fd, name = %name, mtu = config.mtu, "Adopted host TUN descriptor");

        Ok(Self {
            device: ArcSwapOption::from_pointee(device),
            name,
            mtu: config.mtu,
        })
    }

    fn device(&self) -> Result<Arc<tun_rs::AsyncDevice>, DomainError> {
        self.device.load_full().ok_or(DomainError::InterfaceClosed)
    }
}

#[async_trait]
impl VirtualInterface for TunInterface {
    async fn read_packet(&self, buf: &mut [u8]) -> Result<usize, DomainError> {
        let device = self.device()?;
        Ok(device.recv(buf).await?)
    }

    async fn write_packet(&self, packet: &[u8]) -> Result<(), DomainError> {
        let device = self.device()?;
        device.send(packet).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), DomainError> {
        match self.device.swap(None) {
            Some(_) => {
                info!(name = %self.name, "Closed TUN device");
                Ok(())
            }
            None => Err(DomainError::InterfaceClosed),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn mtu(&self) -> u16 {
        self.mtu
    }
}

/// Creates a TUN device, or adopts `InterfaceConfig::fd` when the host supplies one.
///
/// A host descriptor is adopted at most once. Closing the interface closes
/// the descriptor, so its number may already belong to another resource when
/// the tunnel is restarted.
#[derive(Debug, Default)]
pub struct TunInterfaceFactory {
    host_fd_consumed: AtomicBool,
}

impl TunInterfaceFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VirtualInterfaceFactory for TunInterfaceFactory {
    async fn establish(
        &self,
        config: &InterfaceConfig,
    ) -> Result<Arc<dyn VirtualInterface>, DomainError> {
        let interface = match config.fd {
            Some(fd) => {
                if self.host_fd_consumed.swap(true, Ordering::AcqRel) {
                    warn!(fd, "Host TUN descriptor was already adopted, refusing to reuse it");
                    return Err(DomainError::InterfaceUnavailable(
                        "host descriptor already consumed".to_string(),
                    ));
                }
                // SAFETY: the host hands the descriptor over once; the flag above
                // guarantees it is never adopted a second time.
                unsafe { TunInterface::from_fd(fd, config)? }
            }
            None => TunInterface::create(config)?,
        };
        Ok(Arc::new(interface))
    }
}
