use ferrous_tunnel_application::ports::VirtualInterfaceFactory;
use ferrous_tunnel_domain::{Config, TunnelEvent};
use ferrous_tunnel_infrastructure::{ReqwestDohClient, TunnelEventEmitter, TunnelSession};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

pub struct TunnelServices {
    pub session: Arc<TunnelSession>,
}

impl TunnelServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let doh = Arc::new(ReqwestDohClient::from_config(&config.dispatch)?);
        let factory = interface_factory()?;

        let (events, receiver) = TunnelEventEmitter::new_enabled();
        spawn_event_logger(receiver);

        let session = TunnelSession::new(
            factory,
            doh,
            config.interface.clone(),
            config.dispatch.clone(),
            config.tunnel.to_tunnel_config(),
        )
        .with_events(events);

        info!(
            workers = config.dispatch.workers,
            queue_capacity = config.dispatch.queue_capacity,
            dns_address = %config.interface.dns_address,
            "Tunnel session ready"
        );

        Ok(Self {
            session: Arc::new(session),
        })
    }
}

#[cfg(all(unix, feature = "tun"))]
fn interface_factory() -> anyhow::Result<Arc<dyn VirtualInterfaceFactory>> {
    Ok(Arc::new(ferrous_tunnel_infrastructure::TunInterfaceFactory::new()))
}

#[cfg(not(all(unix, feature = "tun")))]
fn interface_factory() -> anyhow::Result<Arc<dyn VirtualInterfaceFactory>> {
    anyhow::bail!("no virtual interface backend available; build with the `tun` feature on a unix host")
}

fn spawn_event_logger(mut receiver: mpsc::UnboundedReceiver<TunnelEvent>) {
    tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            match event {
                TunnelEvent::Started { label } => info!(label = %label, "Tunnel is up"),
                TunnelEvent::StartFailed { reason } => {
                    warn!(reason = %reason, "Tunnel could not start")
                }
                TunnelEvent::Stopped => info!("Tunnel is down"),
                TunnelEvent::ResolverChanged { label } => {
                    info!(label = %label, "Tunnel resolver changed")
                }
                TunnelEvent::StrategyChanged { strategy_id } => {
                    info!(strategy = %strategy_id, "Tunnel strategy changed")
                }
            }
        }
    });
}
