use super::events::TunnelEventEmitter;
use super::pipeline::{self, PipelineContext};
use super::state::SessionFlag;
use super::stats::TunnelCounters;
use arc_swap::{ArcSwap, ArcSwapOption};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ferrous_tunnel_application::ports::{
    DohClient, TunnelSessionPort, VirtualInterface, VirtualInterfaceFactory,
};
use ferrous_tunnel_domain::config::{DispatchConfig, InterfaceConfig};
use ferrous_tunnel_domain::resolver_label::status_label;
use ferrous_tunnel_domain::{
    DomainError, SessionState, TunnelConfig, TunnelEvent, TunnelStats,
};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Resources owned by a running tunnel.
struct ActiveTunnel {
    interface: Arc<dyn VirtualInterface>,
    shutdown: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

/// DNS-over-HTTPS tunnel over a host-provided virtual interface.
///
/// Lifecycle transitions are serialized by an async mutex, so at most one
/// interface and one read loop exist at any time. The running flag and the
/// tunnel configuration are readable without taking that lock.
pub struct TunnelSession {
    factory: Arc<dyn VirtualInterfaceFactory>,
    doh: Arc<dyn DohClient>,
    interface_config: InterfaceConfig,
    dispatch_config: DispatchConfig,
    config: Arc<ArcSwap<TunnelConfig>>,
    state: Arc<SessionFlag>,
    stats: Arc<TunnelCounters>,
    started_at: ArcSwapOption<DateTime<Utc>>,
    events: TunnelEventEmitter,
    active: Mutex<Option<ActiveTunnel>>,
}

impl TunnelSession {
    pub fn new(
        factory: Arc<dyn VirtualInterfaceFactory>,
        doh: Arc<dyn DohClient>,
        interface_config: InterfaceConfig,
        dispatch_config: DispatchConfig,
        initial: TunnelConfig,
    ) -> Self {
        Self {
            factory,
            doh,
            interface_config,
            dispatch_config,
            config: Arc::new(ArcSwap::from_pointee(initial)),
            state: Arc::new(SessionFlag::new()),
            stats: Arc::new(TunnelCounters::default()),
            started_at: ArcSwapOption::empty(),
            events: TunnelEventEmitter::new_disabled(),
            active: Mutex::new(None),
        }
    }

    pub fn with_events(mut self, events: TunnelEventEmitter) -> Self {
        self.events = events;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state.load()
    }

    fn current_label(&self) -> String {
        let config = self.config.load();
        status_label(&config.resolver_url, &config.strategy_id)
    }

    async fn shutdown_tasks(&self, shutdown: &CancellationToken, mut tasks: Vec<JoinHandle<()>>) {
        shutdown.cancel();

        let grace = self.dispatch_config.shutdown_grace();
        if tokio::time::timeout(grace, join_all(tasks.iter_mut()))
            .await
            .is_err()
        {
            warn!(
                grace_ms = grace.as_millis() as u64,
                "Tunnel tasks did not drain in time, aborting"
            );
            for task in &tasks {
                task.abort();
            }
            // Aborted tasks must be gone before the interface is closed.
            for result in join_all(tasks.drain(..)).await {
                if let Err(e) = result {
                    if !e.is_cancelled() {
                        warn!(error = %e, "Tunnel task ended abnormally");
                    }
                }
            }
        }
    }
}

#[async_trait]
impl TunnelSessionPort for TunnelSession {
    async fn start(&self, config: TunnelConfig) -> Result<(), DomainError> {
        let mut active = self.active.lock().await;
        if active.is_some() {
            debug!("Tunnel already running, start ignored");
            return Ok(());
        }

        self.config.store(Arc::new(config));

        let interface = match self.factory.establish(&self.interface_config).await {
            Ok(interface) => interface,
            Err(e) => {
                error!(error = %e, "Failed to establish virtual interface");
                self.events.emit(TunnelEvent::StartFailed {
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };

        let shutdown = CancellationToken::new();
        self.state.store(SessionState::Running);

        let ctx = Arc::new(PipelineContext {
            interface: Arc::clone(&interface),
            doh: Arc::clone(&self.doh),
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
            stats: Arc::clone(&self.stats),
            dns_address: self.interface_config.dns_address,
            idle_poll: self.dispatch_config.idle_poll(),
            shutdown: shutdown.clone(),
        });
        let tasks = pipeline::spawn(
            ctx,
            self.dispatch_config.workers.max(1),
            self.dispatch_config.queue_capacity.max(1),
        );

        *active = Some(ActiveTunnel {
            interface: Arc::clone(&interface),
            shutdown,
            tasks,
        });
        self.started_at.store(Some(Arc::new(Utc::now())));

        let label = self.current_label();
        info!(
            interface = %interface.name(),
            mtu = interface.mtu(),
            resolver = %self.config.load().effective_resolver_url(),
            workers = self.dispatch_config.workers,
            label = %label,
            "Tunnel started"
        );
        self.events.emit(TunnelEvent::Started { label });

        Ok(())
    }

    async fn stop(&self) {
        let mut active = self.active.lock().await;
        let Some(tunnel) = active.take() else {
            debug!("Tunnel already stopped, stop ignored");
            return;
        };

        self.state.store(SessionState::Stopped);
        self.shutdown_tasks(&tunnel.shutdown, tunnel.tasks).await;

        if let Err(e) = tunnel.interface.close().await {
            warn!(
                interface = %tunnel.interface.name(),
                error = %e,
                "Error closing virtual interface"
            );
        }

        self.started_at.store(None);
        info!(stats = ?self.stats.snapshot(), "Tunnel stopped");
        self.events.emit(TunnelEvent::Stopped);
    }

    fn set_resolver(&self, resolver_url: String) {
        self.config.rcu(|current| TunnelConfig {
            resolver_url: resolver_url.clone(),
            strategy_id: current.strategy_id.clone(),
        });

        let label = self.current_label();
        info!(resolver = %resolver_url, label = %label, "Resolver updated");
        self.events.emit(TunnelEvent::ResolverChanged { label });
    }

    fn set_strategy(&self, strategy_id: String) {
        self.config.rcu(|current| TunnelConfig {
            resolver_url: current.resolver_url.clone(),
            strategy_id: strategy_id.clone(),
        });

        info!(strategy = %strategy_id, "Strategy updated");
        self.events.emit(TunnelEvent::StrategyChanged { strategy_id });
    }

    fn is_running(&self) -> bool {
        self.state.is_running()
    }

    fn config(&self) -> TunnelConfig {
        TunnelConfig::clone(&self.config.load())
    }

    fn stats(&self) -> TunnelStats {
        self.stats.snapshot()
    }

    fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at.load_full().map(|at| *at)
    }
}

impl Drop for TunnelSession {
    fn drop(&mut self) {
        if let Some(tunnel) = self.active.get_mut().take() {
            self.state.store(SessionState::Stopped);
            tunnel.shutdown.cancel();
        }
    }
}
