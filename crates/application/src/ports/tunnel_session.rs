use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ferrous_tunnel_domain::{DomainError, TunnelConfig, TunnelStats};

/// Lifecycle and configuration of the DNS tunnel.
///
/// `start` is a no-op while running and `stop` is a no-op while stopped.
#[async_trait]
pub trait TunnelSessionPort: Send + Sync {
    async fn start(&self, config: TunnelConfig) -> Result<(), DomainError>;

    async fn stop(&self);

    /// Takes effect for queries dispatched after the call.
    fn set_resolver(&self, resolver_url: String);

    fn set_strategy(&self, strategy_id: String);

    fn is_running(&self) -> bool;

    fn config(&self) -> TunnelConfig;

    fn stats(&self) -> TunnelStats;

    fn started_at(&self) -> Option<DateTime<Utc>>;
}
