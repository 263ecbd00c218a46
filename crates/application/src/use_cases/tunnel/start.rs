use super::validated_resolver_url;
use crate::ports::TunnelSessionPort;
use ferrous_tunnel_domain::{DomainError, TunnelConfig};
use std::sync::Arc;
use tracing::info;

pub struct StartTunnelUseCase {
    session: Arc<dyn TunnelSessionPort>,
}

impl StartTunnelUseCase {
    pub fn new(session: Arc<dyn TunnelSessionPort>) -> Self {
        Self { session }
    }

    /// Starts the tunnel, applying the given overrides on top of the current
    /// configuration. Does nothing if the tunnel is already running.
    pub async fn execute(
        &self,
        resolver_url: Option<String>,
        strategy_id: Option<String>,
    ) -> Result<(), DomainError> {
        if self.session.is_running() {
            info!("Tunnel already running, start ignored");
            return Ok(());
        }

        let current = self.session.config();

        let resolver_url = match resolver_url {
            Some(url) => validated_resolver_url(&url)?,
            None => current.resolver_url,
        };
        let strategy_id = match strategy_id {
            Some(id) => TunnelConfig::normalize_strategy_id(&id)?,
            None => current.strategy_id,
        };

        self.session
            .start(TunnelConfig::new(resolver_url, strategy_id))
            .await
    }
}
