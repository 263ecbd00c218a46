use crate::ports::TunnelSessionPort;
use ferrous_tunnel_domain::resolver_label::status_label;
use ferrous_tunnel_domain::TunnelStatus;
use std::sync::Arc;

pub struct GetTunnelStatusUseCase {
    session: Arc<dyn TunnelSessionPort>,
}

impl GetTunnelStatusUseCase {
    pub fn new(session: Arc<dyn TunnelSessionPort>) -> Self {
        Self { session }
    }

    pub fn execute(&self) -> TunnelStatus {
        let config = self.session.config();
        let active = self.session.is_running();

        TunnelStatus {
            active,
            label: status_label(&config.resolver_url, &config.strategy_id),
            resolver_url: config.resolver_url,
            strategy_id: config.strategy_id,
            started_at: if active { self.session.started_at() } else { None },
            stats: self.session.stats(),
        }
    }
}
