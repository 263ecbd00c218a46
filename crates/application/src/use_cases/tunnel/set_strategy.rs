use crate::ports::TunnelSessionPort;
use ferrous_tunnel_domain::{DomainError, TunnelConfig};
use std::sync::Arc;

pub struct SetStrategyUseCase {
    session: Arc<dyn TunnelSessionPort>,
}

impl SetStrategyUseCase {
    pub fn new(session: Arc<dyn TunnelSessionPort>) -> Self {
        Self { session }
    }

    pub fn execute(&self, strategy_id: &str) -> Result<String, DomainError> {
        let id = TunnelConfig::normalize_strategy_id(strategy_id)?;
        self.session.set_strategy(id.clone());
        Ok(id)
    }
}
