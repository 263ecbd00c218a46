use super::validated_resolver_url;
use crate::ports::TunnelSessionPort;
use ferrous_tunnel_domain::DomainError;
use std::sync::Arc;

pub struct SetResolverUseCase {
    session: Arc<dyn TunnelSessionPort>,
}

impl SetResolverUseCase {
    pub fn new(session: Arc<dyn TunnelSessionPort>) -> Self {
        Self { session }
    }

    /// Returns the normalized URL that was applied.
    pub fn execute(&self, resolver_url: &str) -> Result<String, DomainError> {
        let url = validated_resolver_url(resolver_url)?;
        self.session.set_resolver(url.clone());
        Ok(url)
    }
}
