mod get_status;
mod set_resolver;
mod set_strategy;
mod start;
mod stop;

pub use get_status::GetTunnelStatusUseCase;
pub use set_resolver::SetResolverUseCase;
pub use set_strategy::SetStrategyUseCase;
pub use start::StartTunnelUseCase;
pub use stop::StopTunnelUseCase;

use ferrous_tunnel_domain::{DomainError, TunnelConfig};
use tracing::warn;

fn validated_resolver_url(url: &str) -> Result<String, DomainError> {
    let url = TunnelConfig::normalize_resolver_url(url)?;
    if url.starts_with("http://") {
        warn!(url = %url, "Resolver URL is not using TLS");
    }
    Ok(url)
}
