use crate::tunnel_config::{TunnelConfig, DEFAULT_RESOLVER_URL, DEFAULT_STRATEGY_ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TunnelSection {
    #[serde(default = "default_resolver_url")]
    pub resolver_url: String,

    #[serde(default = "default_strategy_id")]
    pub strategy_id: String,

    /// Start the tunnel as soon as the daemon is up.
    #[serde(default)]
    pub autostart: bool,
}

impl TunnelSection {
    pub fn to_tunnel_config(&self) -> TunnelConfig {
        TunnelConfig::new(self.resolver_url.clone(), self.strategy_id.clone())
    }
}

impl Default for TunnelSection {
    fn default() -> Self {
        Self {
            resolver_url: default_resolver_url(),
            strategy_id: default_strategy_id(),
            autostart: false,
        }
    }
}

fn default_resolver_url() -> String {
    DEFAULT_RESOLVER_URL.to_string()
}

fn default_strategy_id() -> String {
    DEFAULT_STRATEGY_ID.to_string()
}
