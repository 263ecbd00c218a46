use serde::{Deserialize, Serialize};

/// Local control API listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_control_port")]
    pub control_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            control_port: default_control_port(),
            bind_address: default_bind_address(),
        }
    }
}

fn default_control_port() -> u16 {
    8053
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}
