use serde::{Deserialize, Serialize};

use super::dispatch::DispatchConfig;
use super::errors::ConfigError;
use super::interface::InterfaceConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::tunnel::TunnelSection;
use crate::tunnel_config::TunnelConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-tunnel.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-tunnel/config.toml";

/// Main configuration structure for Ferrous Tunnel
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Control API listener
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolver and strategy used when the tunnel starts
    #[serde(default)]
    pub tunnel: TunnelSection,

    /// Virtual interface parameters
    #[serde(default)]
    pub interface: InterfaceConfig,

    /// Worker pool and timeouts
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-tunnel.toml in current directory
    /// 3. /etc/ferrous-tunnel/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.control_port {
            self.server.control_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(url) = overrides.resolver_url {
            self.tunnel.resolver_url = url;
        }
        if let Some(strategy) = overrides.strategy_id {
            self.tunnel.strategy_id = strategy;
        }
        if overrides.autostart {
            self.tunnel.autostart = true;
        }
        if let Some(name) = overrides.interface_name {
            self.interface.name = Some(name);
        }
        if let Some(fd) = overrides.tun_fd {
            self.interface.fd = Some(fd);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.control_port == 0 {
            return Err(ConfigError::Validation(
                "Control port cannot be 0".to_string(),
            ));
        }

        TunnelConfig::normalize_resolver_url(&self.tunnel.resolver_url)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.dispatch.workers == 0 {
            return Err(ConfigError::Validation(
                "Dispatch pool needs at least one worker".to_string(),
            ));
        }

        if self.dispatch.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "Dispatch queue capacity cannot be 0".to_string(),
            ));
        }

        if self.dispatch.connect_timeout_ms == 0 || self.dispatch.read_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "DoH timeouts must be greater than 0".to_string(),
            ));
        }

        if self.dispatch.idle_poll_ms == 0 {
            return Err(ConfigError::Validation(
                "Idle poll interval must be greater than 0".to_string(),
            ));
        }

        if self.dispatch.shutdown_grace_ms == 0 {
            return Err(ConfigError::Validation(
                "Shutdown grace period must be greater than 0".to_string(),
            ));
        }

        if self.interface.mtu < 576 {
            return Err(ConfigError::Validation(format!(
                "MTU {} is below the IPv4 minimum of 576",
                self.interface.mtu
            )));
        }

        if self.interface.prefix_len > 32 {
            return Err(ConfigError::Validation(format!(
                "Invalid IPv4 prefix length: {}",
                self.interface.prefix_len
            )));
        }

        if self.interface.address == self.interface.dns_address {
            return Err(ConfigError::Validation(
                "Interface address and virtual DNS address must differ".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::Write {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub control_port: Option<u16>,
    pub bind_address: Option<String>,
    pub resolver_url: Option<String>,
    pub strategy_id: Option<String>,
    pub autostart: bool,
    pub interface_name: Option<String>,
    pub tun_fd: Option<i32>,
    pub log_level: Option<String>,
}
