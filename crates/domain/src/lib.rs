//! Ferrous Tunnel Domain Layer
pub mod config;
pub mod errors;
pub mod packet;
pub mod parsed_query;
pub mod resolver_label;
pub mod session_state;
pub mod tunnel_config;
pub mod tunnel_event;
pub mod tunnel_status;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use parsed_query::ParsedQuery;
pub use session_state::SessionState;
pub use tunnel_config::{TunnelConfig, DEFAULT_RESOLVER_URL, DEFAULT_STRATEGY_ID};
pub use tunnel_event::TunnelEvent;
pub use tunnel_status::{TunnelStats, TunnelStatus};
