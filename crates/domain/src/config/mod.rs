pub mod dispatch;
pub mod errors;
pub mod interface;
pub mod logging;
pub mod root;
pub mod server;
pub mod tunnel;

pub use dispatch::DispatchConfig;
pub use errors::ConfigError;
pub use interface::InterfaceConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use tunnel::TunnelSection;
