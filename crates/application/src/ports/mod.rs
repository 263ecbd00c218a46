mod doh_client;
mod tunnel_session;
mod virtual_interface;

pub use doh_client::DohClient;
pub use tunnel_session::TunnelSessionPort;
pub use virtual_interface::{VirtualInterface, VirtualInterfaceFactory};
