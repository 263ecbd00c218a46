pub mod doh;
pub mod interface;
pub mod tunnel;

pub use doh::ReqwestDohClient;
pub use tunnel::{TunnelEventEmitter, TunnelSession};

#[cfg(all(unix, feature = "tun"))]
pub use interface::{TunInterface, TunInterfaceFactory};
