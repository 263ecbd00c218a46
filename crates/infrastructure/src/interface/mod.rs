//! Virtual interface adapters.
//!
//! The session only talks to the `VirtualInterface` port. On unix hosts the
//! `tun` feature provides a tun-rs backed implementation that either creates
//! a device or adopts a descriptor handed over by the host (for example an
//! Android `VpnService` tunnel fd).

#[cfg(all(unix, feature = "tun"))]
mod tun;

#[cfg(all(unix, feature = "tun"))]
pub use tun::{TunInterface, TunInterfaceFactory};
