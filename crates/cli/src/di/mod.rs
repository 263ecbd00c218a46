mod tunnel;

pub use tunnel::TunnelServices;
