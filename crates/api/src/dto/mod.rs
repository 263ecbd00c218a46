pub mod tunnel;

pub use tunnel::{
    SetResolverRequest, SetStrategyRequest, StartTunnelRequest, TunnelStatsResponse,
    TunnelStatusResponse,
};
