pub mod tunnel;

pub use tunnel::{
    GetTunnelStatusUseCase, SetResolverUseCase, SetStrategyUseCase, StartTunnelUseCase,
    StopTunnelUseCase,
};
