use ferrous_tunnel_application::ports::TunnelSessionPort;
use ferrous_tunnel_application::use_cases::{
    GetTunnelStatusUseCase, SetResolverUseCase, SetStrategyUseCase, StartTunnelUseCase,
    StopTunnelUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct TunnelState {
    pub start: Arc<StartTunnelUseCase>,
    pub stop: Arc<StopTunnelUseCase>,
    pub set_resolver: Arc<SetResolverUseCase>,
    pub set_strategy: Arc<SetStrategyUseCase>,
    pub get_status: Arc<GetTunnelStatusUseCase>,
}

impl TunnelState {
    pub fn new(session: Arc<dyn TunnelSessionPort>) -> Self {
        Self {
            start: Arc::new(StartTunnelUseCase::new(Arc::clone(&session))),
            stop: Arc::new(StopTunnelUseCase::new(Arc::clone(&session))),
            set_resolver: Arc::new(SetResolverUseCase::new(Arc::clone(&session))),
            set_strategy: Arc::new(SetStrategyUseCase::new(Arc::clone(&session))),
            get_status: Arc::new(GetTunnelStatusUseCase::new(session)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub tunnel: TunnelState,
}
