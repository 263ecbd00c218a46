use crate::ports::TunnelSessionPort;
use std::sync::Arc;

pub struct StopTunnelUseCase {
    session: Arc<dyn TunnelSessionPort>,
}

impl StopTunnelUseCase {
    pub fn new(session: Arc<dyn TunnelSessionPort>) -> Self {
        Self { session }
    }

    pub async fn execute(&self) {
        self.session.stop().await;
    }
}
