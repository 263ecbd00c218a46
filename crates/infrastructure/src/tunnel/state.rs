use ferrous_tunnel_domain::SessionState;
use std::sync::atomic::{AtomicU8, Ordering};

/// Authoritative running flag, read by every pipeline stage.
#[derive(Debug)]
pub(crate) struct SessionFlag(AtomicU8);

impl SessionFlag {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(SessionState::Stopped.as_u8()))
    }

    pub(crate) fn load(&self) -> SessionState {
        SessionState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, state: SessionState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }

    pub(crate) fn is_running(&self) -> bool {
        self.load().is_running()
    }
}
