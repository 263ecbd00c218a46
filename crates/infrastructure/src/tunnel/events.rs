use ferrous_tunnel_domain::TunnelEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Delivers lifecycle notifications to the host.
///
/// Emitting never blocks the session. Once the host drops its receiver,
/// events are discarded and counted in [`TunnelEventEmitter::dropped`].
#[derive(Clone, Default)]
pub struct TunnelEventEmitter {
    sender: Option<mpsc::UnboundedSender<TunnelEvent>>,
    dropped: Arc<AtomicU64>,
}

impl TunnelEventEmitter {
    pub fn new_disabled() -> Self {
        Self::default()
    }

    pub fn new_enabled() -> (Self, mpsc::UnboundedReceiver<TunnelEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let emitter = Self {
            sender: Some(tx),
            dropped: Arc::default(),
        };
        (emitter, rx)
    }

    pub fn emit(&self, event: TunnelEvent) {
        let Some(ref tx) = self.sender else {
            trace!(event = ?event, "Event emitter disabled");
            return;
        };

        if let Err(mpsc::error::SendError(event)) = tx.send(event) {
            let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            if dropped == 1 {
                debug!(event = ?event, "Event receiver gone, discarding tunnel events");
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Events discarded because the receiver was dropped.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for TunnelEventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TunnelEventEmitter")
            .field("enabled", &self.is_enabled())
            .field("dropped", &self.dropped())
            .finish()
    }
}
