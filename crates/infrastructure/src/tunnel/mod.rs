mod events;
mod pipeline;
mod session;
mod state;
mod stats;

pub use events::TunnelEventEmitter;
pub use session::TunnelSession;
