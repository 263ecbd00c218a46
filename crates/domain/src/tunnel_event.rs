/// Lifecycle notifications delivered to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TunnelEvent {
    Started { label: String },
    StartFailed { reason: String },
    Stopped,
    ResolverChanged { label: String },
    StrategyChanged { strategy_id: String },
}
