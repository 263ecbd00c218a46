use chrono::{DateTime, Utc};
use serde::Serialize;

/// Pipeline counters, cumulative for the lifetime of a session object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TunnelStats {
    pub packets_read: u64,
    pub packets_dropped: u64,
    pub queries_dispatched: u64,
    pub queries_rejected: u64,
    pub upstream_failures: u64,
    pub replies_written: u64,
    pub replies_discarded: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TunnelStatus {
    pub active: bool,
    pub label: String,
    pub resolver_url: String,
    pub strategy_id: String,
    pub started_at: Option<DateTime<Utc>>,
    pub stats: TunnelStats,
}
