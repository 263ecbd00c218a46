use chrono::Utc;
use ferrous_tunnel_domain::{TunnelStats, TunnelStatus};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Default)]
pub struct StartTunnelRequest {
    #[serde(default)]
    pub resolver_url: Option<String>,
    #[serde(default)]
    pub strategy_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SetResolverRequest {
    pub url: String,
}

#[derive(Deserialize, Debug)]
pub struct SetStrategyRequest {
    pub strategy_id: String,
}

#[derive(Serialize, Debug)]
pub struct TunnelStatsResponse {
    pub packets_read: u64,
    pub packets_dropped: u64,
    pub queries_dispatched: u64,
    pub queries_rejected: u64,
    pub upstream_failures: u64,
    pub replies_written: u64,
    pub replies_discarded: u64,
}

impl From<TunnelStats> for TunnelStatsResponse {
    fn from(stats: TunnelStats) -> Self {
        Self {
            packets_read: stats.packets_read,
            packets_dropped: stats.packets_dropped,
            queries_dispatched: stats.queries_dispatched,
            queries_rejected: stats.queries_rejected,
            upstream_failures: stats.upstream_failures,
            replies_written: stats.replies_written,
            replies_discarded: stats.replies_discarded,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct TunnelStatusResponse {
    pub active: bool,
    pub label: String,
    pub resolver_url: String,
    pub strategy_id: String,
    pub started_at: Option<String>,
    pub uptime_secs: Option<i64>,
    pub stats: TunnelStatsResponse,
}

impl From<TunnelStatus> for TunnelStatusResponse {
    fn from(status: TunnelStatus) -> Self {
        let uptime_secs = status
            .started_at
            .map(|at| (Utc::now() - at).num_seconds().max(0));

        Self {
            active: status.active,
            label: status.label,
            resolver_url: status.resolver_url,
            strategy_id: status.strategy_id,
            started_at: status.started_at.map(|at| at.to_rfc3339()),
            uptime_secs,
            stats: status.stats.into(),
        }
    }
}
