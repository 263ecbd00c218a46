use ferrous_tunnel_domain::TunnelStats;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct TunnelCounters {
    pub(crate) packets_read: AtomicU64,
    pub(crate) packets_dropped: AtomicU64,
    pub(crate) queries_dispatched: AtomicU64,
    pub(crate) queries_rejected: AtomicU64,
    pub(crate) upstream_failures: AtomicU64,
    pub(crate) replies_written: AtomicU64,
    pub(crate) replies_discarded: AtomicU64,
}

impl TunnelCounters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> TunnelStats {
        TunnelStats {
            packets_read: self.packets_read.load(Ordering::Relaxed),
            packets_dropped: self.packets_dropped.load(Ordering::Relaxed),
            queries_dispatched: self.queries_dispatched.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            replies_written: self.replies_written.load(Ordering::Relaxed),
            replies_discarded: self.replies_discarded.load(Ordering::Relaxed),
        }
    }
}
