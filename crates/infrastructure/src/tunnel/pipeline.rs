//! Read → dispatch → write stages of a running tunnel.
//!
//! ```text
//!  interface ──read_loop──▶ [query queue] ──dispatch_worker × N──▶ [reply queue] ──writer──▶ interface
//! ```
//!
//! The read loop never awaits network I/O; it only hands decoded queries to
//! the bounded queue. Workers perform the DoH exchange. The writer is the
//! only task that writes to the interface.

use super::state::SessionFlag;
use super::stats::TunnelCounters;
use arc_swap::ArcSwap;
use ferrous_tunnel_application::ports::{DohClient, VirtualInterface};
use ferrous_tunnel_domain::packet::{self, DNS_PORT};
use ferrous_tunnel_domain::{DomainError, ParsedQuery, TunnelConfig};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Largest possible IPv4 datagram.
const READ_BUFFER_SIZE: usize = 65_535;

pub(crate) struct PipelineContext {
    pub(crate) interface: Arc<dyn VirtualInterface>,
    pub(crate) doh: Arc<dyn DohClient>,
    pub(crate) config: Arc<ArcSwap<TunnelConfig>>,
    pub(crate) state: Arc<SessionFlag>,
    pub(crate) stats: Arc<TunnelCounters>,
    pub(crate) dns_address: Ipv4Addr,
    pub(crate) idle_poll: Duration,
    pub(crate) shutdown: CancellationToken,
}

/// Spawns one read loop, `workers` dispatch workers and one writer.
pub(crate) fn spawn(
    ctx: Arc<PipelineContext>,
    workers: usize,
    queue_capacity: usize,
) -> Vec<JoinHandle<()>> {
    let (query_tx, query_rx) = mpsc::channel(queue_capacity);
    let (reply_tx, reply_rx) = mpsc::channel(queue_capacity);
    let query_rx = Arc::new(Mutex::new(query_rx));

    let mut tasks = Vec::with_capacity(workers + 2);
    tasks.push(tokio::spawn(read_loop(Arc::clone(&ctx), query_tx)));
    for worker_id in 0..workers {
        tasks.push(tokio::spawn(dispatch_worker(
            worker_id,
            Arc::clone(&ctx),
            Arc::clone(&query_rx),
            reply_tx.clone(),
        )));
    }
    drop(reply_tx);
    tasks.push(tokio::spawn(writer(ctx, reply_rx)));
    tasks
}

async fn read_loop(ctx: Arc<PipelineContext>, queries: mpsc::Sender<ParsedQuery>) {
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    debug!(interface = %ctx.interface.name(), "Read loop started");

    loop {
        let read = tokio::select! {
            biased;
            _ = ctx.shutdown.cancelled() => break,
            read = ctx.interface.read_packet(&mut buf) => read,
        };

        if !ctx.state.is_running() {
            break;
        }

        let len = match read {
            Ok(0) => {
                if !idle(&ctx).await {
                    break;
                }
                continue;
            }
            Ok(len) => len,
            Err(DomainError::InterfaceClosed) => {
                warn!(
                    interface = %ctx.interface.name(),
                    "Interface closed by the host while the tunnel is running, read loop stopped"
                );
                break;
            }
            Err(e) => {
                debug!(error = %e, "Interface read failed");
                if !idle(&ctx).await {
                    break;
                }
                continue;
            }
        };

        TunnelCounters::bump(&ctx.stats.packets_read);

        let Some(query) = packet::decode(&buf[..len]) else {
            TunnelCounters::bump(&ctx.stats.packets_dropped);
            trace!(len, "Dropped non-DNS packet");
            continue;
        };

        match queries.try_send(query) {
            Ok(()) => {}
            Err(TrySendError::Full(query)) => {
                TunnelCounters::bump(&ctx.stats.queries_rejected);
                debug!(
                    client = %query.source_address,
                    port = query.source_port,
                    "Dispatch queue full, query dropped"
                );
            }
            Err(TrySendError::Closed(_)) => break,
        }
    }

    debug!("Read loop exited");
}

/// Waits one poll interval. Returns `false` if the tunnel is shutting down.
async fn idle(ctx: &PipelineContext) -> bool {
    tokio::select! {
        biased;
        _ = ctx.shutdown.cancelled() => false,
        _ = tokio::time::sleep(ctx.idle_poll) => true,
    }
}

async fn dispatch_worker(
    worker_id: usize,
    ctx: Arc<PipelineContext>,
    queries: Arc<Mutex<mpsc::Receiver<ParsedQuery>>>,
    replies: mpsc::Sender<Vec<u8>>,
) {
    loop {
        let query = tokio::select! {
            biased;
            _ = ctx.shutdown.cancelled() => break,
            next = async { queries.lock().await.recv().await } => match next {
                Some(query) => query,
                None => break,
            },
        };

        // Snapshot per query: a resolver change never affects an exchange already in flight.
        let resolver_url = ctx.config.load().effective_resolver_url().to_string();
        TunnelCounters::bump(&ctx.stats.queries_dispatched);

        let response = tokio::select! {
            biased;
            _ = ctx.shutdown.cancelled() => break,
            response = ctx.doh.query(&query.dns_payload, &resolver_url) => response,
        };

        let answer = match response {
            Ok(answer) => answer,
            Err(e) => {
                TunnelCounters::bump(&ctx.stats.upstream_failures);
                debug!(
                    worker = worker_id,
                    client = %query.source_address,
                    port = query.source_port,
                    error = %e,
                    "DoH query failed, dropping"
                );
                continue;
            }
        };

        let reply = match packet::encode_reply(
            ctx.dns_address,
            query.source_address,
            DNS_PORT,
            query.source_port,
            &answer,
        ) {
            Ok(reply) => reply,
            Err(e) => {
                debug!(worker = worker_id, error = %e, "Cannot frame DoH answer, dropping");
                continue;
            }
        };

        trace!(
            worker = worker_id,
            client = %query.source_address,
            port = query.source_port,
            len = reply.len(),
            "Reply ready"
        );

        tokio::select! {
            biased;
            _ = ctx.shutdown.cancelled() => break,
            sent = replies.send(reply) => if sent.is_err() { break },
        }
    }

    debug!(worker = worker_id, "Dispatch worker exited");
}

async fn writer(ctx: Arc<PipelineContext>, mut replies: mpsc::Receiver<Vec<u8>>) {
    loop {
        let reply = tokio::select! {
            biased;
            _ = ctx.shutdown.cancelled() => break,
            next = replies.recv() => match next {
                Some(reply) => reply,
                None => break,
            },
        };

        if !ctx.state.is_running() {
            TunnelCounters::bump(&ctx.stats.replies_discarded);
            continue;
        }

        match ctx.interface.write_packet(&reply).await {
            Ok(()) => TunnelCounters::bump(&ctx.stats.replies_written),
            Err(DomainError::InterfaceClosed) => {
                TunnelCounters::bump(&ctx.stats.replies_discarded);
                warn!(
                    interface = %ctx.interface.name(),
                    "Interface closed by the host while the tunnel is running, writer stopped"
                );
                break;
            }
            Err(e) => {
                TunnelCounters::bump(&ctx.stats.replies_discarded);
                debug!(error = %e, "Interface write failed");
            }
        }
    }

    debug!("Writer exited");
}
