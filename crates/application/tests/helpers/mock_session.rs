#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ferrous_tunnel_application::ports::TunnelSessionPort;
use ferrous_tunnel_domain::{DomainError, TunnelConfig, TunnelStats};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub struct MockTunnelSession {
    running: Arc<AtomicBool>,
    config: Arc<RwLock<TunnelConfig>>,
    started_at: Arc<RwLock<Option<DateTime<Utc>>>>,
    fail_start: Arc<AtomicBool>,
    start_calls: Arc<AtomicUsize>,
    stop_calls: Arc<AtomicUsize>,
}

impl MockTunnelSession {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            config: Arc::new(RwLock::new(TunnelConfig::default())),
            started_at: Arc::new(RwLock::new(None)),
            fail_start: Arc::new(AtomicBool::new(false)),
            start_calls: Arc::new(AtomicUsize::new(0)),
            stop_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        let session = Self::new();
        session.fail_start.store(true, Ordering::SeqCst);
        session
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TunnelSessionPort for MockTunnelSession {
    async fn start(&self, config: TunnelConfig) -> Result<(), DomainError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        *self.config.write().unwrap() = config;
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(DomainError::InterfaceUnavailable(
                "permission denied".to_string(),
            ));
        }
        *self.started_at.write().unwrap() = Some(Utc::now());
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
        *self.started_at.write().unwrap() = None;
    }

    fn set_resolver(&self, resolver_url: String) {
        self.config.write().unwrap().resolver_url = resolver_url;
    }

    fn set_strategy(&self, strategy_id: String) {
        self.config.write().unwrap().strategy_id = strategy_id;
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn config(&self) -> TunnelConfig {
        self.config.read().unwrap().clone()
    }

    fn stats(&self) -> TunnelStats {
        TunnelStats::default()
    }

    fn started_at(&self) -> Option<DateTime<Utc>> {
        *self.started_at.read().unwrap()
    }
}
