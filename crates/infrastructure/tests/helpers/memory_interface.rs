use async_trait::async_trait;
use ferrous_tunnel_application::ports::{VirtualInterface, VirtualInterfaceFactory};
use ferrous_tunnel_domain::config::InterfaceConfig;
use ferrous_tunnel_domain::DomainError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory packet device. Reads never block: an empty inbox yields `Ok(0)`.
pub struct MemoryInterface {
    name: String,
    mtu: u16,
    inbox: Mutex<VecDeque<Vec<u8>>>,
    written: Mutex<Vec<Vec<u8>>>,
    closed: AtomicBool,
    close_calls: AtomicUsize,
}

impl MemoryInterface {
    pub fn new(name: &str, mtu: u16) -> Self {
        Self {
            name: name.to_string(),
            mtu,
            inbox: Mutex::new(VecDeque::new()),
            written: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
            close_calls: AtomicUsize::new(0),
        }
    }

    pub fn inject(&self, packet: Vec<u8>) {
        self.inbox.lock().unwrap().push_back(packet);
    }

    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    /// Polls until at least `count` packets were written or `timeout` elapses.
    pub async fn wait_for_writes(&self, count: usize, timeout: Duration) -> Vec<Vec<u8>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let written = self.written();
            if written.len() >= count || tokio::time::Instant::now() >= deadline {
                return written;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl VirtualInterface for MemoryInterface {
    async fn read_packet(&self, buf: &mut [u8]) -> Result<usize, DomainError> {
        if self.is_closed() {
            return Err(DomainError::InterfaceClosed);
        }
        match self.inbox.lock().unwrap().pop_front() {
            Some(packet) => {
                buf[..packet.len()].copy_from_slice(&packet);
                Ok(packet.len())
            }
            None => Ok(0),
        }
    }

    async fn write_packet(&self, packet: &[u8]) -> Result<(), DomainError> {
        if self.is_closed() {
            return Err(DomainError::InterfaceClosed);
        }
        self.written.lock().unwrap().push(packet.to_vec());
        Ok(())
    }

    async fn close(&self) -> Result<(), DomainError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        if self.closed.swap(true, Ordering::SeqCst) {
            return Err(DomainError::InterfaceClosed);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn mtu(&self) -> u16 {
        self.mtu
    }
}

/// Hands out a fresh `MemoryInterface` per establish and remembers each one.
pub struct MockInterfaceFactory {
    fail_with: Option<String>,
    establish_calls: AtomicUsize,
    interfaces: Mutex<Vec<Arc<MemoryInterface>>>,
}

impl MockInterfaceFactory {
    pub fn new() -> Self {
        Self {
            fail_with: None,
            establish_calls: AtomicUsize::new(0),
            interfaces: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::new()
        }
    }

    pub fn establish_calls(&self) -> usize {
        self.establish_calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Arc<MemoryInterface> {
        Arc::clone(
            self.interfaces
                .lock()
                .unwrap()
                .last()
                .expect("no interface established"),
        )
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.lock().unwrap().len()
    }
}

#[async_trait]
impl VirtualInterfaceFactory for MockInterfaceFactory {
    async fn establish(
        &self,
        config: &InterfaceConfig,
    ) -> Result<Arc<dyn VirtualInterface>, DomainError> {
        let n = self.establish_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref reason) = self.fail_with {
            return Err(DomainError::InterfaceUnavailable(reason.clone()));
        }

        let interface = Arc::new(MemoryInterface::new(&format!("mem{}", n), config.mtu));
        self.interfaces.lock().unwrap().push(Arc::clone(&interface));
        Ok(interface)
    }
}
