use async_trait::async_trait;
use bytes::Bytes;
use ferrous_tunnel_domain::DomainError;

/// RFC 8484 transport: POSTs a DNS wire-format message and returns the
/// response body untouched.
#[async_trait]
pub trait DohClient: Send + Sync {
    async fn query(&self, dns_wire: &[u8], resolver_url: &str) -> Result<Bytes, DomainError>;
}
