//! DNS-over-HTTPS client (RFC 8484)
//!
//! Queries are sent as HTTP POST requests with `application/dns-message`
//! content type. The request body is the raw DNS wire format message taken
//! from the intercepted packet, and the response body is handed back
//! verbatim.
//!
//! Wire format (HTTP):
//! ```text
//! POST /dns-query HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//!
//! <raw DNS message bytes>
//! ```

use super::DNS_MESSAGE_CONTENT_TYPE;
use async_trait::async_trait;
use bytes::Bytes;
use ferrous_tunnel_application::ports::DohClient;
use ferrous_tunnel_domain::config::DispatchConfig;
use ferrous_tunnel_domain::DomainError;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// Pooled DoH client shared by all dispatch workers.
pub struct ReqwestDohClient {
    client: reqwest::Client,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl ReqwestDohClient {
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(connect_timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("Failed to build DoH client: {}", e)))?;

        Ok(Self {
            client,
            connect_timeout,
            read_timeout,
        })
    }

    pub fn from_config(config: &DispatchConfig) -> Result<Self, DomainError> {
        Self::new(config.connect_timeout(), config.read_timeout())
    }
}

#[async_trait]
impl DohClient for ReqwestDohClient {
    async fn query(&self, dns_wire: &[u8], resolver_url: &str) -> Result<Bytes, DomainError> {
        debug!(
            url = %resolver_url,
            message_len = dns_wire.len(),
            "Sending DoH query"
        );

        // Connecting is bounded by the client; the rest of the exchange gets read_timeout.
        let response = tokio::time::timeout(
            self.connect_timeout + self.read_timeout,
            self.client
                .post(resolver_url)
                .header(CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
                .header(ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
                .body(dns_wire.to_vec())
                .send(),
        )
        .await
        .map_err(|_| DomainError::UpstreamTimeout {
            url: resolver_url.to_string(),
        })?
        .map_err(|e| {
            if e.is_timeout() {
                DomainError::UpstreamTimeout {
                    url: resolver_url.to_string(),
                }
            } else {
                DomainError::UpstreamRequest {
                    url: resolver_url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamStatus {
                url: resolver_url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = tokio::time::timeout(self.read_timeout, response.bytes())
            .await
            .map_err(|_| DomainError::UpstreamTimeout {
                url: resolver_url.to_string(),
            })?
            .map_err(|e| DomainError::UpstreamRequest {
                url: resolver_url.to_string(),
                reason: format!("failed to read body: {}", e),
            })?;

        debug!(
            url = %resolver_url,
            response_len = body.len(),
            "DoH response received"
        );

        Ok(body)
    }
}
