use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid resolver URL: {0}")]
    InvalidResolverUrl(String),

    #[error("Invalid strategy id: {0}")]
    InvalidStrategy(String),

    #[error("Failed to establish virtual interface: {0}")]
    InterfaceUnavailable(String),

    #[error("Virtual interface is closed")]
    InterfaceClosed,

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("DNS payload of {0} bytes does not fit in an IPv4 datagram")]
    PayloadTooLarge(usize),

    #[error("Timeout waiting for DoH response from {url}")]
    UpstreamTimeout { url: String },

    #[error("DoH server {url} returned HTTP {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("DoH request to {url} failed: {reason}")]
    UpstreamRequest { url: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
