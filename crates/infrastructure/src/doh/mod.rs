mod client;

pub use client::ReqwestDohClient;

/// Content type for DNS-over-HTTPS requests and responses (RFC 8484 §6)
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";
