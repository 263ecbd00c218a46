use crate::DomainError;

pub const DEFAULT_RESOLVER_URL: &str = "https://1.1.1.1/dns-query";
pub const DEFAULT_STRATEGY_ID: &str = "general";

/// Runtime-mutable tunnel settings.
///
/// `strategy_id` is an opaque label kept for bookkeeping and presentation;
/// it does not change how queries are forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelConfig {
    pub resolver_url: String,
    pub strategy_id: String,
}

impl TunnelConfig {
    pub fn new(resolver_url: impl Into<String>, strategy_id: impl Into<String>) -> Self {
        Self {
            resolver_url: resolver_url.into(),
            strategy_id: strategy_id.into(),
        }
    }

    /// Resolver URL to use for the next query; an empty value means the default resolver.
    pub fn effective_resolver_url(&self) -> &str {
        if self.resolver_url.trim().is_empty() {
            DEFAULT_RESOLVER_URL
        } else {
            &self.resolver_url
        }
    }

    /// Trims the URL and maps an empty value to the default resolver.
    ///
    /// Only `https://` and `http://` endpoints are accepted.
    pub fn normalize_resolver_url(url: &str) -> Result<String, DomainError> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(DEFAULT_RESOLVER_URL.to_string());
        }

        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| DomainError::InvalidResolverUrl(url.to_string()))?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(DomainError::InvalidResolverUrl(url.to_string()));
        }

        Ok(url.to_string())
    }

    pub fn normalize_strategy_id(id: &str) -> Result<String, DomainError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(DomainError::InvalidStrategy("strategy id is empty".to_string()));
        }
        Ok(id.to_string())
    }
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLVER_URL, DEFAULT_STRATEGY_ID)
    }
}
