/// Failures while loading, validating or saving the tunnel configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read tunnel config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Cannot write tunnel config {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Invalid TOML in {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Cannot serialize tunnel config: {0}")]
    Serialize(String),

    #[error("Invalid tunnel configuration: {0}")]
    Validation(String),
}
