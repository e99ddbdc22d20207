use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid calculation inputs, empty registration fields
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Bad or missing shared secret
    #[error("Unauthorized: {0}")]
    Auth(String),
    /// Geocoding provider returned a non-OK status or an unusable payload
    #[error("Geocoding failed: {0}")]
    Geocode(String),
    /// Routing provider returned a non-success status or timed out
    #[error("Routing failed: {0}")]
    Routing(String),
    /// Routing payload is missing distance, duration or toll fields
    #[error("Normalization failed: {0}")]
    Normalization(String),
    /// Pinned store already holds its maximum number of entries
    #[error("Capacity reached: {0}")]
    Capacity(String),
    /// Name or address already registered under a role
    #[error("Duplicate entry: {0}")]
    Duplicate(String),
    /// Named entry does not exist
    #[error("Not found: {0}")]
    NotFound(String),
    /// Backing store unreadable or unwritable
    #[error("Persistence error: {0}")]
    Persistence(String),
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
    /// HTTP transport error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    /// Stable snake_case name for logs and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failure",
            Self::Auth(_) => "auth_failure",
            Self::Geocode(_) => "geocode_failure",
            Self::Routing(_) => "routing_failure",
            Self::Normalization(_) => "normalization_error",
            Self::Capacity(_) => "capacity_failure",
            Self::Duplicate(_) => "duplicate_failure",
            Self::NotFound(_) => "not_found",
            Self::Persistence(_) => "persistence_failure",
            Self::Config(_) => "config_error",
            Self::Http(_) => "http_request_error",
        }
    }

    /// Normalization errors come from a malformed routing payload, so they count as
    /// routing failures for callers that only care about the provider boundary.
    pub fn is_routing_failure(&self) -> bool {
        matches!(self, Self::Routing(_) | Self::Normalization(_))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Persistence(format!("JSON error: {}", err))
    }
}
