//! Error types for the exporter.

use thiserror::Error;

/// Main error type for the exporter library.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Invalid CLI or environment configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A URL could not be parsed or joined.
    #[error("Invalid URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP transport failed (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an unexpected status.
    #[error("HTTP {status} for {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for exporter operations.
pub type Result<T> = std::result::Result<T, ExportError>;
