//! Error types for the importer.

use thiserror::Error;

/// Main error type for the importer library.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Invalid CLI or environment configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// No API token outside dry-run mode.
    #[error("Missing Strapi API token. Pass --token or set STRAPI_API_TOKEN.")]
    MissingToken,

    /// The seed file did not contain a data object.
    #[error("Invalid seed file: {path}")]
    InvalidSeed { path: String },

    /// HTTP transport failed (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected an API call.
    #[error("{method} {path} failed ({status}): {message}")]
    Api {
        method: String,
        path: String,
        status: u16,
        message: String,
    },

    /// A media URL in the seed could not be parsed.
    #[error("Invalid media URL: {url}")]
    InvalidMediaUrl { url: String },

    /// A media source could not be fetched from the legacy site.
    #[error("Download failed ({status}) for {url}: {body}")]
    MediaDownload { status: u16, url: String, body: String },

    /// The upload endpoint answered without a file id.
    #[error("Upload returned no file id for {context}")]
    UploadWithoutId { context: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for importer operations.
pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ImportError::Api {
            method: "PUT".to_string(),
            path: "/api/hero".to_string(),
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "PUT /api/hero failed (403): Forbidden");
    }

    #[test]
    fn test_missing_token_names_both_sources() {
        let message = ImportError::MissingToken.to_string();
        assert!(message.contains("--token"));
        assert!(message.contains("STRAPI_API_TOKEN"));
    }

    #[test]
    fn test_invalid_seed_display_carries_path() {
        let err = ImportError::InvalidSeed {
            path: "/tmp/seed.json".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid seed file: /tmp/seed.json");
    }
}
