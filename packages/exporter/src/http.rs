//! Blocking HTTP client for the legacy site.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::ERROR_BODY_CHARS;
use crate::error::{ExportError, Result};
use crate::text::excerpt;

/// User agent identifying this exporter.
const USER_AGENT: &str = concat!("GeoSolutions-Legacy-Exporter/", env!("CARGO_PKG_VERSION"));

/// Create the blocking HTTP client used for the whole run.
///
/// # Arguments
///
/// * `timeout_ms` - Per-request timeout in milliseconds
pub fn create_client(timeout_ms: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// GET a URL and return status plus body without judging the status.
///
/// Collection fetching needs to look at 404/403 answers instead of failing,
/// so the judgment lives with the caller.
pub fn get_response(client: &Client, url: &str) -> Result<(u16, String)> {
    let response = client.get(url).send()?;
    let status = response.status().as_u16();
    let body = response.text()?;
    Ok((status, body))
}

/// GET a URL, failing on any non-success status.
pub fn get_text(client: &Client, url: &str) -> Result<String> {
    let (status, body) = get_response(client, url)?;
    if !is_success(status) {
        return Err(status_error(status, url, &body));
    }
    Ok(body)
}

/// GET raw bytes, failing on any non-success status.
pub fn get_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send()?;
    let status = response.status().as_u16();
    let bytes = response.bytes()?;
    if !is_success(status) {
        let body = String::from_utf8_lossy(&bytes);
        return Err(status_error(status, url, &body));
    }
    Ok(bytes.to_vec())
}

/// Build a status error carrying a truncated body excerpt.
pub fn status_error(status: u16, url: &str, body: &str) -> ExportError {
    ExportError::Status {
        status,
        url: url.to_string(),
        body: excerpt(body, ERROR_BODY_CHARS),
    }
}

pub(crate) fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_the_tool() {
        assert!(USER_AGENT.starts_with("GeoSolutions-Legacy-Exporter/"));
    }

    #[test]
    fn test_is_success_bounds() {
        assert!(is_success(200));
        assert!(is_success(204));
        assert!(!is_success(301));
        assert!(!is_success(404));
        assert!(!is_success(500));
    }

    #[test]
    fn test_status_error_truncates_body() {
        let body = "x".repeat(1000);
        let err = status_error(500, "https://example.test/", &body);
        match err {
            ExportError::Status { body, .. } => assert_eq!(body.len(), 300),
            other => panic!("unexpected error: {other}"),
        }
    }
}
