//! Minimal Strapi REST client.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

use geosolutions_exporter::text::excerpt;

use crate::config::ERROR_BODY_CHARS;
use crate::error::{ImportError, Result};

/// Blocking client carrying the base URL and bearer token.
#[derive(Debug, Clone)]
pub struct StrapiClient {
    http: Client,
    base_url: String,
    token: String,
}

impl StrapiClient {
    /// Build a client. The base URL loses any trailing slash so API paths
    /// concatenate cleanly.
    pub fn new(base_url: &str, token: &str, timeout_ms: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an API path and parse the JSON body.
    pub fn get(&self, api_path: &str) -> Result<Value> {
        let request = self.http.get(self.url(api_path));
        self.execute("GET", api_path, request)
    }

    /// PUT a JSON payload.
    pub fn put(&self, api_path: &str, body: &Value) -> Result<Value> {
        let request = self.http.put(self.url(api_path)).json(body);
        self.execute("PUT", api_path, request)
    }

    /// POST a JSON payload.
    pub fn post(&self, api_path: &str, body: &Value) -> Result<Value> {
        let request = self.http.post(self.url(api_path)).json(body);
        self.execute("POST", api_path, request)
    }

    /// POST one file to the upload endpoint as multipart form data.
    pub fn upload(&self, file_name: &str, mime: &str, bytes: Vec<u8>) -> Result<Value> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = Form::new().part("files", part);
        let request = self.http.post(self.url("/api/upload")).multipart(form);
        self.execute("POST", "/api/upload", request)
    }

    fn url(&self, api_path: &str) -> String {
        format!("{}{}", self.base_url, api_path)
    }

    fn execute(&self, method: &str, api_path: &str, request: RequestBuilder) -> Result<Value> {
        let request = if self.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.token)
        };
        let response = request.header("Accept", "application/json").send()?;
        let status = response.status().as_u16();
        let text = response.text()?;
        let parsed: Option<Value> = serde_json::from_str(&text).ok();

        if !(200..300).contains(&status) {
            return Err(ImportError::Api {
                method: method.to_string(),
                path: api_path.to_string(),
                status,
                message: api_error_message(parsed.as_ref(), &text, status),
            });
        }

        Ok(parsed.unwrap_or(Value::Null))
    }
}

/// Message priority: the backend's `error.message`, the top-level
/// `message`, a body excerpt, a bare status.
fn api_error_message(parsed: Option<&Value>, body: &str, status: u16) -> String {
    let from_payload = parsed.and_then(|value| {
        value
            .pointer("/error/message")
            .or_else(|| value.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    if let Some(message) = from_payload {
        return message;
    }
    let cut = excerpt(body, ERROR_BODY_CHARS);
    if cut.is_empty() {
        format!("HTTP {status}")
    } else {
        cut
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_base_url_loses_trailing_slash() {
        let client = StrapiClient::new("http://localhost:1337/", "t", 30_000).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1337");
        assert_eq!(client.url("/api/hero"), "http://localhost:1337/api/hero");
    }

    #[test]
    fn test_error_message_prefers_nested_error() {
        let payload = json!({ "error": { "message": "ValidationError" }, "message": "outer" });
        assert_eq!(
            api_error_message(Some(&payload), "raw", 400),
            "ValidationError"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_top_level() {
        let payload = json!({ "message": "Forbidden" });
        assert_eq!(api_error_message(Some(&payload), "raw", 403), "Forbidden");
    }

    #[test]
    fn test_error_message_falls_back_to_body_excerpt() {
        assert_eq!(api_error_message(None, "<html>denied</html>", 401), "<html>denied</html>");
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(api_error_message(None, "", 502), "HTTP 502");
    }
}
