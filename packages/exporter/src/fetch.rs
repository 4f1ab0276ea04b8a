//! Paginated collection fetching from the legacy content API.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config;
use crate::error::Result;
use crate::http;

/// One raw item of a legacy collection payload.
///
/// Attributes stay untyped here; the seed builder picks out what it needs
/// and tolerates whatever else the legacy schema carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiItem {
    pub id: Option<i64>,
    pub attributes: Value,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    page: u32,
    page_count: u32,
}

/// Fetch metadata stored alongside the raw items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    pub fetched_total: usize,
}

/// Outcome of fetching one legacy collection endpoint.
///
/// A 404 or 403 answer marks the endpoint unavailable instead of failing
/// the run, so a partially configured legacy deployment still exports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionFetch {
    pub ok: bool,
    pub status: u16,
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ApiItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<FetchMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CollectionFetch {
    fn available(endpoint: &str, status: u16, items: Vec<ApiItem>, meta: FetchMeta) -> Self {
        Self {
            ok: true,
            status,
            endpoint: endpoint.to_string(),
            items: Some(items),
            meta: Some(meta),
            error: None,
        }
    }

    fn unavailable(endpoint: &str, status: u16, error: String) -> Self {
        Self {
            ok: false,
            status,
            endpoint: endpoint.to_string(),
            items: None,
            meta: None,
            error: Some(error),
        }
    }

    /// Fetched items; empty when the endpoint was unavailable.
    #[must_use]
    pub fn rows(&self) -> &[ApiItem] {
        self.items.as_deref().unwrap_or_default()
    }
}

/// Fetch every page of one collection endpoint.
///
/// Pages advance while the echoed pagination block says more exist. Items
/// that do not look like entries are skipped rather than trusted.
///
/// # Errors
///
/// Network failures and statuses other than success, 404 and 403 are fatal.
pub fn fetch_collection(
    client: &Client,
    base_url: &Url,
    endpoint: &str,
    page_size: u32,
) -> Result<CollectionFetch> {
    let mut items: Vec<ApiItem> = Vec::new();
    let mut page = 1u32;

    loop {
        let url = config::collection_url(base_url, endpoint, page, page_size)?;
        tracing::debug!(endpoint, page, "Fetching collection page");
        let (status, body) = http::get_response(client, url.as_str())?;

        if status == 404 || status == 403 {
            tracing::warn!(endpoint, status, "Endpoint unavailable on legacy site");
            return Ok(CollectionFetch::unavailable(endpoint, status, body));
        }
        if !http::is_success(status) {
            return Err(http::status_error(status, url.as_str(), &body));
        }

        let payload: Value = serde_json::from_str(&body)?;
        if let Some(rows) = payload.get("data").and_then(Value::as_array) {
            for row in rows {
                if let Ok(item) = serde_json::from_value::<ApiItem>(row.clone()) {
                    items.push(item);
                }
            }
        }

        let pagination = payload
            .pointer("/meta/pagination")
            .and_then(|block| serde_json::from_value::<Pagination>(block.clone()).ok());

        match pagination {
            Some(block) if block.page < block.page_count => page += 1,
            _ => {
                let meta = FetchMeta {
                    page: pagination.map(|block| block.page),
                    page_count: pagination.map(|block| block.page_count),
                    fetched_total: items.len(),
                };
                return Ok(CollectionFetch::available(endpoint, status, items, meta));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unavailable_fetch_serializes_without_items() {
        let fetch = CollectionFetch::unavailable("heroes", 404, "Not Found".to_string());
        let value = serde_json::to_value(&fetch).unwrap();
        assert_eq!(value["ok"], json!(false));
        assert_eq!(value["status"], json!(404));
        assert!(value.get("items").is_none());
        assert_eq!(value["error"], json!("Not Found"));
    }

    #[test]
    fn test_available_fetch_serializes_meta() {
        let fetch = CollectionFetch::available(
            "projects",
            200,
            vec![ApiItem {
                id: Some(1),
                attributes: json!({ "title": "Harbour upgrade" }),
            }],
            FetchMeta {
                page: Some(1),
                page_count: Some(1),
                fetched_total: 1,
            },
        );
        let value = serde_json::to_value(&fetch).unwrap();
        assert_eq!(value["ok"], json!(true));
        assert_eq!(value["meta"]["fetchedTotal"], json!(1));
        assert_eq!(value["items"][0]["id"], json!(1));
    }

    #[test]
    fn test_rows_on_unavailable_fetch_is_empty() {
        let fetch = CollectionFetch::unavailable("teams", 403, String::new());
        assert!(fetch.rows().is_empty());
    }

    #[test]
    fn test_api_item_tolerates_missing_attributes() {
        let item: ApiItem = serde_json::from_value(json!({ "id": 9 })).unwrap();
        assert_eq!(item.id, Some(9));
        assert!(item.attributes.is_null());
    }
}
