//! Configuration constants, option validation and URL building.

use std::path::PathBuf;

use url::Url;

use crate::error::{ExportError, Result};

/// Legacy site used when no `--base-url` or `LEGACY_SITE_URL` is given.
pub const DEFAULT_BASE_URL: &str = "https://geosolutions.nz";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUT_DIR: &str = "migration-output/legacy-site-export";

/// Default API pagination size.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default HTTP timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Smallest accepted HTTP timeout in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 1_000;

/// Longest response-body excerpt carried inside error messages.
pub const ERROR_BODY_CHARS: usize = 300;

/// Seed document artifact name.
pub const SEED_FILE: &str = "strapi-seed.legacy.json";

/// Media manifest artifact name.
pub const MEDIA_MANIFEST_FILE: &str = "media-manifest.json";

/// Media download results artifact name.
pub const MEDIA_RESULTS_FILE: &str = "media-download-results.json";

/// Markdown report artifact name.
pub const REPORT_FILE: &str = "migration-report.md";

/// Subdirectory for raw fetch artifacts.
pub const RAW_DIR: &str = "raw";

/// Subdirectory for downloaded media files.
pub const MEDIA_DIR: &str = "media";

/// Collection endpoints exposed by the legacy content API, in fetch order.
///
/// The legacy system serves heroes as a collection even though the new
/// backend models the hero as a single type.
pub const LEGACY_ENDPOINTS: [&str; 4] = ["projects", "teams", "documents", "heroes"];

/// Resolved options for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub base_url: Url,
    pub out_dir: PathBuf,
    pub page_size: u32,
    pub timeout_ms: u64,
    pub download_media: bool,
}

impl ExportOptions {
    /// Check numeric bounds. The CLI enforces these already; library callers
    /// get the same messages.
    pub fn validate(&self) -> Result<()> {
        if self.page_size < 1 {
            return Err(ExportError::Config(
                "--page-size must be a positive integer".to_string(),
            ));
        }
        if self.timeout_ms < MIN_TIMEOUT_MS {
            return Err(ExportError::Config(format!(
                "--timeout-ms must be >= {MIN_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }
}

/// Parse the legacy site base URL.
///
/// # Errors
///
/// Returns an error when the value is not an absolute URL.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|source| ExportError::Url {
        url: raw.to_string(),
        source,
    })
}

/// Build a collection page URL on the legacy content API.
///
/// # Arguments
///
/// * `base_url` - Legacy site base URL
/// * `endpoint` - Collection endpoint name, e.g. `projects`
/// * `page` - 1-based page number
/// * `page_size` - Page size for the pagination query
pub fn collection_url(base_url: &Url, endpoint: &str, page: u32, page_size: u32) -> Result<Url> {
    let mut url = join_url(base_url, &format!("/api/{endpoint}"))?;
    url.query_pairs_mut()
        .append_pair("pagination[page]", &page.to_string())
        .append_pair("pagination[pageSize]", &page_size.to_string())
        .append_pair("populate", "*");
    Ok(url)
}

/// Homepage URL on the legacy site.
pub fn homepage_url(base_url: &Url) -> Result<Url> {
    join_url(base_url, "/")
}

/// Absolutize a possibly relative URL against the legacy base.
///
/// Returns `None` for empty or unjoinable values instead of failing; a
/// missing media URL is reported, not fatal.
#[must_use]
pub fn absolute_url(raw: &str, base_url: &Url) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    base_url.join(raw).ok().map(String::from)
}

fn join_url(base_url: &Url, path: &str) -> Result<Url> {
    base_url.join(path).map_err(|source| ExportError::Url {
        url: format!("{base_url}{path}"),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_collection_url_carries_pagination_and_populate() {
        let base = parse_base_url("https://geosolutions.nz").unwrap();
        let url = collection_url(&base, "projects", 2, 100).unwrap();
        assert_eq!(
            url.as_str(),
            "https://geosolutions.nz/api/projects?pagination%5Bpage%5D=2&pagination%5BpageSize%5D=100&populate=*"
        );
    }

    #[test]
    fn test_homepage_url_is_site_root() {
        let base = parse_base_url("https://geosolutions.nz").unwrap();
        let url = homepage_url(&base).unwrap();
        assert_eq!(url.as_str(), "https://geosolutions.nz/");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_absolute_url_joins_relative_paths() {
        let base = parse_base_url("https://geosolutions.nz").unwrap();
        assert_eq!(
            absolute_url("/uploads/banner.jpg", &base),
            Some("https://geosolutions.nz/uploads/banner.jpg".to_string())
        );
    }

    #[test]
    fn test_absolute_url_keeps_absolute_urls() {
        let base = parse_base_url("https://geosolutions.nz").unwrap();
        assert_eq!(
            absolute_url("https://cdn.example.test/a.png", &base),
            Some("https://cdn.example.test/a.png".to_string())
        );
    }

    #[test]
    fn test_absolute_url_rejects_empty() {
        let base = parse_base_url("https://geosolutions.nz").unwrap();
        assert_eq!(absolute_url("", &base), None);
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let options = ExportOptions {
            base_url: parse_base_url(DEFAULT_BASE_URL).unwrap(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            page_size: 0,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            download_media: true,
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_tiny_timeout() {
        let options = ExportOptions {
            base_url: parse_base_url(DEFAULT_BASE_URL).unwrap(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_ms: 500,
            download_media: true,
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let options = ExportOptions {
            base_url: parse_base_url(DEFAULT_BASE_URL).unwrap(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            download_media: true,
        };
        assert!(options.validate().is_ok());
    }
}
