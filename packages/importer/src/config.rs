//! Configuration constants and option resolution for the importer.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{ImportError, Result};

/// Target Strapi used when no flag or environment override is present.
pub const DEFAULT_STRAPI_URL: &str = "http://localhost:1337";

/// Default seed path as produced by the exporter.
pub const DEFAULT_SEED_PATH: &str = "migration-output/legacy-site-export/strapi-seed.legacy.json";

/// Default HTTP timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Smallest accepted HTTP timeout in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 1_000;

/// Longest response-body excerpt carried inside API error messages.
pub const ERROR_BODY_CHARS: usize = 300;

/// Environment chain for the target URL, in precedence order.
const STRAPI_URL_VARS: [&str; 3] = ["MIGRATION_STRAPI_URL", "STRAPI_URL", "STRAPI_PUBLIC_URL"];

/// Environment chain for the API token, in precedence order.
const TOKEN_VARS: [&str; 2] = ["MIGRATION_STRAPI_TOKEN", "STRAPI_API_TOKEN"];

/// Resolved options for one import run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub seed_path: PathBuf,
    pub strapi_url: String,
    pub token: String,
    pub media_dir: PathBuf,
    pub media_map_path: PathBuf,
    pub skip_media: bool,
    pub dry_run: bool,
    pub timeout_ms: u64,
}

impl ImportOptions {
    /// A token is mandatory unless the run is a dry-run.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms < MIN_TIMEOUT_MS {
            return Err(ImportError::Config(format!(
                "--timeout-ms must be >= {MIN_TIMEOUT_MS}"
            )));
        }
        if !self.dry_run && self.token.is_empty() {
            return Err(ImportError::MissingToken);
        }
        Ok(())
    }
}

/// Target URL: flag value, environment chain, fixed default.
#[must_use]
pub fn resolve_strapi_url(flag: Option<String>) -> String {
    flag.or_else(|| env_chain(&STRAPI_URL_VARS))
        .unwrap_or_else(|| DEFAULT_STRAPI_URL.to_string())
}

/// API token: flag value, environment chain, empty.
#[must_use]
pub fn resolve_token(flag: Option<String>) -> String {
    flag.or_else(|| env_chain(&TOKEN_VARS)).unwrap_or_default()
}

/// Media directory next to the seed file.
#[must_use]
pub fn default_media_dir(seed_path: &Path) -> PathBuf {
    seed_dir(seed_path).join("media")
}

/// Download-results map next to the seed file.
#[must_use]
pub fn default_media_map(seed_path: &Path) -> PathBuf {
    seed_dir(seed_path).join("media-download-results.json")
}

fn seed_dir(seed_path: &Path) -> PathBuf {
    seed_path.parent().map_or_else(PathBuf::new, Path::to_path_buf)
}

fn env_chain(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| env::var(name).ok().filter(|value| !value.is_empty()))
}
