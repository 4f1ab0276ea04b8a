//! Artifact writing under the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{MEDIA_MANIFEST_FILE, MEDIA_RESULTS_FILE, RAW_DIR, REPORT_FILE, SEED_FILE};
use crate::error::Result;

/// Write pretty-printed JSON with a trailing newline, creating parents.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    fs::write(path, body)?;
    Ok(())
}

/// Write a plain text artifact, creating parents.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, contents)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Raw per-endpoint fetch artifact, e.g. `raw/projects.json`.
#[must_use]
pub fn raw_collection_path(out_dir: &Path, endpoint: &str) -> PathBuf {
    out_dir.join(RAW_DIR).join(format!("{endpoint}.json"))
}

/// Raw homepage markup artifact.
#[must_use]
pub fn raw_homepage_path(out_dir: &Path) -> PathBuf {
    out_dir.join(RAW_DIR).join("homepage.html")
}

/// Structured homepage extraction artifact.
#[must_use]
pub fn raw_homepage_extract_path(out_dir: &Path) -> PathBuf {
    out_dir.join(RAW_DIR).join("homepage-extracted.json")
}

/// Seed document path.
#[must_use]
pub fn seed_path(out_dir: &Path) -> PathBuf {
    out_dir.join(SEED_FILE)
}

/// Media manifest path.
#[must_use]
pub fn media_manifest_path(out_dir: &Path) -> PathBuf {
    out_dir.join(MEDIA_MANIFEST_FILE)
}

/// Media download results path.
#[must_use]
pub fn media_results_path(out_dir: &Path) -> PathBuf {
    out_dir.join(MEDIA_RESULTS_FILE)
}

/// Migration report path.
#[must_use]
pub fn report_path(out_dir: &Path) -> PathBuf {
    out_dir.join(REPORT_FILE)
}
