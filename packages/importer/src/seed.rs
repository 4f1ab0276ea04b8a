//! Seed document and media map loading.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use geosolutions_exporter::media::{DownloadStatus, MediaDownloadSummary};
use geosolutions_exporter::types::SeedDocument;

use crate::error::{ImportError, Result};

/// Load and validate the seed bundle.
///
/// Anything without a `data` object is rejected with the file path in the
/// message, which catches pointing `--seed` at the wrong artifact.
pub fn load_seed(path: &Path) -> Result<SeedDocument> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    if !value.get("data").is_some_and(Value::is_object) {
        return Err(ImportError::InvalidSeed {
            path: path.display().to_string(),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Map media URLs to locally downloaded files.
///
/// The exporter's download results are optional; a missing map file just
/// means every upload resolves through the media directory or a live
/// fetch. Rows that failed to download are skipped. Relative paths resolve
/// against the seed file's directory.
pub fn load_media_map(map_path: &Path, seed_dir: &Path) -> Result<HashMap<String, PathBuf>> {
    if !map_path.exists() {
        return Ok(HashMap::new());
    }
    let raw = fs::read_to_string(map_path)?;
    let summary: MediaDownloadSummary = serde_json::from_str(&raw)?;

    let mut by_url = HashMap::new();
    for record in summary.files {
        if record.status != DownloadStatus::Downloaded || record.url.is_empty() {
            continue;
        }
        let Some(file) = record.file else { continue };
        by_url.insert(record.url, seed_dir.join(file));
    }
    Ok(by_url)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_load_seed_accepts_exporter_output() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "seed.json",
            &json!({
                "version": 2,
                "source": { "baseUrl": "https://geosolutions.nz/", "extractedAt": "x", "strategy": "y" },
                "data": {
                    "api::team.team": [{ "name": "Aroha Ngata", "email": "a@geosolutions.nz" }]
                }
            }),
        );
        let seed = load_seed(&path).unwrap();
        assert_eq!(seed.version, 2);
        assert_eq!(seed.data.teams.len(), 1);
        assert_eq!(seed.data.teams[0].name, "Aroha Ngata");
        assert!(seed.data.projects.is_empty());
    }

    #[test]
    fn test_load_seed_rejects_missing_data_object() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.json", &json!({ "version": 2 }));
        let err = load_seed(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid seed file"));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_load_seed_rejects_non_object_data() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.json", &json!({ "data": [1, 2] }));
        assert!(load_seed(&path).is_err());
    }

    #[test]
    fn test_load_seed_missing_file_is_io_error() {
        let err = load_seed(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }

    #[test]
    fn test_media_map_keeps_downloaded_rows_only() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "media-download-results.json",
            &json!({
                "downloaded": 1,
                "failed": 1,
                "files": [
                    { "status": "downloaded", "uid": "api::hero.hero", "entryId": 1,
                      "field": "Banner", "url": "https://x.test/banner.jpg",
                      "file": "media/banner.jpg", "bytes": 9 },
                    { "status": "failed", "uid": "api::team.team", "entryId": 2,
                      "field": "image", "url": "https://x.test/face.png",
                      "error": "HTTP 404 for https://x.test/face.png: gone" }
                ]
            }),
        );
        let map = load_media_map(&path, Path::new("/seed-dir")).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("https://x.test/banner.jpg"),
            Some(&PathBuf::from("/seed-dir/media/banner.jpg"))
        );
    }

    #[test]
    fn test_media_map_missing_file_is_empty() {
        let map = load_media_map(Path::new("/nonexistent/map.json"), Path::new(".")).unwrap();
        assert!(map.is_empty());
    }
}
