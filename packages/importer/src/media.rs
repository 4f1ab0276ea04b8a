//! Media byte resolution and upload-once caching.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use geosolutions_exporter::text::excerpt;

use crate::client::StrapiClient;
use crate::error::{ImportError, Result};
use crate::state::RunState;

/// Body excerpt length for failed media fetches.
const DOWNLOAD_ERROR_CHARS: usize = 200;

/// MIME type from a file extension; unknown extensions upload as raw bytes.
#[must_use]
pub fn mime_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "txt" => "text/plain",
        "mp4" => "video/mp4",
        "mp3" => "audio/mpeg",
        _ => "application/octet-stream",
    }
}

/// Bytes for one media asset plus where they came from.
#[derive(Debug)]
pub struct MediaSource {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub origin: String,
}

/// Find the bytes for a media URL.
///
/// Resolution order: the exporter's download map, then a file with the
/// URL's basename inside the media directory, then a live fetch from the
/// legacy site.
pub fn resolve_media_source(media_url: &str, media_name: &str, state: &RunState) -> Result<MediaSource> {
    if let Some(mapped) = state.media_map.get(media_url) {
        if mapped.exists() {
            return Ok(MediaSource {
                bytes: fs::read(mapped)?,
                file_name: file_base_name(mapped),
                origin: mapped.display().to_string(),
            });
        }
    }

    let base_name = url_base_name(media_url)?;
    if !base_name.is_empty() {
        let candidate = state.options.media_dir.join(&base_name);
        if candidate.exists() {
            return Ok(MediaSource {
                bytes: fs::read(&candidate)?,
                file_name: base_name,
                origin: candidate.display().to_string(),
            });
        }
    }

    fetch_live(media_url, &base_name, media_name, state.options.timeout_ms)
}

fn file_base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn url_base_name(media_url: &str) -> Result<String> {
    let parsed = Url::parse(media_url).map_err(|_| ImportError::InvalidMediaUrl {
        url: media_url.to_string(),
    })?;
    Ok(parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_string())
}

/// Last resort: pull the asset straight off the legacy site.
fn fetch_live(media_url: &str, base_name: &str, media_name: &str, timeout_ms: u64) -> Result<MediaSource> {
    tracing::debug!(url = media_url, "Fetching media from legacy site");
    let client = Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;
    let response = client.get(media_url).header("Accept", "*/*").send()?;
    let status = response.status().as_u16();
    let bytes = response.bytes()?.to_vec();
    if !(200..300).contains(&status) {
        let body = String::from_utf8_lossy(&bytes).into_owned();
        return Err(ImportError::MediaDownload {
            status,
            url: media_url.to_string(),
            body: excerpt(&body, DOWNLOAD_ERROR_CHARS),
        });
    }

    let file_name = if !base_name.is_empty() {
        base_name.to_string()
    } else if !media_name.is_empty() {
        media_name.to_string()
    } else {
        "upload.bin".to_string()
    };
    Ok(MediaSource {
        bytes,
        file_name,
        origin: media_url.to_string(),
    })
}

/// Upload a media object's bytes once per URL, returning the asset id.
///
/// `--skip-media` suppresses uploads entirely; a cached URL returns its
/// known id; dry-run only counts what a live run would upload.
pub fn upload_media_if_needed(
    client: &StrapiClient,
    media: &Value,
    uid: &str,
    field: &str,
    state: &mut RunState,
) -> Result<Option<i64>> {
    let Some(media_url) = media.get("url").and_then(Value::as_str) else {
        return Ok(None);
    };
    if media_url.is_empty() || state.options.skip_media {
        return Ok(None);
    }
    if let Some(id) = state.uploads_by_url.get(media_url) {
        return Ok(Some(*id));
    }
    if state.options.dry_run {
        state.summary.media_planned += 1;
        return Ok(None);
    }

    let media_name = media.get("name").and_then(Value::as_str).unwrap_or_default();
    let source = resolve_media_source(media_url, media_name, state)?;
    let mime = mime_for(&source.file_name);
    tracing::debug!(url = media_url, file = %source.file_name, origin = %source.origin, "Uploading media");
    let uploaded = client.upload(&source.file_name, mime, source.bytes)?;

    let Some(id) = uploaded.get(0).and_then(|row| row.get("id")).and_then(Value::as_i64) else {
        return Err(ImportError::UploadWithoutId {
            context: format!("{uid}.{field}"),
        });
    };

    state.uploads_by_url.insert(media_url.to_string(), id);
    state.summary.media_uploaded += 1;
    Ok(Some(id))
}
