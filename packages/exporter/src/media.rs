//! Media manifest collection and sequential asset download.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::MEDIA_DIR;
use crate::error::{ExportError, Result};
use crate::http;
use crate::text::safe_file_name;
use crate::types::{ContentType, MediaRef, SeedData};

/// One media occurrence referenced by a seed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaManifestEntry {
    pub uid: String,
    pub entry_id: i64,
    pub field: String,
    pub name: String,
    pub url: String,
}

/// Outcome of one media download attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDownloadRecord {
    pub status: DownloadStatus,
    pub uid: String,
    pub entry_id: i64,
    pub field: String,
    pub url: String,
    /// Path relative to the output directory, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Download outcome tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Downloaded,
    Failed,
}

/// Batch summary persisted as the download results artifact. The importer
/// reads it back to find local files for upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaDownloadSummary {
    pub downloaded: usize,
    pub failed: usize,
    pub files: Vec<MediaDownloadRecord>,
}

/// Collect every media occurrence across the seed, in entry order.
///
/// Entries without an id are keyed by their 1-based position, matching how
/// the importer addresses them. Media without a URL is left out; it cannot
/// be downloaded or uploaded.
#[must_use]
pub fn collect_media_manifest(data: &SeedData) -> Vec<MediaManifestEntry> {
    let mut manifest: Vec<MediaManifestEntry> = Vec::new();

    for (index, hero) in data.heroes.iter().enumerate() {
        push_media(&mut manifest, ContentType::Hero, hero.id, index, "Banner", hero.banner.as_ref());
    }
    for (index, project) in data.projects.iter().enumerate() {
        push_media(
            &mut manifest,
            ContentType::Project,
            project.id,
            index,
            "thumbnail",
            project.thumbnail.as_ref(),
        );
        push_media(
            &mut manifest,
            ContentType::Project,
            project.id,
            index,
            "beforePhoto",
            project.before_photo.as_ref(),
        );
        push_media(
            &mut manifest,
            ContentType::Project,
            project.id,
            index,
            "afterPhoto",
            project.after_photo.as_ref(),
        );
    }
    for (index, team) in data.teams.iter().enumerate() {
        push_media(&mut manifest, ContentType::Team, team.id, index, "image", team.image.as_ref());
    }
    for (index, document) in data.documents.iter().enumerate() {
        push_media(
            &mut manifest,
            ContentType::Document,
            document.id,
            index,
            "file",
            document.file.as_ref(),
        );
    }

    manifest
}

fn push_media(
    manifest: &mut Vec<MediaManifestEntry>,
    content_type: ContentType,
    id: Option<i64>,
    index: usize,
    field: &str,
    media: Option<&MediaRef>,
) {
    let Some(media) = media else { return };
    let Some(url) = media.url.as_ref() else { return };
    manifest.push(MediaManifestEntry {
        uid: content_type.uid().to_string(),
        entry_id: id.unwrap_or(index as i64 + 1),
        field: field.to_string(),
        name: media.name.clone(),
        url: url.clone(),
    });
}

/// Download every unique manifest URL into `<out_dir>/media`.
///
/// URLs are deduplicated with the first manifest occurrence as the record's
/// descriptor. A failed download is recorded per URL without aborting the
/// batch; only filesystem trouble is fatal.
pub fn download_media_assets(
    client: &Client,
    manifest: &[MediaManifestEntry],
    out_dir: &Path,
) -> Result<MediaDownloadSummary> {
    let media_dir = out_dir.join(MEDIA_DIR);
    fs::create_dir_all(&media_dir)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique: Vec<&MediaManifestEntry> = Vec::new();
    for entry in manifest {
        if seen.insert(entry.url.as_str()) {
            unique.push(entry);
        }
    }

    let progress = progress_bar(unique.len() as u64);
    let mut summary = MediaDownloadSummary::default();

    for source in unique {
        progress.set_message(source.url.clone());
        match download_one(client, &source.url, &media_dir) {
            Ok((destination, bytes)) => {
                summary.downloaded += 1;
                summary.files.push(MediaDownloadRecord {
                    status: DownloadStatus::Downloaded,
                    uid: source.uid.clone(),
                    entry_id: source.entry_id,
                    field: source.field.clone(),
                    url: source.url.clone(),
                    file: relative_to(out_dir, &destination),
                    bytes: Some(bytes),
                    error: None,
                });
            }
            Err(error) => {
                tracing::warn!(url = %source.url, %error, "Media download failed");
                summary.failed += 1;
                summary.files.push(MediaDownloadRecord {
                    status: DownloadStatus::Failed,
                    uid: source.uid.clone(),
                    entry_id: source.entry_id,
                    field: source.field.clone(),
                    url: source.url.clone(),
                    file: None,
                    bytes: None,
                    error: Some(error.to_string()),
                });
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(summary)
}

fn progress_bar(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    #[allow(clippy::expect_used)] // Static template that is guaranteed to be valid
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:30.green} {pos}/{len} {wide_msg}")
            .expect("valid template"),
    );
    progress
}

fn download_one(client: &Client, url: &str, media_dir: &Path) -> Result<(PathBuf, u64)> {
    let file_name = file_name_for(url)?;
    let destination = unique_destination(media_dir, &file_name);
    let bytes = http::get_bytes(client, url)?;
    fs::write(&destination, &bytes)?;
    Ok((destination, bytes.len() as u64))
}

/// Safe local file name from a URL's path basename.
fn file_name_for(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|source| ExportError::Url {
        url: url.to_string(),
        source,
    })?;
    let base = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("file.bin");
    Ok(safe_file_name(base))
}

/// First free destination, suffixing `_1`, `_2`... before the extension
/// when two URLs share a basename.
fn unique_destination(media_dir: &Path, file_name: &str) -> PathBuf {
    let mut destination = media_dir.join(file_name);
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let extension = Path::new(file_name).extension().and_then(|s| s.to_str());
    let mut suffix = 1u32;
    while destination.exists() {
        let candidate = match extension {
            Some(ext) => format!("{stem}_{suffix}.{ext}"),
            None => format!("{stem}_{suffix}"),
        };
        destination = media_dir.join(candidate);
        suffix += 1;
    }
    destination
}

fn relative_to(base: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(base)
        .ok()
        .map(|rel| rel.to_string_lossy().into_owned())
}
