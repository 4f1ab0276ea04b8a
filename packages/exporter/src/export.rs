//! Export pipeline: fetch collections, scrape the homepage, assemble the
//! seed, download media, write the report.

use std::fs;

use crate::config::{self, ExportOptions, LEGACY_ENDPOINTS};
use crate::error::Result;
use crate::fetch::{self, ApiItem, CollectionFetch};
use crate::homepage;
use crate::http;
use crate::media::{self, MediaDownloadSummary};
use crate::output;
use crate::report;
use crate::seed::{self, FetchedRows};

/// Counters surfaced after a successful export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub projects: usize,
    pub teams: usize,
    pub documents: usize,
    pub heroes: usize,
    pub media_queued: usize,
}

/// Run the full export into the options' output directory.
///
/// Every stage persists its raw artifact before the next one runs, so a
/// failed run still leaves whatever it managed to gather on disk.
///
/// # Errors
///
/// Fails on invalid options, network errors other than tolerated 404/403
/// collection answers, and filesystem trouble.
pub fn run_export(options: &ExportOptions) -> Result<ExportSummary> {
    options.validate()?;
    fs::create_dir_all(&options.out_dir)?;
    let client = http::create_client(options.timeout_ms)?;

    let mut collections: Vec<CollectionFetch> = Vec::new();
    for endpoint in LEGACY_ENDPOINTS {
        let result =
            fetch::fetch_collection(&client, &options.base_url, endpoint, options.page_size)?;
        output::write_json(&output::raw_collection_path(&options.out_dir, endpoint), &result)?;
        collections.push(result);
    }

    let homepage_url = config::homepage_url(&options.base_url)?;
    let home_html = http::get_text(&client, homepage_url.as_str())?;
    output::write_text(&output::raw_homepage_path(&options.out_dir), &home_html)?;

    let homepage_data = homepage::extract_homepage(&home_html, &options.base_url);
    output::write_json(&output::raw_homepage_extract_path(&options.out_dir), &homepage_data)?;

    let rows = FetchedRows {
        heroes: rows_for(&collections, "heroes"),
        teams: rows_for(&collections, "teams"),
        projects: rows_for(&collections, "projects"),
        documents: rows_for(&collections, "documents"),
    };

    let mut warnings: Vec<String> = Vec::new();
    if rows.projects.is_empty() {
        warnings.push("No projects found from /api/projects.".to_string());
    }
    if rows.teams.is_empty() {
        warnings.push("No teams found from /api/teams.".to_string());
    }
    if rows.documents.is_empty() {
        warnings.push("No documents found from /api/documents.".to_string());
    }
    if rows.heroes.is_empty() {
        warnings.push(
            "No heroes found from /api/heroes. Hero banner fallback used from homepage HTML."
                .to_string(),
        );
    }

    let seed_document = seed::build_seed(&options.base_url, &rows, &homepage_data);
    output::write_json(&output::seed_path(&options.out_dir), &seed_document)?;
    tracing::debug!(path = %output::seed_path(&options.out_dir).display(), "Wrote seed document");

    let manifest = media::collect_media_manifest(&seed_document.data);
    output::write_json(&output::media_manifest_path(&options.out_dir), &manifest)?;

    let mut media_summary: Option<MediaDownloadSummary> = None;
    if options.download_media {
        let summary = media::download_media_assets(&client, &manifest, &options.out_dir)?;
        output::write_json(&output::media_results_path(&options.out_dir), &summary)?;
        media_summary = Some(summary);
    }

    let report = report::build_report(
        &options.base_url,
        &options.out_dir,
        &collections,
        &seed_document.data,
        &homepage_data,
        &warnings,
        media_summary.as_ref(),
    );
    output::write_text(&output::report_path(&options.out_dir), &report)?;

    Ok(ExportSummary {
        projects: rows.projects.len(),
        teams: rows.teams.len(),
        documents: rows.documents.len(),
        heroes: rows.heroes.len(),
        media_queued: manifest.len(),
    })
}

fn rows_for<'a>(collections: &'a [CollectionFetch], endpoint: &str) -> &'a [ApiItem] {
    collections
        .iter()
        .find(|collection| collection.endpoint == endpoint)
        .map(CollectionFetch::rows)
        .unwrap_or_default()
}
