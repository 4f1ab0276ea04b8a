//! Markdown migration report assembly.

use std::path::Path;

use url::Url;

use crate::fetch::CollectionFetch;
use crate::homepage::HomepageData;
use crate::media::MediaDownloadSummary;
use crate::seed::now_iso;
use crate::types::{ContentType, SeedData};

/// Content types listed under Extracted Records, in report order.
const REPORTED_TYPES: [ContentType; 7] = [
    ContentType::Hero,
    ContentType::About,
    ContentType::ServicesPage,
    ContentType::SiteSetting,
    ContentType::Team,
    ContentType::Project,
    ContentType::Document,
];

/// Render the operator-facing migration report.
///
/// The report carries record counts, endpoint availability, the media
/// download outcome, a fixed manual follow-up checklist and any warnings
/// gathered during the run.
#[must_use]
pub fn build_report(
    base_url: &Url,
    out_dir: &Path,
    collections: &[CollectionFetch],
    data: &SeedData,
    homepage: &HomepageData,
    warnings: &[String],
    media: Option<&MediaDownloadSummary>,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Legacy Site Export Report".to_string());
    lines.push(String::new());
    lines.push(format!("- Source: {base_url}"));
    lines.push(format!("- Exported at (UTC): {}", now_iso()));
    lines.push(format!("- Output directory: {}", out_dir.display()));
    lines.push(String::new());

    lines.push("## Extracted Records".to_string());
    lines.push(String::new());
    for content_type in REPORTED_TYPES {
        lines.push(format!("- {}: {}", content_type.uid(), data.count(content_type)));
    }
    lines.push(String::new());

    lines.push("## Source Endpoint Status".to_string());
    lines.push(String::new());
    for collection in collections {
        if collection.ok {
            lines.push(format!(
                "- /api/{}: OK ({} records)",
                collection.endpoint,
                collection.rows().len()
            ));
        } else {
            lines.push(format!(
                "- /api/{}: unavailable (HTTP {})",
                collection.endpoint, collection.status
            ));
        }
    }
    lines.push(String::new());

    lines.push("## Media Download".to_string());
    lines.push(String::new());
    match media {
        Some(summary) => {
            lines.push(format!("- Downloaded files: {}", summary.downloaded));
            lines.push(format!("- Failed files: {}", summary.failed));
        }
        None => lines.push("- Skipped (`--skip-media` used)".to_string()),
    }
    lines.push(String::new());

    lines.push("## Manual Follow-up".to_string());
    lines.push(String::new());
    lines.push("- Confirm `about.content` line breaks and wording after import.".to_string());
    lines.push("- Review `services-page.serviceItems` ordering and labels in Strapi.".to_string());
    lines.push("- Review team bios (not present on legacy site, left blank).".to_string());
    lines.push(
        "- Announcement banner and testimonials were not publicly available and are not auto-filled."
            .to_string(),
    );
    lines.push(
        "- Re-upload downloaded files if your import path does not preserve media links automatically."
            .to_string(),
    );

    if !homepage.contact_raw_emails.is_empty() {
        lines.push(String::new());
        lines.push("## Extracted Contact Emails".to_string());
        lines.push(String::new());
        for email in &homepage.contact_raw_emails {
            lines.push(format!("- {email}"));
        }
    }

    if !warnings.is_empty() {
        lines.push(String::new());
        lines.push("## Warnings".to_string());
        lines.push(String::new());
        for warning in warnings {
            lines.push(format!("- {warning}"));
        }
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}
