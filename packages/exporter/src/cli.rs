//! Command-line interface for the exporter.

use std::path::PathBuf;

use clap::Parser;
use console::style;

use crate::config::{
    self, ExportOptions, DEFAULT_BASE_URL, DEFAULT_OUT_DIR, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_MS,
};
use crate::error::Result;
use crate::export::run_export;

/// Pull content and media out of the legacy GeoSolutions website into a
/// seed bundle for the new backend.
#[derive(Parser)]
#[command(name = "geosolutions-exporter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Legacy site base URL
    #[arg(long, env = "LEGACY_SITE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Output directory for all export artifacts
    #[arg(long, env = "MIGRATION_OUTPUT_DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// API pagination size
    #[arg(long, env = "MIGRATION_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: u32,

    /// HTTP timeout in milliseconds
    #[arg(long, env = "MIGRATION_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS,
          value_parser = clap::value_parser!(u64).range(1000..))]
    pub timeout_ms: u64,

    /// Skip media file downloads
    #[arg(long)]
    pub skip_media: bool,
}

/// Parse arguments and run the export.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let options = ExportOptions {
        base_url: config::parse_base_url(&cli.base_url)?,
        out_dir: cli.out_dir,
        page_size: cli.page_size,
        timeout_ms: cli.timeout_ms,
        download_media: !cli.skip_media,
    };

    println!(
        "{} {}",
        style("Exporting").bold(),
        style(options.base_url.as_str()).cyan()
    );

    let summary = run_export(&options)?;

    println!();
    println!("{}", style("Export complete.").green().bold());
    println!("- Output: {}", options.out_dir.display());
    println!("- Projects: {}", summary.projects);
    println!("- Teams: {}", summary.teams);
    println!("- Documents: {}", summary.documents);
    println!("- Hero records: {}", summary.heroes);
    println!("- Media files queued: {}", summary.media_queued);

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["geosolutions-exporter"]);
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert_eq!(cli.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
        assert_eq!(cli.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(cli.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(!cli.skip_media);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "geosolutions-exporter",
            "--base-url",
            "https://staging.geosolutions.nz",
            "--out-dir",
            "/tmp/export",
            "--page-size",
            "25",
            "--timeout-ms",
            "5000",
            "--skip-media",
        ]);
        assert_eq!(cli.base_url, "https://staging.geosolutions.nz");
        assert_eq!(cli.out_dir, PathBuf::from("/tmp/export"));
        assert_eq!(cli.page_size, 25);
        assert_eq!(cli.timeout_ms, 5000);
        assert!(cli.skip_media);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        assert!(Cli::try_parse_from(["geosolutions-exporter", "--page-size", "0"]).is_err());
    }

    #[test]
    fn test_rejects_timeout_below_floor() {
        assert!(Cli::try_parse_from(["geosolutions-exporter", "--timeout-ms", "999"]).is_err());
        assert!(Cli::try_parse_from(["geosolutions-exporter", "--timeout-ms", "1000"]).is_ok());
    }
}
