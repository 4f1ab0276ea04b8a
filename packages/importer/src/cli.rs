//! Command-line interface for the importer.

use std::path::PathBuf;

use clap::Parser;
use console::style;

use crate::config::{self, ImportOptions, DEFAULT_SEED_PATH, DEFAULT_TIMEOUT_MS};
use crate::error::Result;
use crate::import::run_import;

/// Replay an exported seed bundle into a Strapi backend, uploading media
/// and opening public read permissions along the way.
#[derive(Parser)]
#[command(name = "geosolutions-importer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the exported seed bundle
    #[arg(long, env = "MIGRATION_SEED_PATH", default_value = DEFAULT_SEED_PATH)]
    pub seed: PathBuf,

    /// Target Strapi base URL (or set MIGRATION_STRAPI_URL / STRAPI_URL)
    #[arg(long)]
    pub strapi_url: Option<String>,

    /// Strapi API token (or set MIGRATION_STRAPI_TOKEN / STRAPI_API_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Local media folder fallback (default: <seed-dir>/media)
    #[arg(long)]
    pub media_dir: Option<PathBuf>,

    /// Prior download results to reuse (default: <seed-dir>/media-download-results.json)
    #[arg(long)]
    pub media_map: Option<PathBuf>,

    /// Do not upload media fields
    #[arg(long)]
    pub skip_media: bool,

    /// Print intended actions without writing to Strapi
    #[arg(long)]
    pub dry_run: bool,

    /// HTTP timeout in milliseconds
    #[arg(long, env = "MIGRATION_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS,
          value_parser = clap::value_parser!(u64).range(1000..))]
    pub timeout_ms: u64,
}

/// Parse arguments and run the import.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let options = ImportOptions {
        strapi_url: config::resolve_strapi_url(cli.strapi_url),
        token: config::resolve_token(cli.token),
        media_dir: cli
            .media_dir
            .unwrap_or_else(|| config::default_media_dir(&cli.seed)),
        media_map_path: cli
            .media_map
            .unwrap_or_else(|| config::default_media_map(&cli.seed)),
        seed_path: cli.seed,
        skip_media: cli.skip_media,
        dry_run: cli.dry_run,
        timeout_ms: cli.timeout_ms,
    };
    let dry_run = options.dry_run;

    let summary = run_import(options)?;

    println!();
    println!("{}", style("Import summary:").green().bold());
    println!("- Single types updated: {}", summary.single_updated);
    println!("- Collection created: {}", summary.collection_created);
    println!("- Collection updated: {}", summary.collection_updated);
    if dry_run {
        println!("- Collection planned: {}", summary.collection_planned);
        println!("- Media planned: {}", summary.media_planned);
    } else {
        println!("- Media uploaded: {}", summary.media_uploaded);
    }
    println!("- SEO fields clamped: {}", summary.seo_clamped);

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["geosolutions-importer"]);
        assert_eq!(cli.seed, PathBuf::from(DEFAULT_SEED_PATH));
        assert_eq!(cli.strapi_url, None);
        assert_eq!(cli.token, None);
        assert_eq!(cli.media_dir, None);
        assert_eq!(cli.media_map, None);
        assert!(!cli.skip_media);
        assert!(!cli.dry_run);
        assert_eq!(cli.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "geosolutions-importer",
            "--seed",
            "out/strapi-seed.legacy.json",
            "--strapi-url",
            "http://cms.internal:1337",
            "--token",
            "secret",
            "--media-dir",
            "out/media",
            "--media-map",
            "out/media-download-results.json",
            "--skip-media",
            "--dry-run",
            "--timeout-ms",
            "5000",
        ]);
        assert_eq!(cli.seed, PathBuf::from("out/strapi-seed.legacy.json"));
        assert_eq!(cli.strapi_url.as_deref(), Some("http://cms.internal:1337"));
        assert_eq!(cli.token.as_deref(), Some("secret"));
        assert_eq!(cli.media_dir, Some(PathBuf::from("out/media")));
        assert!(cli.skip_media);
        assert!(cli.dry_run);
        assert_eq!(cli.timeout_ms, 5000);
    }

    #[test]
    fn test_rejects_timeout_below_floor() {
        assert!(Cli::try_parse_from(["geosolutions-importer", "--timeout-ms", "999"]).is_err());
        assert!(Cli::try_parse_from(["geosolutions-importer", "--timeout-ms", "1000"]).is_ok());
    }
}
