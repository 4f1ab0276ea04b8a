//! End-to-end import pipeline: load the seed, replay it into the target
//! backend, then open up public read permissions.

use std::path::Path;

use crate::client::StrapiClient;
use crate::config::ImportOptions;
use crate::error::Result;
use crate::permissions::configure_public_permissions;
use crate::seed::{load_media_map, load_seed};
use crate::state::{ImportSummary, RunState};
use crate::upsert::{upsert_collections, upsert_single_types};

/// Run a full import and return the action counts.
pub fn run_import(options: ImportOptions) -> Result<ImportSummary> {
    options.validate()?;

    let seed = load_seed(&options.seed_path)?;
    let seed_dir = options
        .seed_path
        .parent()
        .map_or_else(|| Path::new(".").to_path_buf(), Path::to_path_buf);
    let media_map = load_media_map(&options.media_map_path, &seed_dir)?;

    let client = StrapiClient::new(&options.strapi_url, &options.token, options.timeout_ms)?;

    println!("Import seed: {}", options.seed_path.display());
    println!("Target Strapi: {}", options.strapi_url);
    if options.dry_run {
        println!("Mode: dry-run (no writes)");
    }

    let dry_run = options.dry_run;
    let mut state = RunState::new(options, media_map);

    upsert_single_types(&seed, &client, &mut state)?;
    upsert_collections(&seed, &client, &mut state)?;
    configure_public_permissions(&client, dry_run)?;

    Ok(state.summary)
}
