//! Run state threaded through every import stage.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::ImportOptions;

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub single_updated: usize,
    pub collection_created: usize,
    pub collection_updated: usize,
    pub collection_planned: usize,
    pub media_uploaded: usize,
    pub media_planned: usize,
    pub seo_clamped: usize,
}

/// Everything one run carries: options, the media map from the exporter's
/// download results, the session upload cache and the counters.
#[derive(Debug)]
pub struct RunState {
    pub options: ImportOptions,
    pub media_map: HashMap<String, PathBuf>,
    /// Uploaded asset ids by source URL; a URL is uploaded at most once.
    pub uploads_by_url: HashMap<String, i64>,
    pub summary: ImportSummary,
}

impl RunState {
    #[must_use]
    pub fn new(options: ImportOptions, media_map: HashMap<String, PathBuf>) -> Self {
        Self {
            options,
            media_map,
            uploads_by_url: HashMap::new(),
            summary: ImportSummary::default(),
        }
    }
}
