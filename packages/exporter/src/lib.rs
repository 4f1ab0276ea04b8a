//! GeoSolutions legacy site exporter.
//!
//! Walks the legacy website's public content API, scrapes the rendered
//! homepage for the singleton text blocks the API never exposed, and writes
//! a versioned seed bundle the importer replays into the new backend.
//!
//! # Architecture
//!
//! - `cli`: Command-line interface
//! - `config`: Constants, options and URL building
//! - `export`: Pipeline orchestration
//! - `fetch`: Paginated collection fetching
//! - `extract` / `homepage`: DOM scraping of the rendered homepage
//! - `seed`: Entry builders and seed assembly
//! - `media`: Media manifest and asset download
//! - `report` / `output`: Artifact writing
//!
//! # Example
//!
//! ```
//! use geosolutions_exporter::text::clamp_text;
//!
//! assert_eq!(clamp_text("short", 60), "short");
//! assert_eq!(clamp_text("a very very long headline", 10), "a very...");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod homepage;
pub mod http;
pub mod media;
pub mod output;
pub mod report;
pub mod seed;
pub mod text;
pub mod types;

// Re-export main functions
pub use export::{run_export, ExportSummary};

// Re-export commonly used types
pub use config::ExportOptions;
pub use error::{ExportError, Result};
pub use types::{ContentKind, ContentType, MediaRef, SeedData, SeedDocument};
