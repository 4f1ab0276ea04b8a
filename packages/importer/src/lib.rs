//! GeoSolutions seed importer.
//!
//! Replays the exporter's seed bundle into a Strapi backend: uploads each
//! referenced media asset once, replaces single types, reconciles
//! collection entries against existing records, and grants the Public
//! role read access to the migrated content.
//!
//! # Architecture
//!
//! - `cli`: Command-line interface
//! - `config`: Options and environment resolution
//! - `client`: Authenticated Strapi REST client
//! - `seed`: Seed bundle and download-map loading
//! - `media`: Media byte resolution and upload caching
//! - `normalize`: Entry shaping before writes
//! - `upsert`: Single-type replace and collection reconciliation
//! - `permissions`: Public role permission grants
//! - `import`: Pipeline orchestration

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod import;
pub mod media;
pub mod normalize;
pub mod permissions;
pub mod seed;
pub mod state;
pub mod upsert;

// Re-export main functions
pub use import::run_import;

// Re-export commonly used types
pub use config::ImportOptions;
pub use error::{ImportError, Result};
pub use state::{ImportSummary, RunState};
