//! OSM Tile Fetcher Library
//!
//! A Rust library for bulk-downloading OSM-style map tile pyramids. Tiles
//! are enumerated in raster-scan order across a zoom range and fetched
//! strictly one at a time, with bounded retries, inter-request pacing and
//! skip-if-present resumption.

pub mod app;
pub mod cli;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
