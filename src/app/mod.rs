//! Core application logic for OSM Tile Fetcher
//!
//! Leaf-first: tile addressing and the traversal walker are pure data and
//! functions, the progress tracker and fetch policy are small state/config
//! values, and the pipeline orchestrates them over the HTTP client.

pub mod client;
pub mod pipeline;
pub mod policy;
pub mod progress;
pub mod tile;
pub mod walker;

// Re-export main public API
pub use client::TileClient;
pub use pipeline::{DownloadPipeline, PipelineConfig};
pub use policy::FetchPolicy;
pub use progress::ProgressTracker;
pub use tile::{TileAddress, ZoomRange};
pub use walker::{next_address, total_tiles, TileWalker};
