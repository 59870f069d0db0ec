//! Tile addressing
//!
//! A [`TileAddress`] identifies one tile in the pyramid by zoom level and
//! grid position. Its destination path and request URL are derived on
//! demand and never stored; addresses are created by the walker, consumed
//! by the pipeline, and dropped.

use std::path::{Path, PathBuf};

use crate::constants::tiles;

/// Position of a single tile within the pyramid
///
/// For a given zoom `z`, `x` and `y` each range over `0..2^z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileAddress {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileAddress {
    pub fn new(zoom: u8, x: u32, y: u32) -> Self {
        Self { zoom, x, y }
    }

    /// Destination file for this tile: `<output_dir>/<zoom>/<x>/<y>.png`
    pub fn file_path(&self, output_dir: &Path) -> PathBuf {
        output_dir
            .join(self.zoom.to_string())
            .join(self.x.to_string())
            .join(format!("{}.{}", self.y, tiles::TILE_EXTENSION))
    }

    /// Request URL for this tile, substituting every `{z}`, `{x}` and `{y}`
    /// occurrence in the template
    pub fn url(&self, template: &str) -> String {
        template
            .replace(tiles::TOKEN_ZOOM, &self.zoom.to_string())
            .replace(tiles::TOKEN_X, &self.x.to_string())
            .replace(tiles::TOKEN_Y, &self.y.to_string())
    }
}

/// Inclusive range of zoom levels for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    pub start: u8,
    pub end: u8,
}

impl ZoomRange {
    /// Build a range. Callers validate bounds (`start <= end <= MAX_ZOOM`)
    /// before construction; see the CLI config layer.
    pub fn new(start: u8, end: u8) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }
}

/// Largest valid x or y index at the given zoom level
pub fn max_index(zoom: u8) -> u32 {
    (1u32 << zoom) - 1
}

/// Number of tiles in the grid at the given zoom level (`4^zoom`)
pub fn tiles_at_zoom(zoom: u8) -> u64 {
    1u64 << (2 * zoom as u64)
}
