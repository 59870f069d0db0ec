//! Tile-space traversal
//!
//! The walker enumerates the pyramid in raster-scan order within each zoom
//! level, zoom levels visited in increasing order. [`next_address`] is a
//! pure successor function; [`TileWalker`] wraps it as an iterator for the
//! pipeline loop.

use crate::app::tile::{max_index, tiles_at_zoom, TileAddress, ZoomRange};

/// Successor of `current` in traversal order, or the initial tile when
/// `current` is `None`, or `None` when the range is exhausted.
pub fn next_address(range: ZoomRange, current: Option<TileAddress>) -> Option<TileAddress> {
    let tile = match current {
        None => return Some(TileAddress::new(range.start, 0, 0)),
        Some(tile) => tile,
    };

    let max = max_index(tile.zoom);
    if tile.x == max && tile.y == max && tile.zoom == range.end {
        None
    } else if tile.x == max && tile.y == max {
        // start over with the next zoom level
        Some(TileAddress::new(tile.zoom + 1, 0, 0))
    } else if tile.y == max {
        Some(TileAddress::new(tile.zoom, tile.x + 1, 0))
    } else {
        Some(TileAddress::new(tile.zoom, tile.x, tile.y + 1))
    }
}

/// Total tile count for the range, in closed form: Σ 4^z for z in
/// `start..=end`. Used for the confirmation prompt and progress totals
/// without materializing the sequence.
pub fn total_tiles(range: ZoomRange) -> u64 {
    (range.start..=range.end).map(tiles_at_zoom).sum()
}

/// Iterator over all addresses of a zoom range, in traversal order
#[derive(Debug, Clone)]
pub struct TileWalker {
    range: ZoomRange,
    current: Option<TileAddress>,
    done: bool,
}

impl TileWalker {
    pub fn new(range: ZoomRange) -> Self {
        Self {
            range,
            current: None,
            done: false,
        }
    }
}

impl Iterator for TileWalker {
    type Item = TileAddress;

    fn next(&mut self) -> Option<TileAddress> {
        if self.done {
            return None;
        }
        match next_address(self.range, self.current) {
            Some(tile) => {
                self.current = Some(tile);
                Some(tile)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}
