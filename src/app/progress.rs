//! Coarse progress accounting
//!
//! Completion is reported in 10% buckets: the tracker maps its monotonic
//! completed-count onto a decile and surfaces each decile exactly once as
//! it is first reached.

/// Counts completed tiles against the expected total and yields the decile
/// to report whenever a new one is reached.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    completed: u64,
    total: u64,
    last_decile: u8,
}

impl ProgressTracker {
    pub fn new(total: u64) -> Self {
        Self {
            completed: 0,
            total,
            last_decile: 0,
        }
    }

    /// Record one more completed tile. Returns `Some(decile)` the first
    /// time each decile (10, 20, .., 100) is reached, `None` otherwise.
    /// Never reports when the expected total is zero.
    pub fn advance(&mut self) -> Option<u8> {
        self.completed += 1;
        if self.total == 0 {
            return None;
        }
        let percentage = self.completed * 100 / self.total;
        let decile = (percentage / 10 * 10) as u8;
        if decile != self.last_decile {
            self.last_decile = decile;
            Some(decile)
        } else {
            None
        }
    }
}
