//! Application constants for OSM Tile Fetcher
//!
//! Constants are grouped by functional domain. Retry and pacing defaults
//! mirror the CLI option defaults.

use std::time::Duration;

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// User agent sent with every tile request
    pub const USER_AGENT: &str = concat!(
        "osm_tile_fetcher/",
        env!("CARGO_PKG_VERSION"),
        " (bulk tile archiver)"
    );

    /// Total request timeout. A tile server that stops responding fails the
    /// request instead of stalling the run forever.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Retry and pacing defaults
pub mod limits {
    /// Default maximum retry attempts for a tile returning a bad status
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Default delay between retry attempts (milliseconds)
    pub const DEFAULT_RETRY_DELAY_MS: u64 = 2500;

    /// Default delay between successive tile downloads (milliseconds)
    pub const DEFAULT_INTER_REQUEST_DELAY_MS: u64 = 0;
}

/// Tile addressing constants
pub mod tiles {
    /// Highest supported zoom level
    pub const MAX_ZOOM: u8 = 19;

    /// File extension for saved tiles
    pub const TILE_EXTENSION: &str = "png";

    /// Zoom placeholder in URL templates
    pub const TOKEN_ZOOM: &str = "{z}";

    /// Column placeholder in URL templates
    pub const TOKEN_X: &str = "{x}";

    /// Row placeholder in URL templates
    pub const TOKEN_Y: &str = "{y}";
}

/// Process exit codes
pub mod exit {
    /// Normal completion, or the user declined the confirmation prompt
    pub const SUCCESS: i32 = 0;

    /// Invalid command-line configuration
    pub const INVALID_CONFIG: i32 = 1;

    /// Fatal transport error issuing a request
    pub const TRANSPORT_ERROR: i32 = 2;

    /// Fatal error while streaming a response body to disk
    pub const STREAM_ERROR: i32 = 3;
}

// Re-export commonly used constants for convenience
pub use http::USER_AGENT;
pub use limits::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MS};
pub use tiles::MAX_ZOOM;
