//! Error types for OSM Tile Fetcher
//!
//! Errors are split by domain: configuration problems surfaced before any
//! work starts, and fetch problems hit while downloading. The fetch domain
//! keeps the transport-vs-status distinction from the download pipeline:
//! bad HTTP statuses are retried locally and never become errors, while
//! transport and body-stream failures are fatal and carry their own exit
//! codes.

use std::path::PathBuf;

use thiserror::Error;

use crate::constants::exit;

/// Configuration and argument validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An option was given a value outside its accepted range or format
    #[error("option '{option}' invalid value, got '{value}'")]
    InvalidValue { option: String, value: String },

    /// A required option was not supplied
    #[error("missing required option '{option}'")]
    MissingOption { option: String },

    /// Start zoom level exceeds end zoom level
    #[error("Start zoom level must be lower than end zoom level")]
    ZoomRangeInverted,

    /// Force-overwrite and check-tiles cannot be combined
    #[error("Can't use both -f (--force-overwrite) & -c (--check-tiles) options")]
    ForceWithCheck,

    /// Output directory does not exist
    #[error("Output directory '{path}' does not exist")]
    OutputDirMissing { path: PathBuf },

    /// Output directory path points at something other than a directory
    #[error("Output directory '{path}' is not a directory")]
    OutputDirNotADirectory { path: PathBuf },

    /// I/O error while resolving the output directory
    #[error("Failed to resolve output directory '{path}'")]
    OutputDirUnresolvable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Download and tile-saving errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP client construction failed
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// Transport-level failure issuing a request (connection refused, DNS,
    /// timeout). Fatal: the run terminates without retrying.
    #[error("Error in request for {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Failure while streaming a response body. Fatal.
    #[error("Error in response for {url}")]
    Stream {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// I/O failure writing a tile (or its parent directories) to disk,
    /// treated the same as a body-stream failure.
    #[error("Error writing tile to {path}")]
    TileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Generic I/O error (confirmation prompt, terminal)
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Map the error to the process exit code contract
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) | AppError::Io(_) => exit::INVALID_CONFIG,
            AppError::Fetch(FetchError::ClientBuild(_))
            | AppError::Fetch(FetchError::Transport { .. }) => exit::TRANSPORT_ERROR,
            AppError::Fetch(FetchError::Stream { .. })
            | AppError::Fetch(FetchError::TileWrite { .. }) => exit::STREAM_ERROR,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;
