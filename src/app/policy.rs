//! Fetch policy
//!
//! Pure configuration consumed by the pipeline: overwrite and check-only
//! semantics, bounded retry with fixed delay, and inter-request pacing.

use std::time::Duration;

use crate::constants::limits;

/// How the pipeline treats each tile
///
/// `force_overwrite` and `check_only` are mutually exclusive; the CLI
/// validation layer rejects the combination before a policy is built.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Re-download tiles even when the destination file exists
    pub force_overwrite: bool,
    /// Report missing tiles instead of downloading anything
    pub check_only: bool,
    /// Pause between successive tile downloads
    pub inter_request_delay: Duration,
    /// Retry attempts for a tile answering with a non-200 status
    pub max_retries: u32,
    /// Pause before each retry (and before giving a tile up)
    pub retry_delay: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            force_overwrite: false,
            check_only: false,
            inter_request_delay: Duration::from_millis(limits::DEFAULT_INTER_REQUEST_DELAY_MS),
            max_retries: limits::DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(limits::DEFAULT_RETRY_DELAY_MS),
        }
    }
}
