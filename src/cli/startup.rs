//! Startup banner
//!
//! Logs the effective configuration before any work starts: the headline
//! facts at info, the full option dump at debug.

use tracing::{debug, info};

use crate::cli::args::RunConfig;

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Log the startup banner and configuration dump
pub fn log_banner(config: &RunConfig) {
    info!("OSM Tile Fetcher v{}", env!("CARGO_PKG_VERSION"));
    info!("Start zoom level: {}", config.range.start);
    info!("End zoom level: {}", config.range.end);
    if let Some(url) = &config.url_template {
        if !config.policy.check_only {
            info!("URL: {}", url);
        }
    }
    info!("Output directory: {}", config.output_dir.display());

    debug!("Configuration:");
    debug!("  Verbose mode: {}", yes_no(config.verbose));
    debug!("  Check tiles: {}", yes_no(config.policy.check_only));
    debug!("  Force overwrite: {}", yes_no(config.policy.force_overwrite));
    debug!("  Yes: {}", yes_no(config.skip_confirmation));
    debug!("  Delay: {} ms", config.policy.inter_request_delay.as_millis());
    debug!("  Max retries: {}", config.policy.max_retries);
    debug!("  Retry delay: {} ms", config.policy.retry_delay.as_millis());
}
