//! Top-level run handler
//!
//! Wires the validated configuration through the banner, the confirmation
//! gate and the download pipeline.

use tracing::info;

use crate::app::{total_tiles, DownloadPipeline, PipelineConfig};
use crate::cli::args::RunConfig;
use crate::cli::confirm::confirm_run;
use crate::cli::startup;
use crate::errors::Result;

/// Outcome of a run, distinguishing completion from a declined prompt
/// (both exit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

/// Execute one full run: banner, confirmation, pipeline.
pub async fn handle_run(config: RunConfig) -> Result<RunOutcome> {
    startup::log_banner(&config);

    let total = total_tiles(config.range);
    if !config.skip_confirmation && !confirm_run(total, config.policy.check_only)? {
        info!("Cancelled");
        return Ok(RunOutcome::Cancelled);
    }

    let pipeline = DownloadPipeline::new(PipelineConfig {
        range: config.range,
        url_template: config.url_template,
        output_dir: config.output_dir,
        policy: config.policy,
    })?;
    pipeline.run().await?;

    Ok(RunOutcome::Completed)
}
