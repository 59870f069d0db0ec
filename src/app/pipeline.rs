//! Sequential download pipeline
//!
//! Drives the walker over the whole zoom range and resolves one tile at a
//! time: skip it when it is already on disk, report it in check mode, or
//! fetch it with bounded in-place retries. The loop is explicit (no
//! recursive scheduling) and retry state lives in local variables threaded
//! through each step, so a single tile's handling is testable in
//! isolation.
//!
//! Failure policy: a non-200 status is transient and retried up to
//! `max_retries` times with a fixed delay, after which the tile is skipped
//! and the run continues. Transport errors issuing a request and errors
//! while streaming a body to disk are fatal and abort the whole run with
//! their own exit codes.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::Response;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

use crate::app::client::TileClient;
use crate::app::policy::FetchPolicy;
use crate::app::progress::ProgressTracker;
use crate::app::tile::{TileAddress, ZoomRange};
use crate::app::walker::{total_tiles, TileWalker};
use crate::errors::{FetchError, FetchResult};

/// Everything the pipeline needs for one run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub range: ZoomRange,
    /// Tile URL template with `{z}`/`{x}`/`{y}` tokens. May be absent in
    /// check mode, where no URL is ever constructed.
    pub url_template: Option<String>,
    pub output_dir: PathBuf,
    pub policy: FetchPolicy,
}

/// Where tile content comes from
#[derive(Debug)]
enum TileSource {
    /// Check mode: report missing tiles, never touch the network
    CheckOnly,
    /// Download mode: fetch from the tile server
    Remote { template: String, client: TileClient },
}

/// Outcome of processing a single address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileOutcome {
    Skipped,
    Missing,
    Saved,
    GaveUp,
}

/// Sequential tile processor: one tile in flight at a time, resolved in
/// exact traversal order.
#[derive(Debug)]
pub struct DownloadPipeline {
    range: ZoomRange,
    output_dir: PathBuf,
    policy: FetchPolicy,
    source: TileSource,
    progress: ProgressTracker,
}

impl DownloadPipeline {
    /// Build a pipeline from a validated configuration.
    ///
    /// In download mode this constructs the shared HTTP client; a missing
    /// URL template is rejected here as a last line of defense, though the
    /// CLI validation normally catches it first.
    pub fn new(config: PipelineConfig) -> crate::errors::Result<Self> {
        let source = if config.policy.check_only {
            TileSource::CheckOnly
        } else {
            let template =
                config
                    .url_template
                    .ok_or(crate::errors::ConfigError::MissingOption {
                        option: "-u, --url <url>".to_string(),
                    })?;
            TileSource::Remote {
                template,
                client: TileClient::new()?,
            }
        };

        Ok(Self {
            range: config.range,
            output_dir: config.output_dir,
            progress: ProgressTracker::new(total_tiles(config.range)),
            policy: config.policy,
            source,
        })
    }

    /// Run the full traversal to completion.
    ///
    /// Returns `Ok` when every tile has been resolved (saved, skipped,
    /// checked or given up on); returns an error only for the fatal
    /// transport/stream cases.
    pub async fn run(mut self) -> FetchResult<()> {
        let verb = if self.policy.check_only {
            "check"
        } else {
            "download"
        };
        info!("Starting to {} {} tiles", verb, total_tiles(self.range));

        let mut walker = TileWalker::new(self.range);
        while let Some(tile) = walker.next() {
            // Progress counts addresses as they are generated, so skipped
            // and given-up tiles move the deciles too.
            if let Some(decile) = self.progress.advance() {
                info!("{}% complete", decile);
            }
            self.process_tile(&tile).await?;
        }

        info!(
            "Done {} tiles",
            if self.policy.check_only {
                "checking"
            } else {
                "downloading"
            }
        );
        Ok(())
    }

    /// Resolve one address: DECIDE, then SKIP, CHECK_REPORT or the fetch
    /// cycle.
    async fn process_tile(&self, tile: &TileAddress) -> FetchResult<TileOutcome> {
        let path = tile.file_path(&self.output_dir);

        if !self.policy.force_overwrite && path.exists() {
            // In check mode an existing tile is simply fine; say so only
            // when a download was on the table.
            if let TileSource::Remote { template, .. } = &self.source {
                debug!("Skip downloading {}, already downloaded", tile.url(template));
            }
            return Ok(TileOutcome::Skipped);
        }

        match &self.source {
            TileSource::CheckOnly => {
                info!("Tile '{}' is missing", path.display());
                Ok(TileOutcome::Missing)
            }
            TileSource::Remote { template, client } => {
                self.fetch_tile(tile, template, client, &path).await
            }
        }
    }

    /// FETCHING with in-place retries: the walker is never advanced until
    /// this tile's outcome is final.
    async fn fetch_tile(
        &self,
        tile: &TileAddress,
        template: &str,
        client: &TileClient,
        path: &Path,
    ) -> FetchResult<TileOutcome> {
        let url = tile.url(template);
        let mut retry_count: u32 = 0;

        loop {
            debug!("Download {}", url);
            let response = client.get(&url).await?;

            let status = response.status();
            if status.as_u16() != 200 {
                error!(
                    "Unexpected status code: {} (url: {}), retrying in {} ms",
                    status.as_u16(),
                    url,
                    self.policy.retry_delay.as_millis()
                );
                // The original tool pauses before giving up as well as
                // before retrying; keep that pacing.
                tokio::time::sleep(self.policy.retry_delay).await;
                if retry_count < self.policy.max_retries {
                    retry_count += 1;
                    info!("Retrying {}", url);
                    continue;
                }
                info!("Skipping tile: {}", url);
                return Ok(TileOutcome::GaveUp);
            }

            self.save_tile(response, path, &url).await?;
            debug!("Done saving {}", path.display());
            tokio::time::sleep(self.policy.inter_request_delay).await;
            return Ok(TileOutcome::Saved);
        }
    }

    /// Stream a 200 response body to the destination file, creating parent
    /// directories on demand. Any failure here is fatal.
    async fn save_tile(&self, response: Response, path: &Path, url: &str) -> FetchResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| FetchError::TileWrite {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        debug!("Saving {}", path.display());
        let mut file =
            tokio::fs::File::create(path)
                .await
                .map_err(|source| FetchError::TileWrite {
                    path: path.to_path_buf(),
                    source,
                })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| FetchError::Stream {
                url: url.to_string(),
                source,
            })?;
            file.write_all(&chunk)
                .await
                .map_err(|source| FetchError::TileWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
        }

        file.flush().await.map_err(|source| FetchError::TileWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(dir: &Path) -> PipelineConfig {
        PipelineConfig {
            range: ZoomRange::new(0, 0),
            url_template: Some("http://localhost/{z}/{x}/{y}.png".to_string()),
            output_dir: dir.to_path_buf(),
            policy: FetchPolicy::default(),
        }
    }

    #[test]
    fn download_mode_requires_a_url_template() {
        let temp = tempfile::tempdir().unwrap();
        let cfg = PipelineConfig {
            url_template: None,
            ..config(temp.path())
        };
        assert!(DownloadPipeline::new(cfg).is_err());
    }

    #[test]
    fn check_mode_needs_no_url_template() {
        let temp = tempfile::tempdir().unwrap();
        let cfg = PipelineConfig {
            url_template: None,
            policy: FetchPolicy {
                check_only: true,
                ..FetchPolicy::default()
            },
            ..config(temp.path())
        };
        assert!(DownloadPipeline::new(cfg).is_ok());
    }

    #[tokio::test]
    async fn existing_tile_is_skipped_without_network() {
        let temp = tempfile::tempdir().unwrap();
        let tile = TileAddress::new(0, 0, 0);
        let dest = tile.file_path(temp.path());
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(&dest, b"cached").unwrap();

        // The template points nowhere routable; a skip must not touch it.
        let pipeline = DownloadPipeline::new(config(temp.path())).unwrap();
        let outcome = pipeline.process_tile(&tile).await.unwrap();
        assert_eq!(outcome, TileOutcome::Skipped);
        assert_eq!(std::fs::read(&dest).unwrap(), b"cached");
    }

    #[tokio::test]
    async fn check_mode_reports_missing_without_writing() {
        let temp = tempfile::tempdir().unwrap();
        let cfg = PipelineConfig {
            url_template: None,
            policy: FetchPolicy {
                check_only: true,
                retry_delay: Duration::from_millis(1),
                ..FetchPolicy::default()
            },
            ..config(temp.path())
        };
        let pipeline = DownloadPipeline::new(cfg).unwrap();

        let tile = TileAddress::new(0, 0, 0);
        let outcome = pipeline.process_tile(&tile).await.unwrap();
        assert_eq!(outcome, TileOutcome::Missing);
        assert!(!tile.file_path(temp.path()).exists());
    }
}
