//! Command-line argument parsing and validation
//!
//! The clap surface mirrors the classic tile-downloader option set. Parsed
//! arguments are promoted into a [`RunConfig`] only after every validation
//! rule passes; the rest of the program never sees an unvalidated value.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::app::{FetchPolicy, ZoomRange};
use crate::constants::tiles;
use crate::errors::{ConfigError, ConfigResult};

/// Download map tile images from an OSM tile server
#[derive(Parser, Debug)]
#[command(
    name = "osm_tile_fetcher",
    version,
    about = "Download map tile images from an OSM tile server"
)]
pub struct Cli {
    /// Zoom level start
    #[arg(short = 's', long, value_name = "n")]
    pub start_zoom_level: u8,

    /// Zoom level end
    #[arg(short = 'e', long, value_name = "n")]
    pub end_zoom_level: u8,

    /// Tile server url with {z}, {x} and {y} placeholders
    #[arg(short = 'u', long, value_name = "url")]
    pub url: Option<String>,

    /// Output directory
    #[arg(short = 'o', long, value_name = "dir")]
    pub output_dir: PathBuf,

    /// Verbose mode, default is off
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Check if the expected tiles exist in the output directory instead of
    /// downloading them
    #[arg(short = 'c', long)]
    pub check_tiles: bool,

    /// Delay in ms between downloads, default is 0
    #[arg(short = 'd', long, value_name = "ms", default_value_t = 0)]
    pub delay: u64,

    /// Maximum number of retries for a download, default is 3
    #[arg(short = 'm', long, value_name = "num", default_value_t = 3)]
    pub max_retries: u32,

    /// Delay in ms between download retries, default is 2500
    #[arg(short = 'r', long, value_name = "ms", default_value_t = 2500)]
    pub retry_delay: u64,

    /// Force overwriting existing tiles (re-downloads all tiles), default is
    /// off
    #[arg(short = 'f', long)]
    pub force_overwrite: bool,

    /// Answer yes to prompt confirming downloading of tiles, default is off
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Fully validated run configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub range: ZoomRange,
    /// Absent only in check mode
    pub url_template: Option<String>,
    /// Absolute, existing directory
    pub output_dir: PathBuf,
    pub verbose: bool,
    pub policy: FetchPolicy,
    pub skip_confirmation: bool,
}

impl RunConfig {
    /// Validate parsed arguments and build the run configuration
    pub fn from_cli(cli: Cli) -> ConfigResult<Self> {
        if cli.start_zoom_level > tiles::MAX_ZOOM {
            return Err(ConfigError::InvalidValue {
                option: "-s, --start-zoom-level <n>".to_string(),
                value: cli.start_zoom_level.to_string(),
            });
        }
        if cli.end_zoom_level > tiles::MAX_ZOOM {
            return Err(ConfigError::InvalidValue {
                option: "-e, --end-zoom-level <n>".to_string(),
                value: cli.end_zoom_level.to_string(),
            });
        }
        if cli.start_zoom_level > cli.end_zoom_level {
            return Err(ConfigError::ZoomRangeInverted);
        }

        if cli.force_overwrite && cli.check_tiles {
            return Err(ConfigError::ForceWithCheck);
        }

        // No url needed to check tiles
        match &cli.url {
            Some(url) => validate_url_template(url)?,
            None if !cli.check_tiles => {
                return Err(ConfigError::MissingOption {
                    option: "-u, --url <url>".to_string(),
                });
            }
            None => {}
        }

        let output_dir = resolve_output_dir(cli.output_dir)?;

        Ok(Self {
            range: ZoomRange::new(cli.start_zoom_level, cli.end_zoom_level),
            url_template: cli.url,
            output_dir,
            verbose: cli.verbose,
            policy: FetchPolicy {
                force_overwrite: cli.force_overwrite,
                check_only: cli.check_tiles,
                inter_request_delay: Duration::from_millis(cli.delay),
                max_retries: cli.max_retries,
                retry_delay: Duration::from_millis(cli.retry_delay),
            },
            skip_confirmation: cli.yes,
        })
    }
}

/// The template must be an http/https URL with a host and carry all three
/// tile placeholders.
fn validate_url_template(raw: &str) -> ConfigResult<()> {
    let invalid = || ConfigError::InvalidValue {
        option: "-u, --url <url>".to_string(),
        value: raw.to_string(),
    };

    let parsed = Url::parse(raw).map_err(|_| invalid())?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid());
    }
    // A host-less template like "http:///{z}/..." parses with "{z}" taken
    // as the host, so an emptiness check alone is not enough: the host must
    // be a real hostname, not a placeholder.
    let host = parsed.host_str().unwrap_or("");
    if host.is_empty() || host.contains('{') || host.to_ascii_lowercase().contains("%7b") {
        return Err(invalid());
    }
    if !(raw.contains(tiles::TOKEN_ZOOM)
        && raw.contains(tiles::TOKEN_X)
        && raw.contains(tiles::TOKEN_Y))
    {
        return Err(invalid());
    }
    Ok(())
}

/// The output directory must already exist and be a directory; it is
/// resolved to an absolute path for the rest of the run.
fn resolve_output_dir(dir: PathBuf) -> ConfigResult<PathBuf> {
    if !dir.exists() {
        return Err(ConfigError::OutputDirMissing { path: dir });
    }
    if !dir.is_dir() {
        return Err(ConfigError::OutputDirNotADirectory { path: dir });
    }
    std::fs::canonicalize(&dir).map_err(|source| ConfigError::OutputDirUnresolvable {
        path: dir,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli_for(dir: &TempDir) -> Cli {
        Cli {
            start_zoom_level: 0,
            end_zoom_level: 1,
            url: Some("http://tiles.example.org/{z}/{x}/{y}.png".to_string()),
            output_dir: dir.path().to_path_buf(),
            verbose: false,
            check_tiles: false,
            delay: 0,
            max_retries: 3,
            retry_delay: 2500,
            force_overwrite: false,
            yes: false,
        }
    }

    #[test]
    fn valid_arguments_build_a_config() {
        let dir = TempDir::new().unwrap();
        let config = RunConfig::from_cli(cli_for(&dir)).unwrap();
        assert_eq!(config.range, ZoomRange::new(0, 1));
        assert!(config.output_dir.is_absolute());
        assert_eq!(config.policy.max_retries, 3);
        assert_eq!(config.policy.retry_delay, Duration::from_millis(2500));
    }

    #[test]
    fn defaults_come_from_the_parser() {
        let cli = Cli::parse_from([
            "osm_tile_fetcher",
            "-s",
            "0",
            "-e",
            "2",
            "-u",
            "http://t.example/{z}/{x}/{y}.png",
            "-o",
            "/tmp",
        ]);
        assert_eq!(cli.delay, 0);
        assert_eq!(cli.max_retries, 3);
        assert_eq!(cli.retry_delay, 2500);
        assert!(!cli.verbose);
        assert!(!cli.yes);
    }

    #[test]
    fn zoom_levels_above_nineteen_are_rejected() {
        let dir = TempDir::new().unwrap();
        let cli = Cli {
            start_zoom_level: 20,
            end_zoom_level: 20,
            ..cli_for(&dir)
        };
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn inverted_zoom_range_is_rejected() {
        let dir = TempDir::new().unwrap();
        let cli = Cli {
            start_zoom_level: 5,
            end_zoom_level: 3,
            ..cli_for(&dir)
        };
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::ZoomRangeInverted)
        ));
    }

    #[test]
    fn force_and_check_are_mutually_exclusive() {
        let dir = TempDir::new().unwrap();
        let cli = Cli {
            force_overwrite: true,
            check_tiles: true,
            ..cli_for(&dir)
        };
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::ForceWithCheck)
        ));
    }

    #[test]
    fn url_is_required_unless_checking() {
        let dir = TempDir::new().unwrap();
        let cli = Cli {
            url: None,
            ..cli_for(&dir)
        };
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::MissingOption { .. })
        ));

        let checking = Cli {
            url: None,
            check_tiles: true,
            ..cli_for(&dir)
        };
        assert!(RunConfig::from_cli(checking).is_ok());
    }

    #[test]
    fn url_template_validation() {
        // scheme
        assert!(validate_url_template("ftp://t.example/{z}/{x}/{y}.png").is_err());
        // host: missing entirely, or a placeholder swallowed into the host
        // position by the WHATWG parser
        assert!(validate_url_template("http:///{z}/{x}/{y}.png").is_err());
        assert!(validate_url_template("https:///{z}/{x}/{y}.png").is_err());
        assert!(validate_url_template("http://{z}/{x}/{y}.png").is_err());
        // placeholders
        assert!(validate_url_template("http://t.example/tiles.png").is_err());
        assert!(validate_url_template("http://t.example/{z}/{x}.png").is_err());
        // valid, http and https
        assert!(validate_url_template("http://t.example/{z}/{x}/{y}.png").is_ok());
        assert!(validate_url_template("https://t.example/{z}/{x}/{y}.png?key=abc").is_ok());
    }

    #[test]
    fn missing_output_dir_is_rejected() {
        let dir = TempDir::new().unwrap();
        let cli = Cli {
            output_dir: dir.path().join("nope"),
            ..cli_for(&dir)
        };
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::OutputDirMissing { .. })
        ));
    }

    #[test]
    fn file_as_output_dir_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("tiles.txt");
        std::fs::write(&file, b"not a dir").unwrap();
        let cli = Cli {
            output_dir: file,
            ..cli_for(&dir)
        };
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::OutputDirNotADirectory { .. })
        ));
    }
}
