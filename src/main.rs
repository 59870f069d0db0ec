//! OSM Tile Fetcher CLI application
//!
//! Parses and validates arguments, initializes logging, runs the download
//! pipeline and maps failures to the documented exit codes.

use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use osm_tile_fetcher::cli::{handle_run, Cli, RunConfig};
use osm_tile_fetcher::constants::exit;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match RunConfig::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!();
            eprintln!("  error: {}", e);
            eprintln!();
            process::exit(exit::INVALID_CONFIG);
        }
    };

    if let Err(e) = handle_run(config).await {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

/// Initialize logging; `--verbose` raises the filter from info to debug
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("osm_tile_fetcher={}", level).parse().unwrap());

    fmt().with_env_filter(filter).with_target(false).init();
}
