//! Command-line interface for OSM Tile Fetcher
//!
//! Argument parsing and validation, the startup banner, the confirmation
//! gate, and the run handler tying them to the pipeline.

pub mod args;
pub mod commands;
pub mod confirm;
pub mod startup;

pub use args::{Cli, RunConfig};
pub use commands::{handle_run, RunOutcome};
pub use confirm::confirm_run;
