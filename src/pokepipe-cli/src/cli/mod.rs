//! CLI argument definitions for pokepipe
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod cache;
mod core;

pub use self::cache::CacheCommand;
pub use self::core::{Cli, Commands, ExploreArgs, FetchArgs};

/// Output format for record tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}
