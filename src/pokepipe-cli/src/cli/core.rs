//! Core CLI definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::cache::CacheCommand;
use super::OutputFormat;

#[derive(Parser)]
#[command(name = "pokepipe")]
#[command(about = "PokéPipeline - creature catalog explorer", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch creatures from the catalog API and show the dashboard
    #[command(visible_alias = "f")]
    Fetch(FetchArgs),

    /// Explore a local dataset file
    #[command(visible_alias = "e")]
    Explore(ExploreArgs),

    /// Manage cached fetch results
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default catalog API base URL
        #[arg(long)]
        api_base: Option<String>,

        /// Set default directory for fetch artifacts
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Set default directory for HTML reports
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// Set per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Args)]
pub struct FetchArgs {
    /// Number of creatures to fetch (ids 1..=N)
    #[arg(short = 'n', long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(10..=100))]
    pub count: u32,

    /// Catalog API base URL (uses configured default if not provided)
    #[arg(long, env = "POKEPIPE_API_BASE")]
    pub api_base: Option<String>,

    /// Directory for the raw JSON artifact
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory for the HTML report
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Only show creatures of this main type ("all" for no filter)
    #[arg(short = 't', long = "type", default_value = "all")]
    pub type_filter: String,

    /// Minimum total power (inclusive)
    #[arg(short, long)]
    pub min_power: Option<u64>,

    /// Output format: table (default), csv, json
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,

    /// Ignore and replace any cached result for this count
    #[arg(long)]
    pub refresh: bool,

    /// Do not read or write the fetch cache
    #[arg(long, conflicts_with = "refresh")]
    pub no_cache: bool,

    /// Skip writing the HTML report
    #[arg(long)]
    pub no_report: bool,
}

#[derive(Args)]
pub struct ExploreArgs {
    /// Path to a JSON array of creature records
    #[arg(default_value = "share/pokemon.json")]
    pub input: PathBuf,

    /// Only show creatures of this main type ("all" for no filter)
    #[arg(short = 't', long = "type", default_value = "all")]
    pub type_filter: String,

    /// Minimum power score (inclusive); clamped to the observed range
    #[arg(short, long)]
    pub min_power: Option<u64>,

    /// Output format: table (default), csv, json
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}
