//! Fetch cache CLI definitions

use clap::Subcommand;

#[derive(Subcommand)]
pub enum CacheCommand {
    /// List cached fetch results
    List,

    /// Remove every cached fetch result
    Clear,

    /// Remove the cached result for one fetch count
    Invalidate {
        /// Fetch count whose entry should be dropped
        #[arg(short = 'n', long)]
        count: u32,

        /// Catalog API base URL (uses configured default if not provided)
        #[arg(long, env = "POKEPIPE_API_BASE")]
        api_base: Option<String>,
    },
}
