//! Fetch cache command handlers

use anyhow::{Context, Result};
use pokepipe::FetchCache;

use crate::cli::CacheCommand;
use crate::config::Config;

/// Handle `cache` subcommands
pub fn handle(command: CacheCommand) -> Result<()> {
    let config = Config::load()?;
    let dir = Config::cache_dir()?;
    let mut cache = FetchCache::on_disk(&dir);

    match command {
        CacheCommand::List => {
            let entries = cache.entries().context("Failed to read fetch cache")?;
            if entries.is_empty() {
                println!("No cached fetches in {}", dir.display());
                return Ok(());
            }
            println!("{:<6} {:<8} {:<8} {:<26} api", "count", "records", "skipped", "created");
            for e in entries {
                println!(
                    "{:<6} {:<8} {:<8} {:<26} {}",
                    e.count,
                    e.outcome.records.len(),
                    e.outcome.skipped.len(),
                    e.created_at,
                    e.api_base
                );
            }
        }
        CacheCommand::Clear => {
            let removed = cache.clear().context("Failed to clear fetch cache")?;
            println!("Removed {} cached fetches", removed);
        }
        CacheCommand::Invalidate { count, api_base } => {
            let base = config.api_base(api_base.as_deref());
            if cache.invalidate(&base, count)? {
                println!("Invalidated cached fetch of {} from {}", count, base);
            } else {
                println!("No cached fetch of {} from {}", count, base);
            }
        }
    }
    Ok(())
}
