//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up pokepipe defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Values accepted by `configure`
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub api_base: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub report_dir: Option<PathBuf>,
    pub timeout: Option<u64>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.api_base.is_none()
            && self.data_dir.is_none()
            && self.report_dir.is_none()
            && self.timeout.is_none()
    }

    fn apply(self, config: &mut Config) {
        if let Some(base) = self.api_base {
            config.api_base = Some(base.trim_end_matches('/').to_string());
        }
        if let Some(dir) = self.data_dir {
            config.data_dir = Some(dir);
        }
        if let Some(dir) = self.report_dir {
            config.report_dir = Some(dir);
        }
        if let Some(secs) = self.timeout {
            config.timeout_secs = Some(secs);
        }
    }
}

/// Handle the configure command
pub fn handle(update: ConfigUpdate, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if update.is_empty() {
        show_usage();
        return Ok(());
    }

    update.apply(&mut config);
    config.save()?;
    tracing::debug!("Saved configuration: {:?}", config);

    println!("Configuration updated");
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }
    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("API base:   {}", config.api_base(None));
    println!("Data dir:   {}", config.data_dir(None).display());
    println!("Report dir: {}", config.report_dir(None).display());
    println!("Timeout:    {}s", config.timeout().as_secs());

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
    if let Ok(path) = Config::cache_dir() {
        println!("Cache dir:   {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: pokepipe configure [--api-base URL] [--data-dir DIR] [--report-dir DIR] [--timeout SECS]");
    println!("   or: pokepipe configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_update() {
        let mut config = Config::default();
        ConfigUpdate {
            api_base: Some("http://localhost:8000/api/v2/".to_string()),
            timeout: Some(10),
            ..Default::default()
        }
        .apply(&mut config);

        assert_eq!(config.api_base.as_deref(), Some("http://localhost:8000/api/v2"));
        assert_eq!(config.timeout_secs, Some(10));
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_empty_update() {
        assert!(ConfigUpdate::default().is_empty());
        assert!(!ConfigUpdate {
            data_dir: Some(PathBuf::from("out")),
            ..Default::default()
        }
        .is_empty());
    }
}
