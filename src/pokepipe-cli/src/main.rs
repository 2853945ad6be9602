mod cli;
mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Fetch(args) => {
            commands::fetch::handle(&args)?;
        }

        Commands::Explore(args) => {
            commands::explore::handle(&args)?;
        }

        Commands::Cache { command } => {
            commands::cache::handle(command)?;
        }

        Commands::Configure {
            api_base,
            data_dir,
            report_dir,
            timeout,
            show,
        } => {
            let update = commands::configure::ConfigUpdate {
                api_base,
                data_dir,
                report_dir,
                timeout,
            };
            commands::configure::handle(update, show)?;
        }
    }

    Ok(())
}

/// Log to stderr so table, CSV and JSON output on stdout stays clean
fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "pokepipe=info,pokepipe_cli=info",
        1 => "pokepipe=debug,pokepipe_cli=debug",
        _ => "pokepipe=trace,pokepipe_cli=trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
