//! dmspec CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod config;
mod report;
mod run;

#[derive(Parser)]
#[command(name = "dmspec")]
#[command(about = "dmspec - dimuon invariant-mass spectrum analysis")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis described by a config file
    Run {
        /// Run configuration (YAML; JSON when the extension is `.json`)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Run { config } => {
            let cfg = config::read_run_config(&config)?;
            let summary = run::run_analysis(&cfg)?;
            report::write_report(&cfg, &summary)?;
            tracing::info!(
                events = summary.metrics.events,
                figures = summary.figures.len(),
                "analysis complete"
            );
        }
    }

    Ok(())
}
