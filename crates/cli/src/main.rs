use anyhow::Result;
use btc_dashboard_core::ConfigLoader;
use clap::{Parser, Subcommand};

mod commands;
mod tui_dashboard;

use commands::{DataStatusArgs, ReportArgs};

#[derive(Parser)]
#[command(name = "btc-dashboard")]
#[command(about = "Bitcoin news sentiment and price forecast dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal dashboard
    Tui {
        /// Config file path
        #[arg(short, long, default_value = "config/Dashboard.toml", env = "DASHBOARD_CONFIG")]
        config: String,
        /// Optional log file path (logs to file instead of stderr)
        #[arg(long)]
        log_file: Option<String>,
    },
    /// Print one render pass of the dashboard to stdout
    Report(ReportArgs),
    /// Show record counts and date ranges of every input file
    DataStatus(DataStatusArgs),
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // TUI logs only to --log-file; anything on stdout would corrupt the screen
    match &cli.command {
        Commands::Tui {
            log_file: Some(path),
            ..
        } => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        Commands::Tui { .. } => {
            // No logging for TUI (prevents screen corruption)
        }
        _ => {
            // Normal stderr logging for non-TUI commands
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
    }

    match cli.command {
        Commands::Tui { config, .. } => {
            let config = ConfigLoader::load(&config)?;
            tui_dashboard::run(config)?;
        }
        Commands::Report(args) => {
            commands::run_report(args)?;
        }
        Commands::DataStatus(args) => {
            commands::run_data_status(args)?;
        }
    }

    Ok(())
}
