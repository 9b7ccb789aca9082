//! One-shot dashboard report.
//!
//! Runs a single render pass and prints it to stdout, as text or as the
//! serialized view model.

use anyhow::{anyhow, Context, Result};
use btc_dashboard_core::{ConfigLoader, DashboardView, DateLookup, ReportFormatter};
use btc_dashboard_data::{parse_date, DashboardLoader};
use clap::{Args, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Arguments for the report command.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Dashboard.toml", env = "DASHBOARD_CONFIG")]
    pub config: String,

    /// Forecast date to look up (YYYY-MM-DD). Defaults to the first forecast date.
    #[arg(long)]
    pub date: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Runs the report command.
///
/// # Errors
/// Returns an error if configuration or data cannot be loaded, or if `--date`
/// is not one of the forecast dates.
pub fn run_report(args: ReportArgs) -> Result<()> {
    let config = ConfigLoader::load(&args.config)?;
    let data = DashboardLoader::new(config.paths.clone())
        .load()
        .context("Failed to load dashboard data")?;

    let mut lookup = DateLookup::new(&data.forecast);
    if let Some(raw) = &args.date {
        let date = parse_date(raw)
            .ok_or_else(|| anyhow!("Invalid --date {raw:?}, expected YYYY-MM-DD"))?;
        if !lookup.select(date) {
            let range = match (lookup.options().first(), lookup.options().last()) {
                (Some(first), Some(last)) => format!("{first} to {last}"),
                _ => "none".to_string(),
            };
            return Err(anyhow!("{date} is not a forecast date (available: {range})"));
        }
    }

    let view = DashboardView::build(&data, &config, &lookup)?;
    let output = render_report(&view, args.format)?;
    println!("{output}");

    Ok(())
}

/// Formats a built view for stdout.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render_report(view: &DashboardView, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(ReportFormatter::format(view)),
        ReportFormat::Json => {
            serde_json::to_string_pretty(view).context("Failed to serialize dashboard view")
        }
    }
}
