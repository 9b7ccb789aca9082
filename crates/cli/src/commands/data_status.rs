//! Data status CLI command.
//!
//! Loads every dashboard input and prints record counts and date ranges.
//! Used to check the input files before starting the dashboard.

use anyhow::{Context, Result};
use btc_dashboard_core::{ConfigLoader, DashboardData};
use btc_dashboard_data::DashboardLoader;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the data-status command.
#[derive(Args, Debug, Clone)]
pub struct DataStatusArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Dashboard.toml", env = "DASHBOARD_CONFIG")]
    pub config: String,
}

/// Record count and date bounds for one table.
#[derive(Debug, PartialEq, Eq)]
struct TableStatus {
    table_name: &'static str,
    record_count: usize,
    earliest: Option<NaiveDate>,
    latest: Option<NaiveDate>,
}

impl TableStatus {
    fn new(table_name: &'static str, dates: impl Iterator<Item = NaiveDate>) -> Self {
        let mut record_count = 0;
        let mut earliest: Option<NaiveDate> = None;
        let mut latest: Option<NaiveDate> = None;
        for date in dates {
            record_count += 1;
            earliest = Some(earliest.map_or(date, |e| e.min(date)));
            latest = Some(latest.map_or(date, |l| l.max(date)));
        }
        Self {
            table_name,
            record_count,
            earliest,
            latest,
        }
    }

    fn format_date(date: Option<NaiveDate>) -> String {
        date.map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    fn line(&self) -> String {
        format!(
            "{:<16} {:>8}   {:<10} → {:<10}",
            self.table_name,
            self.record_count,
            Self::format_date(self.earliest),
            Self::format_date(self.latest)
        )
    }
}

fn table_statuses(data: &DashboardData) -> Vec<TableStatus> {
    let mut tables = vec![
        TableStatus::new("sentiment", data.sentiment.iter().map(|r| r.published_date)),
        TableStatus::new("forecast", data.forecast.iter().map(|r| r.forecast_date)),
    ];
    if let Some(actual) = &data.actual_prices {
        tables.push(TableStatus::new(
            "actual_prices",
            actual.iter().map(|r| r.forecast_date),
        ));
    }
    tables
}

/// Runs the data-status command.
///
/// # Errors
/// Returns an error if configuration or any required input cannot be loaded.
pub fn run_data_status(args: DataStatusArgs) -> Result<()> {
    let config = ConfigLoader::load(&args.config)?;
    let data = DashboardLoader::new(config.paths.clone())
        .load()
        .context("Failed to load dashboard data")?;

    tracing::info!("All required inputs loaded");

    println!("{}", data.model.status_line());
    println!("{:<16} {:>8}   {:<10}   {:<10}", "Table", "Records", "Earliest", "Latest");
    for table in table_statuses(&data) {
        println!("{}", table.line());
    }
    if data.actual_prices.is_none() {
        println!(
            "actual_prices    absent ({})",
            config.paths.actual_prices_path().display()
        );
    }

    Ok(())
}
