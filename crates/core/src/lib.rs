//! Core types and pure transforms for the BTC sentiment dashboard.
//!
//! This crate provides:
//! - Domain records for the sentiment, forecast, and actual-price tables
//! - The dashboard error taxonomy
//! - Layered configuration (defaults, TOML, environment)
//! - Summary, aggregation, comparison, and date lookup transforms
//! - The `DashboardView` view model and its plain-text formatter

pub mod comparison;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod format;
pub mod lookup;
pub mod models;
pub mod report_formatter;
pub mod sentiment;
pub mod summary;
pub mod view;

pub use comparison::{inner_join, ComparisonView, NO_COMPARISON_NOTICE};
pub use config::{DashboardConfig, DisplayConfig, PathsConfig, SentimentConfig};
pub use config_loader::ConfigLoader;
pub use error::{DashboardError, Result};
pub use format::format_usd;
pub use lookup::{DateLookup, LookupOutcome, NO_FORECAST_NOTICE};
pub use models::{
    ActualPriceRecord, ArtifactFormat, ComparisonRecord, DashboardData, ForecastRecord,
    JoblibCompression, ModelArtifact, SentimentLabel, SentimentRecord, SentimentScore,
};
pub use report_formatter::ReportFormatter;
pub use sentiment::{aggregate_by_date, UnknownLabelPolicy};
pub use summary::{latest_summaries, SummaryBlock};
pub use view::{ChartSpec, DashboardView, SeriesColor, SeriesSpec, Stroke};
