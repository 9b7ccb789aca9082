//! The dashboard view model.
//!
//! [`DashboardView::build`] is a pure function of the loaded data, the
//! configuration, and the lookup selection. Presentation layers (the TUI and
//! the text report) only read from it.

use crate::comparison::ComparisonView;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::lookup::{DateLookup, LookupOutcome};
use crate::models::{DashboardData, ForecastRecord, SentimentScore};
use crate::sentiment::aggregate_by_date;
use crate::summary::{latest_summaries, SummaryBlock};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const SUMMARIES_HEADING: &str = "Latest Bitcoin News Summaries";
pub const SENTIMENT_HEADING: &str = "Sentiment Over Time";
pub const FORECAST_HEADING: &str = "BTC Price Forecast for Next 30 Days";
pub const COMPARISON_HEADING: &str = "Actual vs. Predicted BTC Price (Last 30 Days)";
pub const LOOKUP_HEADING: &str = "Select a Date to View Predicted BTC Price";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stroke {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesColor {
    SteelBlue,
    RoyalBlue,
    Black,
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub label: String,
    pub color: SeriesColor,
    pub stroke: Stroke,
    /// Draw a marker at every point
    pub markers: bool,
    pub points: Vec<(NaiveDate, f64)>,
}

/// A date-indexed line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<SeriesSpec>,
}

impl ChartSpec {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Earliest and latest date across all series.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Smallest and largest y value across all series.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1));
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub title: String,
    pub caption: String,
    pub model_status: String,
    pub summaries: Vec<SummaryBlock>,
    pub sentiment_scores: Vec<SentimentScore>,
    pub sentiment_chart: ChartSpec,
    pub forecast_chart: ChartSpec,
    pub comparison: ComparisonView,
    /// Present only when actual prices were loaded
    pub comparison_chart: Option<ChartSpec>,
    pub lookup_options: Vec<NaiveDate>,
    pub selected_date: Option<NaiveDate>,
    pub lookup: LookupOutcome,
}

impl DashboardView {
    /// Builds one render pass of the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error only when the sentiment policy rejects an unknown label.
    pub fn build(
        data: &DashboardData,
        config: &DashboardConfig,
        lookup: &DateLookup,
    ) -> Result<Self> {
        let summaries = latest_summaries(&data.sentiment, config.display.summary_count);
        let sentiment_scores = aggregate_by_date(&data.sentiment, config.sentiment.unknown_labels)?;
        let comparison = ComparisonView::build(&data.forecast, data.actual_prices.as_deref());
        let comparison_chart = match &comparison {
            ComparisonView::Available { .. } => Some(comparison_chart(&comparison)),
            ComparisonView::Unavailable { .. } => None,
        };

        Ok(Self {
            title: config.display.title.clone(),
            caption: config.display.caption.clone(),
            model_status: data.model.status_line(),
            summaries,
            sentiment_chart: sentiment_chart(&sentiment_scores),
            sentiment_scores,
            forecast_chart: forecast_chart(&data.forecast),
            comparison,
            comparison_chart,
            lookup_options: lookup.options().to_vec(),
            selected_date: lookup.selected(),
            lookup: lookup.outcome(&data.forecast),
        })
    }
}

fn sentiment_chart(scores: &[SentimentScore]) -> ChartSpec {
    ChartSpec {
        title: "Average Sentiment Score by Date".to_string(),
        x_label: "Date".to_string(),
        y_label: "Sentiment Score".to_string(),
        series: vec![SeriesSpec {
            label: "Sentiment Score".to_string(),
            color: SeriesColor::SteelBlue,
            stroke: Stroke::Solid,
            markers: true,
            points: scores
                .iter()
                .filter_map(|s| s.sentiment_score.map(|v| (s.published_date, v)))
                .collect(),
        }],
    }
}

fn forecast_chart(forecast: &[ForecastRecord]) -> ChartSpec {
    let mut points: Vec<(NaiveDate, f64)> = forecast
        .iter()
        .map(|r| (r.forecast_date, r.predicted_price))
        .collect();
    points.sort_by_key(|p| p.0);

    ChartSpec {
        title: "30-Day BTC Price Forecast".to_string(),
        x_label: "Date".to_string(),
        y_label: "Predicted Price (USD)".to_string(),
        series: vec![SeriesSpec {
            label: "Predicted Price".to_string(),
            color: SeriesColor::RoyalBlue,
            stroke: Stroke::Dashed,
            markers: true,
            points,
        }],
    }
}

fn comparison_chart(comparison: &ComparisonView) -> ChartSpec {
    let records = comparison.records();
    ChartSpec {
        title: "Actual vs. Predicted Bitcoin Price".to_string(),
        x_label: "Date".to_string(),
        y_label: "Price (USD)".to_string(),
        series: vec![
            SeriesSpec {
                label: "Actual Price".to_string(),
                color: SeriesColor::Black,
                stroke: Stroke::Solid,
                markers: false,
                points: records.iter().map(|r| (r.forecast_date, r.actual_price)).collect(),
            },
            SeriesSpec {
                label: "Predicted Price".to_string(),
                color: SeriesColor::RoyalBlue,
                stroke: Stroke::Dashed,
                markers: false,
                points: records.iter().map(|r| (r.forecast_date, r.predicted_price)).collect(),
            },
        ],
    }
}
