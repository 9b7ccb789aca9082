//! Actual vs. predicted price comparison.

use crate::models::{ActualPriceRecord, ComparisonRecord, ForecastRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const NO_COMPARISON_NOTICE: &str = "No actual BTC prices available for comparison.";

/// Comparison section state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonView {
    /// Actual prices were loaded; rows cover dates present in both tables.
    Available { records: Vec<ComparisonRecord> },
    /// The actual-price file is absent.
    Unavailable { notice: String },
}

impl ComparisonView {
    #[must_use]
    pub fn build(forecast: &[ForecastRecord], actual: Option<&[ActualPriceRecord]>) -> Self {
        match actual {
            Some(actual) => Self::Available {
                records: inner_join(forecast, actual),
            },
            None => Self::Unavailable {
                notice: NO_COMPARISON_NOTICE.to_string(),
            },
        }
    }

    #[must_use]
    pub fn records(&self) -> &[ComparisonRecord] {
        match self {
            Self::Available { records } => records,
            Self::Unavailable { .. } => &[],
        }
    }
}

/// Inner join of forecast and actual prices on `forecast_date`.
///
/// Dates missing from either side are dropped. Duplicate dates pair up
/// row by row. Output is ascending by date; ties keep forecast table order.
#[must_use]
pub fn inner_join(
    forecast: &[ForecastRecord],
    actual: &[ActualPriceRecord],
) -> Vec<ComparisonRecord> {
    let mut actual_by_date: HashMap<NaiveDate, Vec<f64>> = HashMap::new();
    for row in actual {
        actual_by_date
            .entry(row.forecast_date)
            .or_default()
            .push(row.actual_price);
    }

    let mut joined: Vec<ComparisonRecord> = forecast
        .iter()
        .flat_map(|f| {
            actual_by_date
                .get(&f.forecast_date)
                .into_iter()
                .flatten()
                .map(move |&actual_price| ComparisonRecord {
                    forecast_date: f.forecast_date,
                    predicted_price: f.predicted_price,
                    actual_price,
                })
        })
        .collect();

    joined.sort_by_key(|r| r.forecast_date);
    joined
}
