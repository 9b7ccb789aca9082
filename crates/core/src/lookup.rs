//! Date-driven forecast lookup.
//!
//! The selection domain is the sorted, deduplicated set of forecast dates. On
//! construction the first date is selected; afterwards the selection only
//! moves between dates inside that domain.

use crate::format::format_usd;
use crate::models::ForecastRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const NO_FORECAST_NOTICE: &str = "No forecast available for this date.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLookup {
    options: Vec<NaiveDate>,
    selected: Option<usize>,
}

/// Result of looking up the selected date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    Price {
        date: NaiveDate,
        predicted_price: f64,
        /// Currency-formatted price, e.g. `$45,231.07`
        display: String,
    },
    NoForecast { notice: String },
}

impl DateLookup {
    #[must_use]
    pub fn new(forecast: &[ForecastRecord]) -> Self {
        let mut options: Vec<NaiveDate> = forecast.iter().map(|r| r.forecast_date).collect();
        options.sort_unstable();
        options.dedup();

        let selected = (!options.is_empty()).then_some(0);
        Self { options, selected }
    }

    #[must_use]
    pub fn options(&self) -> &[NaiveDate] {
        &self.options
    }

    #[must_use]
    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected.map(|i| self.options[i])
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Selects `date` if it is part of the domain. Returns `false` and keeps
    /// the current selection otherwise.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        match self.options.binary_search(&date) {
            Ok(index) => {
                self.selected = Some(index);
                true
            }
            Err(_) => false,
        }
    }

    pub fn select_next(&mut self) {
        if let Some(index) = self.selected {
            self.selected = Some((index + 1).min(self.options.len() - 1));
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(index) = self.selected {
            self.selected = Some(index.saturating_sub(1));
        }
    }

    pub fn select_first(&mut self) {
        if !self.options.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.options.is_empty() {
            self.selected = Some(self.options.len() - 1);
        }
    }

    /// Looks up the first forecast row matching the selected date.
    #[must_use]
    pub fn outcome(&self, forecast: &[ForecastRecord]) -> LookupOutcome {
        self.selected()
            .and_then(|date| forecast.iter().find(|r| r.forecast_date == date))
            .map_or_else(
                || LookupOutcome::NoForecast {
                    notice: NO_FORECAST_NOTICE.to_string(),
                },
                |record| LookupOutcome::Price {
                    date: record.forecast_date,
                    predicted_price: record.predicted_price,
                    display: format_usd(record.predicted_price),
                },
            )
    }
}
