//! Daily sentiment aggregation.
//!
//! Labels are encoded POSITIVE → 1, NEGATIVE → -1, NEUTRAL → 0 and averaged
//! per publication day.

use crate::error::{DashboardError, Result};
use crate::models::{SentimentRecord, SentimentScore};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// What to do with labels outside the three known values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLabelPolicy {
    /// Leave them out of the mean. A day with no known labels scores `None`.
    #[default]
    Exclude,
    /// Count them as NEUTRAL (0).
    Neutral,
    /// Fail the render pass.
    Reject,
}

#[derive(Default)]
struct DayAccumulator {
    sum: f64,
    count: usize,
}

/// Groups records by `published_date` and averages the encoded labels.
///
/// Returns exactly one score per distinct date in the input, ascending.
///
/// # Errors
///
/// Returns `DashboardError::UnknownSentiment` for the first unknown label
/// when `policy` is [`UnknownLabelPolicy::Reject`].
pub fn aggregate_by_date(
    records: &[SentimentRecord],
    policy: UnknownLabelPolicy,
) -> Result<Vec<SentimentScore>> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    let mut unknown = 0usize;

    for record in records {
        let day = days.entry(record.published_date).or_default();
        let value = match (record.sentiment.score(), policy) {
            (Some(value), _) => Some(value),
            (None, UnknownLabelPolicy::Exclude) => {
                unknown += 1;
                None
            }
            (None, UnknownLabelPolicy::Neutral) => {
                unknown += 1;
                Some(0.0)
            }
            (None, UnknownLabelPolicy::Reject) => {
                return Err(DashboardError::UnknownSentiment {
                    label: record.sentiment.as_str().to_string(),
                    date: record.published_date,
                });
            }
        };

        if let Some(value) = value {
            day.sum += value;
            day.count += 1;
        }
    }

    if unknown > 0 {
        warn!(
            unknown,
            ?policy,
            "Sentiment table contains labels outside POSITIVE/NEGATIVE/NEUTRAL"
        );
    }

    Ok(days
        .into_iter()
        .map(|(published_date, day)| SentimentScore {
            published_date,
            sentiment_score: (day.count > 0).then(|| day.sum / day.count as f64),
        })
        .collect())
}
