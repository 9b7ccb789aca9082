//! Latest news summaries.

use crate::models::{SentimentLabel, SentimentRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One display block in the "Latest Bitcoin News Summaries" section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryBlock {
    pub title: String,
    pub summary: String,
    pub sentiment: SentimentLabel,
    pub published_date: NaiveDate,
}

impl From<&SentimentRecord> for SummaryBlock {
    fn from(record: &SentimentRecord) -> Self {
        Self {
            title: record.title.clone(),
            summary: record.summary.clone(),
            sentiment: record.sentiment.clone(),
            published_date: record.published_date,
        }
    }
}

/// Returns the `count` most recently published articles, newest first.
///
/// The sort is stable, so articles sharing a date keep their table order.
#[must_use]
pub fn latest_summaries(records: &[SentimentRecord], count: usize) -> Vec<SummaryBlock> {
    let mut sorted: Vec<&SentimentRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.published_date.cmp(&a.published_date));

    sorted.into_iter().take(count).map(SummaryBlock::from).collect()
}
