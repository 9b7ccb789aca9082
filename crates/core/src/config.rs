use crate::sentiment::UnknownLabelPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub paths: PathsConfig,
    pub display: DisplayConfig,
    pub sentiment: SentimentConfig,
}

/// Input file locations. File names are resolved against `data_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub model: PathBuf,
    pub sentiment: PathBuf,
    pub forecast: PathBuf,
    pub actual_prices: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub title: String,
    pub caption: String,
    /// Number of latest news summaries shown
    pub summary_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentConfig {
    pub unknown_labels: UnknownLabelPolicy,
}

impl PathsConfig {
    #[must_use]
    pub fn model_path(&self) -> PathBuf {
        self.data_dir.join(&self.model)
    }

    #[must_use]
    pub fn sentiment_path(&self) -> PathBuf {
        self.data_dir.join(&self.sentiment)
    }

    #[must_use]
    pub fn forecast_path(&self) -> PathBuf {
        self.data_dir.join(&self.forecast)
    }

    #[must_use]
    pub fn actual_prices_path(&self) -> PathBuf {
        self.data_dir.join(&self.actual_prices)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            model: PathBuf::from("xgb_model.pkl"),
            sentiment: PathBuf::from("bitcoin_100_articles_summary.csv"),
            forecast: PathBuf::from("btc_30_day_forecast.csv"),
            actual_prices: PathBuf::from("actual_btc_prices_30.csv"),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Bitcoin News Sentiment Dashboard".to_string(),
            caption: "Real-time Bitcoin News Summarization and Trend Prediction".to_string(),
            summary_count: 5,
        }
    }
}
