//! Dashboard data models.
//!
//! Records mirror the rows of the input CSV tables. They are created once at
//! load time and only read afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Categorical sentiment attached to a news article.
///
/// Labels are case-sensitive. Anything other than the three known labels is
/// kept verbatim in `Unrecognized` so the aggregation policy can decide what
/// to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Unrecognized(String),
}

impl SentimentLabel {
    /// Parses a raw label from the sentiment table.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "POSITIVE" => Self::Positive,
            "NEGATIVE" => Self::Negative,
            "NEUTRAL" => Self::Neutral,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Returns the label as it appears in the source table.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Numeric encoding used for the daily sentiment score.
    ///
    /// POSITIVE → 1, NEGATIVE → -1, NEUTRAL → 0, unknown → `None`.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Positive => Some(1.0),
            Self::Negative => Some(-1.0),
            Self::Neutral => Some(0.0),
            Self::Unrecognized(_) => None,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for SentimentLabel {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<SentimentLabel> for String {
    fn from(label: SentimentLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One summarised news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// Article headline
    pub title: String,
    /// Generated article summary
    pub summary: String,
    /// Calendar day the article was published
    pub published_date: NaiveDate,
    /// Classifier output for the article
    pub sentiment: SentimentLabel,
}

impl SentimentRecord {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        published_date: NaiveDate,
        sentiment: SentimentLabel,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            published_date,
            sentiment,
        }
    }
}

/// Predicted closing price (USD) for one future day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub forecast_date: NaiveDate,
    pub predicted_price: f64,
}

/// Observed closing price (USD) for a forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActualPriceRecord {
    pub forecast_date: NaiveDate,
    pub actual_price: f64,
}

/// Mean sentiment for one publication day.
///
/// `sentiment_score` is `None` when every label on that day was excluded by
/// the unknown label policy. Days without articles have no entry at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub published_date: NaiveDate,
    pub sentiment_score: Option<f64>,
}

/// A day for which both the predicted and the actual price are known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub forecast_date: NaiveDate,
    pub predicted_price: f64,
    pub actual_price: f64,
}

/// Container format detected for the model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFormat {
    /// Python pickle stream (joblib dump) with its protocol version
    Pickle { protocol: u8 },
    /// Compressed joblib dump; the pickle inside is not inspected
    CompressedPickle { compression: JoblibCompression },
    /// XGBoost JSON model
    Json,
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pickle { protocol } => write!(f, "pickle v{protocol}"),
            Self::CompressedPickle { compression } => write!(f, "joblib {compression}"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Codecs `joblib.dump(..., compress=...)` can wrap a pickle in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoblibCompression {
    Zlib,
    Gzip,
    Bz2,
    Xz,
    Lzma,
    Lz4,
}

impl JoblibCompression {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zlib => "zlib",
            Self::Gzip => "gzip",
            Self::Bz2 => "bz2",
            Self::Xz => "xz",
            Self::Lzma => "lzma",
            Self::Lz4 => "lz4",
        }
    }
}

impl fmt::Display for JoblibCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pretrained predictor shipped with the forecast.
///
/// It is validated at start-up and reported in the status line. Nothing in
/// the dashboard runs inference with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub path: PathBuf,
    pub format: ArtifactFormat,
    pub size_bytes: u64,
}

impl ModelArtifact {
    /// One-line status used in report and TUI headers.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "model {} ({}, {} bytes)",
            self.path.display(),
            self.format,
            self.size_bytes
        )
    }
}

/// Everything the dashboard reads from disk, loaded in one initialization step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub model: ModelArtifact,
    pub sentiment: Vec<SentimentRecord>,
    pub forecast: Vec<ForecastRecord>,
    /// `None` when the actual-price file is absent
    pub actual_prices: Option<Vec<ActualPriceRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_label_parse_is_case_sensitive() {
        assert_eq!(SentimentLabel::parse("POSITIVE"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::parse("NEGATIVE"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::parse("NEUTRAL"), SentimentLabel::Neutral);
        assert_eq!(
            SentimentLabel::parse("positive"),
            SentimentLabel::Unrecognized("positive".to_string())
        );
    }

    #[test]
    fn test_sentiment_label_score() {
        assert_eq!(SentimentLabel::Positive.score(), Some(1.0));
        assert_eq!(SentimentLabel::Negative.score(), Some(-1.0));
        assert_eq!(SentimentLabel::Neutral.score(), Some(0.0));
        assert_eq!(SentimentLabel::parse("MIXED").score(), None);
        assert!(!SentimentLabel::parse("MIXED").is_known());
    }

    #[test]
    fn test_sentiment_label_serializes_as_raw_string() {
        let json = serde_json::to_string(&SentimentLabel::Negative).unwrap();
        assert_eq!(json, "\"NEGATIVE\"");

        let label: SentimentLabel = serde_json::from_str("\"MIXED\"").unwrap();
        assert_eq!(label, SentimentLabel::Unrecognized("MIXED".to_string()));
    }

    #[test]
    fn test_artifact_status_line() {
        let artifact = ModelArtifact {
            path: PathBuf::from("xgb_model.pkl"),
            format: ArtifactFormat::Pickle { protocol: 4 },
            size_bytes: 2048,
        };
        assert_eq!(
            artifact.status_line(),
            "model xgb_model.pkl (pickle v4, 2048 bytes)"
        );
    }

    #[test]
    fn test_compressed_artifact_status_line() {
        let artifact = ModelArtifact {
            path: PathBuf::from("xgb_model.pkl.gz"),
            format: ArtifactFormat::CompressedPickle {
                compression: JoblibCompression::Gzip,
            },
            size_bytes: 512,
        };
        assert_eq!(
            artifact.status_line(),
            "model xgb_model.pkl.gz (joblib gzip, 512 bytes)"
        );
    }
}
