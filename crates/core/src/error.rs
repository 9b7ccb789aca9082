//! Error taxonomy for loading and building the dashboard.
//!
//! Every variant here is fatal for a render pass. Expected absences (no
//! actual-price file, no forecast for a date) are modelled as values in
//! [`crate::comparison::ComparisonView`] and [`crate::lookup::LookupOutcome`].

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// Model artifact file does not exist.
    #[error("model artifact not found: {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    /// Model artifact exists but is not a recognised serialized model.
    #[error("model artifact {} is corrupt: {reason}", path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    /// Required dataset file does not exist.
    #[error("dataset not found: {}", path.display())]
    DatasetNotFound { path: PathBuf },

    /// Dataset is missing a column or holds an unparseable value.
    #[error("dataset {} is malformed: {reason}", path.display())]
    DatasetMalformed { path: PathBuf, reason: String },

    /// Sentiment label outside POSITIVE/NEGATIVE/NEUTRAL under the `reject` policy.
    #[error("unknown sentiment label {label:?} on {date}")]
    UnknownSentiment { label: String, date: NaiveDate },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DatasetMalformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ArtifactCorrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
