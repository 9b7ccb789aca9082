//! Data loading for the BTC sentiment dashboard.
//!
//! This crate provides:
//! - CSV readers for the sentiment, forecast, and actual price tables
//! - Model artifact validation
//! - `DashboardLoader`, the single initialization step that produces
//!   an immutable `DashboardData`

pub mod artifact;
pub mod csv_storage;
pub mod loader;

pub use artifact::ArtifactLoader;
pub use csv_storage::{parse_date, CsvStorage};
pub use loader::DashboardLoader;
