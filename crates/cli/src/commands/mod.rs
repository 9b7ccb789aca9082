//! CLI commands for the BTC sentiment dashboard.

pub mod data_status;
pub mod report;

pub use data_status::{run_data_status, DataStatusArgs};
pub use report::{run_report, ReportArgs, ReportFormat};
