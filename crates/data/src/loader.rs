use crate::artifact::ArtifactLoader;
use crate::csv_storage::CsvStorage;
use btc_dashboard_core::{DashboardData, PathsConfig, Result};
use tracing::info;

/// Loads every dashboard input in one explicit initialization step.
pub struct DashboardLoader {
    paths: PathsConfig,
}

impl DashboardLoader {
    #[must_use]
    pub fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    /// Reads the model artifact, the sentiment and forecast tables, and the
    /// optional actual price table.
    ///
    /// # Errors
    ///
    /// Returns the first fatal loading error. An absent actual price file is
    /// not an error.
    pub fn load(&self) -> Result<DashboardData> {
        let model = ArtifactLoader::load(&self.paths.model_path())?;
        let sentiment = CsvStorage::read_sentiment(&self.paths.sentiment_path())?;
        let forecast = CsvStorage::read_forecast(&self.paths.forecast_path())?;
        let actual_prices = CsvStorage::read_actual_prices(&self.paths.actual_prices_path())?;

        info!(
            sentiment = sentiment.len(),
            forecast = forecast.len(),
            actual = ?actual_prices.as_ref().map(Vec::len),
            "Dashboard data loaded"
        );

        Ok(DashboardData {
            model,
            sentiment,
            forecast,
            actual_prices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btc_dashboard_core::DashboardError;
    use std::fs;
    use tempfile::TempDir;

    fn fixture_dir(with_actual: bool) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("xgb_model.pkl"), b"\x80\x04K\x01.").unwrap();
        fs::write(
            dir.path().join("bitcoin_100_articles_summary.csv"),
            "title,summary,published_date,sentiment\nA,a,2024-01-01,POSITIVE\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("btc_30_day_forecast.csv"),
            "forecast_date,predicted_price\n2024-01-01,40000\n2024-01-02,40001\n",
        )
        .unwrap();
        if with_actual {
            fs::write(
                dir.path().join("actual_btc_prices_30.csv"),
                "forecast_date,actual_price\n2024-01-01,39990\n",
            )
            .unwrap();
        }
        dir
    }

    fn loader_for(dir: &TempDir) -> DashboardLoader {
        DashboardLoader::new(PathsConfig {
            data_dir: dir.path().to_path_buf(),
            ..PathsConfig::default()
        })
    }

    #[test]
    fn test_load_all_inputs() {
        let dir = fixture_dir(true);
        let data = loader_for(&dir).load().unwrap();

        assert_eq!(data.sentiment.len(), 1);
        assert_eq!(data.forecast.len(), 2);
        assert_eq!(data.actual_prices.map(|a| a.len()), Some(1));
    }

    #[test]
    fn test_load_without_actual_prices() {
        let dir = fixture_dir(false);
        let data = loader_for(&dir).load().unwrap();
        assert!(data.actual_prices.is_none());
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let dir = fixture_dir(true);
        fs::remove_file(dir.path().join("xgb_model.pkl")).unwrap();

        let err = loader_for(&dir).load().unwrap_err();
        assert!(matches!(err, DashboardError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_missing_sentiment_is_fatal() {
        let dir = fixture_dir(true);
        fs::remove_file(dir.path().join("bitcoin_100_articles_summary.csv")).unwrap();

        let err = loader_for(&dir).load().unwrap_err();
        assert!(matches!(err, DashboardError::DatasetNotFound { .. }));
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let dir = fixture_dir(false);
        let loader = loader_for(&dir);
        assert!(loader.load().unwrap().actual_prices.is_none());

        fs::write(
            dir.path().join("actual_btc_prices_30.csv"),
            "forecast_date,actual_price\n2024-01-02,40100\n",
        )
        .unwrap();
        assert!(loader.load().unwrap().actual_prices.is_some());
    }
}
