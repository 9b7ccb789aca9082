use btc_dashboard_core::{
    ActualPriceRecord, DashboardError, ForecastRecord, Result, SentimentLabel, SentimentRecord,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

const SENTIMENT_COLUMNS: [&str; 4] = ["title", "summary", "published_date", "sentiment"];
const FORECAST_COLUMNS: [&str; 2] = ["forecast_date", "predicted_price"];
const ACTUAL_COLUMNS: [&str; 2] = ["forecast_date", "actual_price"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Debug, Deserialize)]
struct SentimentRow {
    title: String,
    summary: String,
    published_date: String,
    sentiment: String,
}

#[derive(Debug, Deserialize)]
struct ForecastRow {
    forecast_date: String,
    predicted_price: f64,
}

#[derive(Debug, Deserialize)]
struct ActualPriceRow {
    forecast_date: String,
    actual_price: f64,
}

pub struct CsvStorage;

impl CsvStorage {
    /// Reads the news sentiment table.
    ///
    /// Format: title,summary,published_date,sentiment (any column order,
    /// extra columns ignored)
    ///
    /// # Errors
    /// Returns `DatasetNotFound` if the file is absent, `DatasetMalformed` if a
    /// column is missing or a date cannot be parsed
    pub fn read_sentiment(path: &Path) -> Result<Vec<SentimentRecord>> {
        let records = read_table(path, &SENTIMENT_COLUMNS, |row: usize, raw: SentimentRow| {
            Ok(SentimentRecord {
                published_date: date_field(path, row, "published_date", &raw.published_date)?,
                title: raw.title,
                summary: raw.summary,
                sentiment: SentimentLabel::parse(&raw.sentiment),
            })
        })?;

        info!("Loaded {} sentiment records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Reads the price forecast table.
    ///
    /// Format: forecast_date,predicted_price
    ///
    /// # Errors
    /// Returns `DatasetNotFound` if the file is absent, `DatasetMalformed` if a
    /// column is missing or a date or price cannot be parsed
    pub fn read_forecast(path: &Path) -> Result<Vec<ForecastRecord>> {
        let records = read_table(path, &FORECAST_COLUMNS, |row: usize, raw: ForecastRow| {
            Ok(ForecastRecord {
                forecast_date: date_field(path, row, "forecast_date", &raw.forecast_date)?,
                predicted_price: raw.predicted_price,
            })
        })?;

        info!("Loaded {} forecast records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Reads the optional actual price table.
    ///
    /// Format: forecast_date,actual_price
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    /// Returns `DatasetMalformed` if the file exists but a column is missing or
    /// a value cannot be parsed
    pub fn read_actual_prices(path: &Path) -> Result<Option<Vec<ActualPriceRecord>>> {
        let result = read_table(path, &ACTUAL_COLUMNS, |row: usize, raw: ActualPriceRow| {
            Ok(ActualPriceRecord {
                forecast_date: date_field(path, row, "forecast_date", &raw.forecast_date)?,
                actual_price: raw.actual_price,
            })
        });

        match result {
            Ok(records) => {
                info!("Loaded {} actual price records from {}", records.len(), path.display());
                Ok(Some(records))
            }
            Err(DashboardError::DatasetNotFound { .. }) => {
                info!("No actual price file at {}, comparison disabled", path.display());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Parses a date cell. Timestamps are truncated to their calendar day.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|timestamp| timestamp.date())
}

fn date_field(path: &Path, row: usize, column: &str, raw: &str) -> Result<NaiveDate> {
    parse_date(raw).ok_or_else(|| {
        DashboardError::malformed(path, format!("row {row}: unparseable {column} {raw:?}"))
    })
}

fn read_table<R, T, F>(path: &Path, required: &[&str], mut convert: F) -> Result<Vec<T>>
where
    R: DeserializeOwned,
    F: FnMut(usize, R) -> Result<T>,
{
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DashboardError::DatasetNotFound {
            path: path.to_path_buf(),
        },
        _ => DashboardError::Io(e),
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DashboardError::malformed(path, format!("unreadable header: {e}")))?
        .clone();
    if let Some(missing) = required
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(DashboardError::malformed(
            path,
            format!("missing column `{missing}`"),
        ));
    }

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<R>().enumerate() {
        let row_number = index + 1;
        let raw = row
            .map_err(|e| DashboardError::malformed(path, format!("row {row_number}: {e}")))?;
        records.push(convert(row_number, raw)?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_variants() {
        assert_eq!(parse_date("2024-01-15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date(" 2024-01-15 "), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15 23:59:59"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T08:00:00"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T08:00:00Z"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15 08:00:00.250"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("15/01/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_read_sentiment() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "sentiment.csv",
            "title,summary,published_date,sentiment\n\
             \"BTC rallies, again\",Price up.,2024-01-02,POSITIVE\n\
             Regulator warns,Fines ahead.,2024-01-01,NEGATIVE\n\
             Odd one,Unclear.,2024-01-01,MIXED\n",
        );

        let records = CsvStorage::read_sentiment(&path).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "BTC rallies, again");
        assert_eq!(records[0].published_date, date(2024, 1, 2));
        assert_eq!(records[0].sentiment, SentimentLabel::Positive);
        assert_eq!(records[2].sentiment, SentimentLabel::Unrecognized("MIXED".to_string()));
    }

    #[test]
    fn test_columns_may_be_reordered_and_extra() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "forecast.csv",
            "model_version,predicted_price,forecast_date\nv3,40014.5,2024-01-15\n",
        );

        let records = CsvStorage::read_forecast(&path).unwrap();
        assert_eq!(
            records,
            vec![ForecastRecord {
                forecast_date: date(2024, 1, 15),
                predicted_price: 40014.5,
            }]
        );
    }

    #[test]
    fn test_padded_headers_and_cells_are_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "forecast.csv",
            "forecast_date, predicted_price
2024-01-15, 40000
 2024-01-16 ,40100.5 
",
        );

        let records = CsvStorage::read_forecast(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].predicted_price, 40000.0);
        assert_eq!(records[1].forecast_date, date(2024, 1, 16));
        assert_eq!(records[1].predicted_price, 40100.5);
    }

    #[test]
    fn test_forecast_prices_are_exact() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "forecast.csv",
            "forecast_date,predicted_price\n2024-01-01,45231.07\n2024-01-02,0.1\n",
        );

        let records = CsvStorage::read_forecast(&path).unwrap();
        assert_eq!(records[0].predicted_price, 45231.07);
        assert_eq!(records[1].predicted_price, 0.1);
    }

    #[test]
    fn test_missing_required_file() {
        let dir = TempDir::new().unwrap();
        let err = CsvStorage::read_forecast(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::DatasetNotFound { .. }));
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "sentiment.csv", "title,summary,sentiment\na,b,POSITIVE\n");

        let err = CsvStorage::read_sentiment(&path).unwrap_err();
        match err {
            DashboardError::DatasetMalformed { reason, .. } => {
                assert_eq!(reason, "missing column `published_date`");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparseable_date_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "forecast.csv",
            "forecast_date,predicted_price\n2024-01-01,1.0\nnext tuesday,2.0\n",
        );

        let err = CsvStorage::read_forecast(&path).unwrap_err();
        match err {
            DashboardError::DatasetMalformed { reason, .. } => {
                assert_eq!(reason, "row 2: unparseable forecast_date \"next tuesday\"");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparseable_price_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "forecast.csv", "forecast_date,predicted_price\n2024-01-01,lots\n");

        let err = CsvStorage::read_forecast(&path).unwrap_err();
        assert!(matches!(err, DashboardError::DatasetMalformed { .. }));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_actual_prices_absent_is_none() {
        let dir = TempDir::new().unwrap();
        let actual = CsvStorage::read_actual_prices(&dir.path().join("actual.csv")).unwrap();
        assert!(actual.is_none());
    }

    #[test]
    fn test_actual_prices_present() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "actual.csv",
            "forecast_date,actual_price\n2024-01-01 00:00:00,39950.25\n",
        );

        let actual = CsvStorage::read_actual_prices(&path).unwrap().unwrap();
        assert_eq!(
            actual,
            vec![ActualPriceRecord {
                forecast_date: date(2024, 1, 1),
                actual_price: 39950.25,
            }]
        );
    }

    #[test]
    fn test_malformed_actual_prices_are_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "actual.csv", "date,price\n2024-01-01,1.0\n");

        let err = CsvStorage::read_actual_prices(&path).unwrap_err();
        assert!(matches!(err, DashboardError::DatasetMalformed { .. }));
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "sentiment.csv", "title,summary,published_date,sentiment\n");
        assert!(CsvStorage::read_sentiment(&path).unwrap().is_empty());
    }
}
