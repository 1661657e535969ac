//! CSV data source.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use screener_core::error::DataError;
use screener_core::traits::BarSource;
use screener_core::types::{Bar, Lookback};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// Daily bars read from a directory of per-symbol CSV files.
///
/// A symbol resolves to the first existing file among `{SYMBOL}.csv`,
/// `{symbol}.csv`, `{SYMBOL}_daily.csv` and `{symbol}_daily.csv`.
pub struct CsvBarSource {
    dir: PathBuf,
}

impl CsvBarSource {
    /// Create a new CSV data source over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DataError::Configuration(format!(
                "CSV data directory '{}' does not exist",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    /// Locate the file holding a symbol's bars.
    fn resolve(&self, symbol: &str) -> Option<PathBuf> {
        let lower = symbol.to_lowercase();
        [
            format!("{}.csv", symbol),
            format!("{}.csv", lower),
            format!("{}_daily.csv", symbol),
            format!("{}_daily.csv", lower),
        ]
        .into_iter()
        .map(|name| self.dir.join(name))
        .find(|path| path.is_file())
    }

    /// Parse bars from CSV, oldest first.
    pub fn parse_bars<R: Read>(reader: R) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut bars = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            let timestamp = parse_timestamp(&record.date)?;

            bars.push(Bar::new(
                timestamp,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }

        bars.sort_by_key(|b| b.timestamp);

        Ok(bars)
    }

    async fn load(&self, path: &Path) -> Result<Vec<Bar>, DataError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DataError::Internal(format!("{}: {}", path.display(), e)))?;
        Self::parse_bars(bytes.as_slice())
    }
}

/// Keep the bars within `lookback` of the newest one.
fn trim_to_lookback(bars: Vec<Bar>, lookback: Lookback) -> Vec<Bar> {
    let Some(newest) = bars.last().map(|b| b.timestamp) else {
        return bars;
    };
    let cutoff = newest - lookback.as_duration().num_milliseconds();
    bars.into_iter().filter(|b| b.timestamp > cutoff).collect()
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let formats = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Some(dt) = NaiveDate::parse_from_str(date_str, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    // Unix timestamp, milliseconds if > 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[async_trait]
impl BarSource for CsvBarSource {
    async fn daily_bars(&self, ticker: &str, lookback: Lookback) -> Result<Vec<Bar>, DataError> {
        let path = self
            .resolve(ticker)
            .ok_or_else(|| DataError::SymbolNotFound(ticker.to_string()))?;
        let bars = self.load(&path).await?;
        Ok(trim_to_lookback(bars, lookback))
    }

    fn name(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-03,1.10,1.20,1.00,1.15,120000
2024-01-02,1.00,1.10,0.95,1.05,100000
2024-01-04,1.15,1.30,1.10,1.25,300000
";

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2024-01-15").is_ok());
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert!(parse_timestamp("01/15/2024").is_ok());
        assert_eq!(parse_timestamp("1705312800000").unwrap(), 1705312800000); // Unix ms
        assert_eq!(parse_timestamp("1705312800").unwrap(), 1705312800000); // Unix sec
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_parse_bars_sorted() {
        let bars = CsvBarSource::parse_bars(SAMPLE.as_bytes()).unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].close, 1.05);
        assert_eq!(bars[2].close, 1.25);
        assert_eq!(bars[2].volume, 300000.0);
        // 2024-01-02 00:00 UTC
        assert_eq!(bars[0].timestamp, 1_704_153_600_000);
    }

    #[test]
    fn test_parse_bars_lowercase_headers() {
        let csv = "date,open,high,low,close,volume\n2024-02-01,2,2.5,1.5,2.25,10\n";
        let bars = CsvBarSource::parse_bars(csv.as_bytes()).unwrap();
        assert_eq!(bars[0].close, 2.25);
    }

    #[test]
    fn test_parse_bars_rejects_bad_rows() {
        let csv = "Date,Open,High,Low,Close,Volume\n2024-02-01,x,2.5,1.5,2.25,10\n";
        assert!(matches!(
            CsvBarSource::parse_bars(csv.as_bytes()),
            Err(DataError::ParseError(_))
        ));
    }

    #[test]
    fn test_trim_to_lookback() {
        let day = 86_400_000;
        let bars: Vec<Bar> = (0..10)
            .map(|i| Bar::new(i * day, 1.0, 1.0, 1.0, 1.0, 1.0))
            .collect();

        let trimmed = trim_to_lookback(bars, Lookback::FiveDays);
        assert_eq!(trimmed.len(), 5);
        assert_eq!(trimmed[0].timestamp, 5 * day);
    }

    #[test]
    fn test_missing_directory() {
        assert!(CsvBarSource::new("/definitely/not/a/dir").is_err());
    }
}
