//! CSV export of scan candidates.

use crate::scorer::ScoredCandidate;
use screener_core::error::{ScreenerError, ScreenerResult};
use std::io::Write;
use std::path::Path;

const BASE_COLUMNS: [&str; 7] = ["Ticker", "Price", "RSI", "MACD>Signal", "ADX", "Volume", "Score"];
const CATALYST_COLUMNS: [&str; 4] = ["EarningsSoon", "EarningsDate", "NewsCatalyst", "Headline"];

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn csv_error(e: csv::Error) -> ScreenerError {
    ScreenerError::Serialization(e.to_string())
}

/// Write candidates as CSV, one row each in the given order.
///
/// The catalyst columns are appended when `include_catalysts` is set.
pub fn write_csv<W: Write>(
    candidates: &[ScoredCandidate],
    include_catalysts: bool,
    writer: W,
) -> ScreenerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = BASE_COLUMNS.to_vec();
    if include_catalysts {
        header.extend(CATALYST_COLUMNS);
    }
    wtr.write_record(&header).map_err(csv_error)?;

    for c in candidates {
        let mut row = vec![
            c.ticker.clone(),
            c.price.to_string(),
            round2(c.indicators.rsi).to_string(),
            flag(c.indicators.macd_above_signal()).to_string(),
            round2(c.indicators.adx).to_string(),
            (c.indicators.latest_volume as i64).to_string(),
            c.score.to_string(),
        ];
        if include_catalysts {
            row.push(flag(c.catalyst.earnings_soon).to_string());
            row.push(
                c.catalyst
                    .earnings_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            );
            row.push(flag(c.catalyst.news_catalyst).to_string());
            row.push(c.catalyst.headline.clone().unwrap_or_default());
        }
        wtr.write_record(&row).map_err(csv_error)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write candidates to a CSV file at `path`.
pub fn export_csv(
    candidates: &[ScoredCandidate],
    include_catalysts: bool,
    path: &Path,
) -> ScreenerResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv(candidates, include_catalysts, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalyst::CatalystInfo;
    use chrono::NaiveDate;
    use screener_indicators::IndicatorSnapshot;

    fn candidate() -> ScoredCandidate {
        ScoredCandidate {
            ticker: "ABCD".to_string(),
            price: 1.25,
            indicators: IndicatorSnapshot {
                rsi: 31.4159,
                macd: 0.02,
                macd_signal: 0.01,
                adx: 27.0061,
                latest_volume: 250_000.9,
                average_volume: 100_000.0,
            },
            catalyst: CatalystInfo {
                earnings_soon: true,
                earnings_date: NaiveDate::from_ymd_opt(2024, 3, 5),
                news_catalyst: true,
                headline: Some("FDA approval, pending review".to_string()),
            },
            score: 4,
        }
    }

    fn render(include_catalysts: bool) -> String {
        let mut out = Vec::new();
        write_csv(&[candidate()], include_catalysts, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_base_columns() {
        let csv = render(false);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Ticker,Price,RSI,MACD>Signal,ADX,Volume,Score")
        );
        assert_eq!(lines.next(), Some("ABCD,1.25,31.42,True,27.01,250000,4"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_catalyst_columns() {
        let csv = render(true);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Ticker,Price,RSI,MACD>Signal,ADX,Volume,Score,EarningsSoon,EarningsDate,NewsCatalyst,Headline")
        );
        assert_eq!(
            lines.next(),
            Some("ABCD,1.25,31.42,True,27.01,250000,4,True,2024-03-05,True,\"FDA approval, pending review\"")
        );
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut out = Vec::new();
        write_csv(&[], false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Ticker,Price,RSI,MACD>Signal,ADX,Volume,Score\n"
        );
    }
}
