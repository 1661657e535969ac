//! NASDAQ Trader symbol directory universe.

use crate::dedup_symbols;
use crate::http::{check_status, connection_error, HttpSettings};
use async_trait::async_trait;
use csv::ReaderBuilder;
use reqwest::Client;
use screener_core::error::DataError;
use screener_core::traits::UniverseSource;
use tracing::info;

/// NASDAQ-listed securities directory.
pub const NASDAQ_LISTED_URL: &str =
    "https://www.nasdaqtrader.com/dynamic/SymbolDirectory/nasdaqlisted.txt";

/// NYSE and other exchange listings directory.
pub const OTHER_LISTED_URL: &str =
    "https://www.nasdaqtrader.com/dynamic/SymbolDirectory/otherlisted.txt";

/// Universe of every symbol in the NASDAQ Trader directories.
///
/// NASDAQ listings come first, followed by other-exchange listings, with
/// duplicates removed.
pub struct NasdaqTraderUniverse {
    client: Client,
    nasdaq_url: String,
    other_url: String,
}

impl NasdaqTraderUniverse {
    /// Create a universe over the public directories.
    pub fn new(http: &HttpSettings) -> Result<Self, DataError> {
        Self::with_urls(http, NASDAQ_LISTED_URL, OTHER_LISTED_URL)
    }

    /// Create a universe over custom directory URLs.
    pub fn with_urls(
        http: &HttpSettings,
        nasdaq_url: impl Into<String>,
        other_url: impl Into<String>,
    ) -> Result<Self, DataError> {
        Ok(Self {
            client: http.build_client()?,
            nasdaq_url: nasdaq_url.into(),
            other_url: other_url.into(),
        })
    }

    /// Extract one column of a pipe-delimited directory file.
    ///
    /// The trailing "File Creation Time" row is ignored.
    pub fn parse_directory(text: &str, column: &str) -> Result<Vec<String>, DataError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| DataError::ParseError(e.to_string()))?
            .clone();
        let index = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| DataError::ParseError(format!("missing column '{}'", column)))?;

        let mut symbols = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DataError::ParseError(e.to_string()))?;
            if record
                .get(0)
                .is_some_and(|first| first.starts_with("File Creation Time"))
            {
                continue;
            }
            if let Some(symbol) = record.get(index) {
                symbols.push(symbol.trim().to_string());
            }
        }

        Ok(symbols)
    }

    async fn fetch(&self, url: &str) -> Result<String, DataError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(connection_error)?;
        let resp = check_status(resp, url).await?;
        resp.text().await.map_err(connection_error)
    }
}

#[async_trait]
impl UniverseSource for NasdaqTraderUniverse {
    async fn list_universe(&self) -> Result<Vec<String>, DataError> {
        let nasdaq = self.fetch(&self.nasdaq_url).await?;
        let other = self.fetch(&self.other_url).await?;

        let mut symbols = Self::parse_directory(&nasdaq, "Symbol")?;
        symbols.extend(Self::parse_directory(&other, "ACT Symbol")?);

        let symbols = dedup_symbols(symbols);
        info!(count = symbols.len(), "Loaded NASDAQ Trader universe");
        Ok(symbols)
    }

    fn name(&self) -> &str {
        "nasdaqtrader"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const NASDAQ: &str = "\
Symbol|Security Name|Market Category|Test Issue|Financial Status|Round Lot Size|ETF|NextShares
AACG|ATA Creativity Global|G|N|D|100|N|N
AAPL|Apple Inc.|Q|N|N|100|N|N
File Creation Time: 0101202400:00|||||||
";

    const OTHER: &str = "\
ACT Symbol|Security Name|Exchange|CQS Symbol|ETF|Round Lot Size|Test Issue|NASDAQ Symbol
A|Agilent Technologies|N|A|N|100|N|A
AAPL|Apple Inc.|N|AAPL|N|100|N|AAPL
File Creation Time: 0101202400:00|||||||
";

    #[test]
    fn test_parse_directory() {
        let symbols = NasdaqTraderUniverse::parse_directory(NASDAQ, "Symbol").unwrap();
        assert_eq!(symbols, vec!["AACG", "AAPL"]);
    }

    #[test]
    fn test_parse_directory_missing_column() {
        assert!(NasdaqTraderUniverse::parse_directory(NASDAQ, "ACT Symbol").is_err());
    }

    #[tokio::test]
    async fn test_list_universe_concatenates_and_dedups() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nasdaqlisted.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string(NASDAQ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/otherlisted.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string(OTHER))
            .mount(&server)
            .await;

        let universe = NasdaqTraderUniverse::with_urls(
            &HttpSettings::default(),
            format!("{}/nasdaqlisted.txt", server.uri()),
            format!("{}/otherlisted.txt", server.uri()),
        )
        .unwrap();

        let symbols = universe.list_universe().await.unwrap();
        assert_eq!(symbols, vec!["AACG", "AAPL", "A"]);
    }

    #[tokio::test]
    async fn test_unreachable_directory_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let universe = NasdaqTraderUniverse::with_urls(
            &HttpSettings::default(),
            format!("{}/nasdaqlisted.txt", server.uri()),
            format!("{}/otherlisted.txt", server.uri()),
        )
        .unwrap();

        assert!(matches!(
            universe.list_universe().await,
            Err(DataError::ApiError(_))
        ));
    }
}
