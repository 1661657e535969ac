//! Yahoo Finance price history and earnings calendar.

use crate::http::{check_status, connection_error, decode_error, HttpSettings};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use reqwest::header::REFERER;
use reqwest::{Client, Response, StatusCode};
use screener_core::error::DataError;
use screener_core::traits::{BarSource, EarningsSource};
use screener_core::types::{Bar, Lookback};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Public Yahoo Finance query host.
pub const YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Page that hands out the Yahoo session cookie.
pub const YAHOO_SESSION_URL: &str = "https://fc.yahoo.com";

const YAHOO_REFERER: &str = "https://finance.yahoo.com/";

/// How long a crumb is reused before a new session is fetched.
const CRUMB_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummaryEnvelope,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    calendar_events: Option<CalendarEvents>,
}

#[derive(Debug, Deserialize)]
struct CalendarEvents {
    earnings: Option<EarningsEvents>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EarningsEvents {
    #[serde(default)]
    earnings_date: Vec<RawTimestamp>,
}

#[derive(Debug, Deserialize)]
struct RawTimestamp {
    raw: i64,
}

fn yahoo_error(symbol: &str, error: YahooError) -> DataError {
    if error.code.eq_ignore_ascii_case("not found") {
        DataError::SymbolNotFound(symbol.to_string())
    } else {
        DataError::ApiError(format!(
            "{}: {}",
            error.code,
            error.description.unwrap_or_default()
        ))
    }
}

/// Crumb token bound to the session cookie held by the client's jar.
#[derive(Debug, Clone)]
struct Crumb {
    value: String,
    fetched: Instant,
}

/// Cookie and crumb handshake required by the quoteSummary endpoint.
///
/// The session cookie comes from [`YAHOO_SESSION_URL`] and lives in the
/// client's cookie store; the crumb is fetched once and reused until it
/// expires or Yahoo rejects it.
#[derive(Debug)]
struct YahooSession {
    session_url: String,
    crumb_url: String,
    crumb: Mutex<Option<Crumb>>,
}

impl YahooSession {
    fn new(session_url: String, base_url: &str) -> Self {
        Self {
            session_url,
            crumb_url: format!("{}/v1/test/getcrumb", base_url),
            crumb: Mutex::new(None),
        }
    }

    /// Current crumb, starting a new session when none is cached.
    async fn crumb(&self, client: &Client) -> Result<String, DataError> {
        let mut cached = self.crumb.lock().await;
        if let Some(crumb) = cached.as_ref().filter(|c| c.fetched.elapsed() < CRUMB_TTL) {
            return Ok(crumb.value.clone());
        }

        let value = self.fetch(client).await?;
        *cached = Some(Crumb {
            value: value.clone(),
            fetched: Instant::now(),
        });
        Ok(value)
    }

    /// Drop the cached crumb if it is still the rejected one.
    async fn invalidate(&self, rejected: &str) {
        let mut cached = self.crumb.lock().await;
        if cached.as_ref().is_some_and(|c| c.value == rejected) {
            *cached = None;
        }
    }

    async fn fetch(&self, client: &Client) -> Result<String, DataError> {
        // Only the Set-Cookie header matters; the page itself answers 404
        client
            .get(&self.session_url)
            .header(REFERER, YAHOO_REFERER)
            .send()
            .await
            .map_err(connection_error)?;

        let resp = client
            .get(&self.crumb_url)
            .header(REFERER, YAHOO_REFERER)
            .send()
            .await
            .map_err(connection_error)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::ApiError(format!("crumb request failed: {}", status)));
        }

        let body = resp.text().await.map_err(decode_error)?;
        let crumb = parse_crumb(&body)?;
        debug!("Started Yahoo session");
        Ok(crumb)
    }
}

/// A crumb is a short opaque token; anything else is an error page.
fn parse_crumb(body: &str) -> Result<String, DataError> {
    let crumb = body.trim();
    if crumb.is_empty() || crumb.len() >= 100 || crumb.contains(char::is_whitespace) || crumb.contains('<') {
        let preview: String = crumb.chars().take(40).collect();
        return Err(DataError::ApiError(format!("unexpected crumb response: {}", preview)));
    }
    Ok(crumb.to_string())
}

/// Yahoo Finance client for daily bars and earnings dates.
///
/// Earnings dates are reported in the local timezone, the same calendar the
/// screening pipeline uses for today.
pub struct YahooFinance {
    client: Client,
    base_url: String,
    session: YahooSession,
}

impl YahooFinance {
    /// Create a client against the public Yahoo host.
    pub fn new(http: &HttpSettings) -> Result<Self, DataError> {
        Self::with_base_url(http, YAHOO_BASE_URL)
    }

    /// Create a client against a custom host.
    pub fn with_base_url(http: &HttpSettings, base_url: impl Into<String>) -> Result<Self, DataError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = http
            .client_builder()?
            .cookie_store(true)
            .build()
            .map_err(connection_error)?;

        Ok(Self {
            client,
            session: YahooSession::new(YAHOO_SESSION_URL.to_string(), &base_url),
            base_url,
        })
    }

    /// Fetch the session cookie from a different page.
    pub fn with_session_url(mut self, session_url: impl Into<String>) -> Self {
        self.session.session_url = session_url.into();
        self
    }

    async fn quote_summary(&self, ticker: &str, crumb: &str) -> Result<Response, DataError> {
        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, ticker);
        self.client
            .get(&url)
            .header(REFERER, YAHOO_REFERER)
            .query(&[("modules", "calendarEvents"), ("crumb", crumb)])
            .send()
            .await
            .map_err(connection_error)
    }

    /// Convert a chart payload into bars, dropping sessions with missing fields.
    fn parse_chart(symbol: &str, body: ChartResponse) -> Result<Vec<Bar>, DataError> {
        if let Some(error) = body.chart.error {
            return Err(yahoo_error(symbol, error));
        }

        let Some(result) = body.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(vec![]);
        };
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        let bars = result
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                Some(Bar::new(
                    ts * 1000,
                    (*quote.open.get(i)?)?,
                    (*quote.high.get(i)?)?,
                    (*quote.low.get(i)?)?,
                    (*quote.close.get(i)?)?,
                    (*quote.volume.get(i)?)?,
                ))
            })
            .collect();

        Ok(bars)
    }

    /// Earliest published earnings date, as a calendar day in `tz`. Yahoo
    /// publishes either a single date or a start/end estimate range.
    fn parse_earnings<Tz: TimeZone>(
        symbol: &str,
        body: QuoteSummaryResponse,
        tz: &Tz,
    ) -> Result<Option<NaiveDate>, DataError> {
        if let Some(error) = body.quote_summary.error {
            return Err(yahoo_error(symbol, error));
        }

        let date = body
            .quote_summary
            .result
            .and_then(|r| r.into_iter().next())
            .and_then(|r| r.calendar_events)
            .and_then(|c| c.earnings)
            .and_then(|e| e.earnings_date.into_iter().map(|d| d.raw).min())
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.with_timezone(tz).date_naive());

        Ok(date)
    }
}

#[async_trait]
impl BarSource for YahooFinance {
    async fn daily_bars(&self, ticker: &str, lookback: Lookback) -> Result<Vec<Bar>, DataError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
        let range = lookback.to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[("range", range.as_str()), ("interval", "1d")])
            .send()
            .await
            .map_err(connection_error)?;
        let resp = check_status(resp, ticker).await?;

        let body: ChartResponse = resp.json().await.map_err(decode_error)?;
        let bars = Self::parse_chart(ticker, body)?;
        debug!(ticker, %lookback, bars = bars.len(), "Fetched daily bars");
        Ok(bars)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

#[async_trait]
impl EarningsSource for YahooFinance {
    async fn next_earnings_date(&self, ticker: &str) -> Result<Option<NaiveDate>, DataError> {
        let crumb = self.session.crumb(&self.client).await?;
        let mut resp = self.quote_summary(ticker, &crumb).await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            debug!(ticker, "Yahoo rejected the crumb, starting a new session");
            self.session.invalidate(&crumb).await;
            let crumb = self.session.crumb(&self.client).await?;
            resp = self.quote_summary(ticker, &crumb).await?;
        }
        let resp = check_status(resp, ticker).await?;

        let body: QuoteSummaryResponse = resp.json().await.map_err(decode_error)?;
        Self::parse_earnings(ticker, body, &Local)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}
