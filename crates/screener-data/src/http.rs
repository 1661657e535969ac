//! Shared HTTP plumbing for the online providers.

use reqwest::{header, Client, ClientBuilder, Response, StatusCode};
use screener_core::error::DataError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client settings shared by the online providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header; some providers reject requests without one
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; penny-screener/0.1)".to_string(),
        }
    }
}

impl HttpSettings {
    /// Client builder with the user agent and timeout applied.
    pub(crate) fn client_builder(&self) -> Result<ClientBuilder, DataError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&self.user_agent)
                .map_err(|e| DataError::Configuration(e.to_string()))?,
        );

        Ok(Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(self.timeout_secs)))
    }

    /// Build a client with these settings.
    pub fn build_client(&self) -> Result<Client, DataError> {
        self.client_builder()?.build().map_err(connection_error)
    }
}

/// Map a non-success response onto a [`DataError`].
pub(crate) async fn check_status(resp: Response, symbol: &str) -> Result<Response, DataError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(DataError::SymbolNotFound(symbol.to_string()));
    }
    let text = resp.text().await.unwrap_or_default();
    Err(DataError::ApiError(format!("{}: {}", status, text)))
}

pub(crate) fn connection_error(e: reqwest::Error) -> DataError {
    DataError::ConnectionError(e.to_string())
}

pub(crate) fn decode_error(e: reqwest::Error) -> DataError {
    DataError::ParseError(e.to_string())
}
