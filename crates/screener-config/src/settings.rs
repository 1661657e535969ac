//! Configuration structures.

use screener_data::{
    HttpSettings, NASDAQ_LISTED_URL, NEWSDATA_BASE_URL, OTHER_LISTED_URL, YAHOO_BASE_URL,
    YAHOO_SESSION_URL,
};
use screener_scan::ScreenerConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub screener: ScreenerConfig,
    #[serde(default)]
    pub providers: ProviderSettings,
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "penny-screener".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Daily-rolling log file, in addition to the console
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Where the ticker universe comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UniverseProvider {
    /// NASDAQ Trader symbol directories
    #[default]
    Nasdaq,
    /// Local symbol list
    File,
}

/// Where daily bars come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BarProvider {
    /// Yahoo Finance chart API
    #[default]
    Yahoo,
    /// Directory of per-symbol CSV files
    Csv,
}

/// Data provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub universe: UniverseProvider,
    /// Symbol list read by the `file` universe
    pub universe_file: Option<String>,
    pub bars: BarProvider,
    /// CSV directory read by the `csv` bar source
    pub data_dir: Option<String>,
    /// Environment variable holding the NewsData.io API key
    pub news_api_key_env: String,
    pub nasdaq_listed_url: String,
    pub other_listed_url: String,
    pub yahoo_base_url: String,
    /// Page that sets the Yahoo session cookie the earnings lookup needs
    pub yahoo_session_url: String,
    pub newsdata_base_url: String,
    /// Lifetime of cached universe and bar responses; 0 disables caching
    pub cache_ttl_secs: u64,
    pub http: HttpSettings,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            universe: UniverseProvider::Nasdaq,
            universe_file: None,
            bars: BarProvider::Yahoo,
            data_dir: None,
            news_api_key_env: "NEWSDATA_API_KEY".to_string(),
            nasdaq_listed_url: NASDAQ_LISTED_URL.to_string(),
            other_listed_url: OTHER_LISTED_URL.to_string(),
            yahoo_base_url: YAHOO_BASE_URL.to_string(),
            yahoo_session_url: YAHOO_SESSION_URL.to_string(),
            newsdata_base_url: NEWSDATA_BASE_URL.to_string(),
            cache_ttl_secs: 3600,
            http: HttpSettings::default(),
        }
    }
}
