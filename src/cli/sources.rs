//! Collaborator construction from configuration.

use anyhow::{Context, Result};
use screener_config::{AppConfig, BarProvider, UniverseProvider};
use screener_core::traits::{BarSource, EarningsSource, NewsSource, UniverseSource};
use screener_data::{
    CachedBarSource, CachedUniverse, CsvBarSource, FileUniverse, NasdaqTraderUniverse,
    NewsDataConfig, NewsDataSource, YahooFinance,
};
use screener_scan::ScreeningPipeline;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::SourceArgs;

/// Apply command-line source overrides to the provider settings.
pub fn apply_overrides(config: &mut AppConfig, sources: &SourceArgs) {
    if let Some(dir) = &sources.data_dir {
        config.providers.bars = BarProvider::Csv;
        config.providers.data_dir = Some(dir.display().to_string());
    }
    if let Some(file) = &sources.universe_file {
        config.providers.universe = UniverseProvider::File;
        config.providers.universe_file = Some(file.display().to_string());
    }
}

fn cache_ttl(config: &AppConfig) -> Option<Duration> {
    match config.providers.cache_ttl_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}

pub fn universe(config: &AppConfig) -> Result<Arc<dyn UniverseSource>> {
    let providers = &config.providers;
    let ttl = cache_ttl(config);

    let source: Arc<dyn UniverseSource> = match providers.universe {
        UniverseProvider::Nasdaq => {
            let nasdaq = NasdaqTraderUniverse::with_urls(
                &providers.http,
                providers.nasdaq_listed_url.clone(),
                providers.other_listed_url.clone(),
            )?;
            match ttl {
                Some(ttl) => Arc::new(CachedUniverse::new(nasdaq, ttl)),
                None => Arc::new(nasdaq),
            }
        }
        UniverseProvider::File => {
            let path = providers
                .universe_file
                .as_deref()
                .context("providers.universe_file is not set")?;
            Arc::new(FileUniverse::new(path))
        }
    };

    Ok(source)
}

pub fn bars(config: &AppConfig) -> Result<Arc<dyn BarSource>> {
    let providers = &config.providers;
    let ttl = cache_ttl(config);

    let source: Arc<dyn BarSource> = match providers.bars {
        BarProvider::Yahoo => {
            let yahoo = YahooFinance::with_base_url(&providers.http, providers.yahoo_base_url.clone())?;
            match ttl {
                Some(ttl) => Arc::new(CachedBarSource::new(yahoo, ttl)),
                None => Arc::new(yahoo),
            }
        }
        BarProvider::Csv => {
            let dir = providers
                .data_dir
                .as_deref()
                .context("providers.data_dir is not set")?;
            Arc::new(CsvBarSource::new(dir)?)
        }
    };

    Ok(source)
}

/// Earnings calendar, available only with the online providers.
pub fn earnings(config: &AppConfig) -> Result<Option<Arc<dyn EarningsSource>>> {
    if config.providers.bars != BarProvider::Yahoo {
        info!("Earnings check unavailable with offline bar data");
        return Ok(None);
    }
    let yahoo = YahooFinance::with_base_url(
        &config.providers.http,
        config.providers.yahoo_base_url.clone(),
    )?
    .with_session_url(config.providers.yahoo_session_url.clone());
    Ok(Some(Arc::new(yahoo)))
}

/// News search, available when an API key is present.
pub fn news(config: &AppConfig) -> Result<Option<Arc<dyn NewsSource>>> {
    let var = &config.providers.news_api_key_env;
    match NewsDataConfig::from_env(var) {
        Ok(news_config) => {
            let news_config = news_config.with_base_url(config.providers.newsdata_base_url.clone());
            let source = NewsDataSource::new(news_config, &config.providers.http)?;
            Ok(Some(Arc::new(source)))
        }
        Err(e) => {
            warn!(error = %e, "News catalyst check disabled");
            Ok(None)
        }
    }
}

/// Build a pipeline with every collaborator the configuration enables.
pub fn pipeline(config: &AppConfig) -> Result<ScreeningPipeline> {
    let mut pipeline = ScreeningPipeline::new(config.screener.clone(), universe(config)?, bars(config)?)
        .context("Invalid screener configuration")?;

    if config.screener.enable_earnings_check {
        if let Some(source) = earnings(config)? {
            pipeline = pipeline.with_earnings(source);
        }
    }
    if config.screener.enable_news_check {
        if let Some(source) = news(config)? {
            pipeline = pipeline.with_news(source);
        }
    }

    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_source_overrides() {
        let mut config = AppConfig::default();
        let sources = SourceArgs {
            data_dir: Some(PathBuf::from("data")),
            universe_file: Some(PathBuf::from("tickers.txt")),
        };

        apply_overrides(&mut config, &sources);

        assert_eq!(config.providers.bars, BarProvider::Csv);
        assert_eq!(config.providers.data_dir.as_deref(), Some("data"));
        assert_eq!(config.providers.universe, UniverseProvider::File);
        assert_eq!(config.providers.universe_file.as_deref(), Some("tickers.txt"));
    }

    #[test]
    fn test_offline_sources_have_no_earnings() {
        let mut config = AppConfig::default();
        config.providers.bars = BarProvider::Csv;
        assert!(earnings(&config).unwrap().is_none());
    }

    #[test]
    fn test_missing_data_dir() {
        let mut config = AppConfig::default();
        config.providers.bars = BarProvider::Csv;
        config.providers.data_dir = Some("/no/such/bars".to_string());
        assert!(bars(&config).is_err());
    }
}
