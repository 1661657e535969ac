//! Ticker universe read from a local file.

use crate::dedup_symbols;
use async_trait::async_trait;
use screener_core::error::DataError;
use screener_core::traits::UniverseSource;
use std::path::PathBuf;

/// One symbol per line; the first comma, pipe or whitespace separated field
/// of each line is used.
///
/// Blank lines, `#` comments and a `Symbol`/`Ticker` header are skipped.
pub struct FileUniverse {
    path: PathBuf,
}

impl FileUniverse {
    /// Create a universe backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse symbols out of file contents.
    pub fn parse(contents: &str) -> Vec<String> {
        let symbols = contents.lines().filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let field = line
                .split(|c: char| c == ',' || c == '|' || c.is_whitespace())
                .next()?
                .trim();
            if field.eq_ignore_ascii_case("symbol") || field.eq_ignore_ascii_case("ticker") {
                return None;
            }
            Some(field.to_uppercase())
        });
        dedup_symbols(symbols)
    }
}

#[async_trait]
impl UniverseSource for FileUniverse {
    async fn list_universe(&self) -> Result<Vec<String>, DataError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DataError::Configuration(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(Self::parse(&contents))
    }

    fn name(&self) -> &str {
        "file"
    }
}
