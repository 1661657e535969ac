//! Lookback windows for daily bar requests.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How far back a daily bar request reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Lookback {
    /// Most recent trading day
    #[serde(rename = "1d")]
    OneDay,
    /// Five calendar days
    #[serde(rename = "5d")]
    FiveDays,
    /// One month
    #[serde(rename = "1mo")]
    OneMonth,
    /// Three months
    #[serde(rename = "3mo")]
    ThreeMonths,
    /// Six months
    #[serde(rename = "6mo")]
    #[default]
    SixMonths,
    /// One year
    #[serde(rename = "1y")]
    OneYear,
}

impl Lookback {
    /// Calendar span covered by the lookback.
    pub fn as_duration(&self) -> Duration {
        match self {
            Lookback::OneDay => Duration::days(1),
            Lookback::FiveDays => Duration::days(5),
            Lookback::OneMonth => Duration::days(30),
            Lookback::ThreeMonths => Duration::days(91),
            Lookback::SixMonths => Duration::days(182),
            Lookback::OneYear => Duration::days(365),
        }
    }

    /// Get all available lookbacks.
    pub fn all() -> &'static [Lookback] {
        &[
            Lookback::OneDay,
            Lookback::FiveDays,
            Lookback::OneMonth,
            Lookback::ThreeMonths,
            Lookback::SixMonths,
            Lookback::OneYear,
        ]
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Lookback::OneDay => "1d",
            Lookback::FiveDays => "5d",
            Lookback::OneMonth => "1mo",
            Lookback::ThreeMonths => "3mo",
            Lookback::SixMonths => "6mo",
            Lookback::OneYear => "1y",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Lookback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1d" | "day" => Ok(Lookback::OneDay),
            "5d" => Ok(Lookback::FiveDays),
            "1mo" | "month" => Ok(Lookback::OneMonth),
            "3mo" => Ok(Lookback::ThreeMonths),
            "6mo" => Ok(Lookback::SixMonths),
            "1y" | "year" => Ok(Lookback::OneYear),
            _ => Err(format!("Invalid lookback: {}", s)),
        }
    }
}
