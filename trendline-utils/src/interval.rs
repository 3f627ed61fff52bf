use crate::{Error, Result};
use serde_derive::*;
use std::fmt;
use std::str::FromStr;

/// Candle width of a series.
///
/// 1M and 1w are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "3m")]
    M3,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "10m")]
    M10,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h", alias = "60m")]
    H1,
    #[serde(rename = "1d")]
    D1,
}

impl Interval {
    pub fn minutes(self) -> i64 {
        match self {
            Interval::M1 => 1,
            Interval::M3 => 3,
            Interval::M5 => 5,
            Interval::M10 => 10,
            Interval::M15 => 15,
            Interval::M30 => 30,
            Interval::H1 => 60,
            Interval::D1 => 60 * 24,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M3 => "3m",
            Interval::M5 => "5m",
            Interval::M10 => "10m",
            Interval::M15 => "15m",
            Interval::M30 => "30m",
            Interval::H1 => "1h",
            Interval::D1 => "1d",
        }
    }

    pub fn all() -> [Interval; 8] {
        [
            Interval::M1,
            Interval::M3,
            Interval::M5,
            Interval::M10,
            Interval::M15,
            Interval::M30,
            Interval::H1,
            Interval::D1,
        ]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1m" => Ok(Interval::M1),
            "3m" => Ok(Interval::M3),
            "5m" => Ok(Interval::M5),
            "10m" => Ok(Interval::M10),
            "15m" => Ok(Interval::M15),
            "30m" => Ok(Interval::M30),
            "1h" | "60m" => Ok(Interval::H1),
            "1d" => Ok(Interval::D1),
            _ => Err(Error(format!("invalid interval: {}", s))),
        }
    }
}
