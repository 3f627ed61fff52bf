use crate::{Error, Result};
use chrono::NaiveDateTime;
use derive_more::Display;
use serde_derive::*;
use std::str::FromStr;
use trendline_utils::Interval;

/// Floor of the average candle range, keeps every derived threshold non-zero.
pub const MIN_AVG_CANDLE_RANGE: f64 = 0.01;

/// K线
///
/// One OHLCV bar. `position` is the 0-based index within its series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub position: usize,
    pub ts: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(ts: NaiveDateTime, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Candle {
            position: 0,
            ts,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Validated, immutable candle sequence.
///
/// Price columns and the average candle range are computed once here,
/// every detection run only reads them.
#[derive(Debug, Clone, Serialize)]
pub struct CandlestickSeries {
    candles: Vec<Candle>,
    interval: Interval,
    #[serde(skip)]
    lows: Vec<f64>,
    #[serde(skip)]
    highs: Vec<f64>,
    avg_candle_range: f64,
}

impl CandlestickSeries {
    /// Build a series from candles whose positions are already assigned.
    pub fn new(candles: Vec<Candle>, interval: Interval) -> Result<Self> {
        if candles.len() < 3 {
            return Err(Error::invalid(format!(
                "candlestick series requires at least 3 candles, received {}",
                candles.len()
            )));
        }
        for (i, c) in candles.iter().enumerate() {
            if c.position != i {
                return Err(Error::invalid(format!(
                    "candle at offset {} has position {}",
                    i, c.position
                )));
            }
            let fields = [
                ("open", c.open),
                ("high", c.high),
                ("low", c.low),
                ("close", c.close),
                ("volume", c.volume),
            ];
            if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
                return Err(Error::invalid(format!(
                    "candle {} has non-numeric {}",
                    i, name
                )));
            }
        }
        if let Some(w) = candles.windows(2).find(|w| w[1].ts < w[0].ts) {
            return Err(Error::invalid(format!(
                "timestamps must be monotonic, {} follows {}",
                w[1].ts, w[0].ts
            )));
        }

        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let total: f64 = candles.iter().map(Candle::range).sum();
        let avg_candle_range = (total / candles.len() as f64).max(MIN_AVG_CANDLE_RANGE);
        Ok(CandlestickSeries {
            candles,
            interval,
            lows,
            highs,
            avg_candle_range,
        })
    }

    /// Build a series numbering the candles 0..n-1 in the given order.
    pub fn from_candles(mut candles: Vec<Candle>, interval: Interval) -> Result<Self> {
        for (i, c) in candles.iter_mut().enumerate() {
            c.position = i;
        }
        Self::new(candles, interval)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Always false for a constructed series, kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    #[inline]
    pub fn last_position(&self) -> usize {
        self.candles.len() - 1
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn candle(&self, position: usize) -> Option<&Candle> {
        self.candles.get(position)
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// mean(High - Low), floored at `MIN_AVG_CANDLE_RANGE`
    pub fn avg_candle_range(&self) -> f64 {
        self.avg_candle_range
    }

    pub fn last_close(&self) -> f64 {
        self.candles[self.candles.len() - 1].close
    }

    /// Low column for support, High column for resistance.
    pub fn prices(&self, trend_type: TrendType) -> &[f64] {
        match trend_type {
            TrendType::Support => &self.lows,
            TrendType::Resistance => &self.highs,
        }
    }

    pub fn position_at_or_after(&self, ts: NaiveDateTime) -> Option<usize> {
        self.candles.iter().position(|c| c.ts >= ts)
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendType {
    #[display(fmt = "SUPPORT")]
    Support,
    #[display(fmt = "RESISTANCE")]
    Resistance,
}

impl TrendType {
    /// Prefix of the canonical trendline id.
    pub fn prefix(self) -> &'static str {
        match self {
            TrendType::Support => "S",
            TrendType::Resistance => "R",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrendType::Support => "Support",
            TrendType::Resistance => "Resistance",
        }
    }
}

impl FromStr for TrendType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SUPPORT" => Ok(TrendType::Support),
            "RESISTANCE" => Ok(TrendType::Resistance),
            _ => Err(Error::invalid(format!("invalid trend type: {}", s))),
        }
    }
}

/// Trend types requested from a detection run.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendSelection {
    #[display(fmt = "SUPPORT")]
    Support,
    #[display(fmt = "RESISTANCE")]
    Resistance,
    #[display(fmt = "BOTH")]
    Both,
}

impl TrendSelection {
    /// Support is always processed before resistance.
    pub fn trend_types(self) -> Vec<TrendType> {
        match self {
            TrendSelection::Support => vec![TrendType::Support],
            TrendSelection::Resistance => vec![TrendType::Resistance],
            TrendSelection::Both => vec![TrendType::Support, TrendType::Resistance],
        }
    }
}

impl FromStr for TrendSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SUPPORT" => Ok(TrendSelection::Support),
            "RESISTANCE" => Ok(TrendSelection::Resistance),
            "BOTH" => Ok(TrendSelection::Both),
            _ => Err(Error::invalid(format!("invalid trend type: {}", s))),
        }
    }
}

impl From<TrendType> for TrendSelection {
    fn from(tt: TrendType) -> Self {
        match tt {
            TrendType::Support => TrendSelection::Support,
            TrendType::Resistance => TrendSelection::Resistance,
        }
    }
}

/// 趋势线
///
/// A detected line through at least two candles, `price = m * position + b`.
/// Fields after `includes_global_extremum` are owned by the duplicate
/// grouping pass and stay at their defaults until it runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trendline {
    pub id: String,
    pub trend_type: TrendType,
    pub points: Vec<usize>,
    pub point_timestamps: Vec<NaiveDateTime>,
    pub starts_at: usize,
    pub ends_at: usize,
    pub is_breakout: bool,
    pub breakout_index: Option<usize>,
    pub breakout_ts: Option<NaiveDateTime>,
    pub num_points: usize,
    pub m: f64,
    pub b: f64,
    /// slope in plot units: `m * avg_candle_range`
    pub slope: f64,
    pub price_at_last: f64,
    pub price_at_next: f64,
    pub score: f64,
    pub includes_global_extremum: bool,
    pub duplicate_group_id: Option<u32>,
    pub is_best_of_group: bool,
    pub overall_rank: Option<usize>,
    pub rank_within_group: usize,
}

impl Trendline {
    #[inline]
    pub fn price_at(&self, position: usize) -> f64 {
        self.m * position as f64 + self.b
    }
}

/// Canonical id of a sorted, deduplicated point set, e.g. `S-[0,1,2]`.
pub fn pointset_id(trend_type: TrendType, points: &[usize]) -> String {
    let joined: Vec<String> = points.iter().map(|p| p.to_string()).collect();
    format!("{}-[{}]", trend_type.prefix(), joined.join(","))
}
