use crate::shape::{CandlestickSeries, TrendType};
use serde_derive::*;
use std::fmt;
use std::sync::Arc;

pub const PIVOT_SEPARATION_RATIO: f64 = 0.2;
pub const PIVOT_GROUPING_RATIO: f64 = 0.1;
pub const MAX_ERROR_PT_TO_TREND_RATIO: f64 = 0.1;
pub const DUP_LAST_PRICE_RATIO: f64 = 0.2;
pub const DUP_SLOPE_RATIO: f64 = 0.05;
pub const BREAKOUT_TOLERANCE_RATIO: f64 = 0.08;
pub const GLOBAL_EXTREMUM_TOLERANCE_RATIO: f64 = 0.1;
pub const MIN_LAST_PRICE_RATIO: f64 = 0.667;
pub const MAX_LAST_PRICE_RATIO: f64 = 1.5;

pub type ThresholdFn = dyn Fn(&CandlestickSeries) -> f64 + Send + Sync;

/// 阈值
///
/// A named threshold slot: either a fixed number or a function of the series.
#[derive(Clone)]
pub enum Threshold {
    Fixed(f64),
    Derived(Arc<ThresholdFn>),
}

impl Threshold {
    pub fn fixed(value: f64) -> Self {
        Threshold::Fixed(value)
    }

    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&CandlestickSeries) -> f64 + Send + Sync + 'static,
    {
        Threshold::Derived(Arc::new(f))
    }

    /// `ratio` times the average candle range
    pub fn avg_range_ratio(ratio: f64) -> Self {
        Self::derived(move |series| series.avg_candle_range() * ratio)
    }

    /// `ratio` times the close of the final candle
    pub fn last_close_ratio(ratio: f64) -> Self {
        Self::derived(move |series| series.last_close() * ratio)
    }

    pub fn resolve(&self, series: &CandlestickSeries) -> f64 {
        match self {
            Threshold::Fixed(v) => *v,
            Threshold::Derived(f) => f(series),
        }
    }
}

impl fmt::Debug for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Fixed(v) => write!(f, "Fixed({})", v),
            Threshold::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Per-call overrides layered over the documented defaults.
///
/// Every `None` slot falls back to its default when resolved.
#[derive(Debug, Clone, Default)]
pub struct ThresholdConfig {
    pub pivot_separation: Option<Threshold>,
    pub pivot_grouping: Option<Threshold>,
    pub max_error_pt_to_trend: Option<Threshold>,
    pub dup_last_price: Option<Threshold>,
    pub dup_slope: Option<Threshold>,
    pub breakout_tolerance: Option<Threshold>,
    pub global_extremum_tolerance: Option<Threshold>,
    pub min_support_slope: Option<Threshold>,
    pub max_support_slope: Option<Threshold>,
    pub min_resistance_slope: Option<Threshold>,
    pub max_resistance_slope: Option<Threshold>,
    pub min_support_last_price: Option<Threshold>,
    pub max_support_last_price: Option<Threshold>,
    pub min_resistance_last_price: Option<Threshold>,
    pub max_resistance_last_price: Option<Threshold>,
}

impl ThresholdConfig {
    pub fn resolve(&self, series: &CandlestickSeries) -> Thresholds {
        let avg = series.avg_candle_range();
        let last_close = series.last_close();
        let by_avg = |slot: &Option<Threshold>, ratio: f64| {
            slot.as_ref().map(|t| t.resolve(series)).unwrap_or(avg * ratio)
        };
        let by_close = |slot: &Option<Threshold>, ratio: f64| {
            slot.as_ref()
                .map(|t| t.resolve(series))
                .unwrap_or(last_close * ratio)
        };
        let or = |slot: &Option<Threshold>, default: f64| {
            slot.as_ref().map(|t| t.resolve(series)).unwrap_or(default)
        };

        Thresholds {
            avg_candle_range: avg,
            pivot_separation: by_avg(&self.pivot_separation, PIVOT_SEPARATION_RATIO),
            pivot_grouping: by_avg(&self.pivot_grouping, PIVOT_GROUPING_RATIO),
            max_error_pt_to_trend: by_avg(&self.max_error_pt_to_trend, MAX_ERROR_PT_TO_TREND_RATIO),
            dup_last_price: by_avg(&self.dup_last_price, DUP_LAST_PRICE_RATIO),
            dup_slope: by_avg(&self.dup_slope, DUP_SLOPE_RATIO),
            breakout_tolerance: by_avg(&self.breakout_tolerance, BREAKOUT_TOLERANCE_RATIO),
            global_extremum_tolerance: by_avg(
                &self.global_extremum_tolerance,
                GLOBAL_EXTREMUM_TOLERANCE_RATIO,
            ),
            support_slope: Bounds {
                min: or(&self.min_support_slope, -f64::MAX),
                max: or(&self.max_support_slope, f64::MAX),
            },
            resistance_slope: Bounds {
                min: or(&self.min_resistance_slope, -f64::MAX),
                max: or(&self.max_resistance_slope, f64::MAX),
            },
            support_last_price: Bounds {
                min: by_close(&self.min_support_last_price, MIN_LAST_PRICE_RATIO),
                max: by_close(&self.max_support_last_price, MAX_LAST_PRICE_RATIO),
            },
            resistance_last_price: Bounds {
                min: by_close(&self.min_resistance_last_price, MIN_LAST_PRICE_RATIO),
                max: by_close(&self.max_resistance_last_price, MAX_LAST_PRICE_RATIO),
            },
        }
    }
}

/// Inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        !(v > self.max || v < self.min)
    }
}

/// Thresholds resolved against one series, fixed for a detection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub avg_candle_range: f64,
    pub pivot_separation: f64,
    pub pivot_grouping: f64,
    pub max_error_pt_to_trend: f64,
    pub dup_last_price: f64,
    pub dup_slope: f64,
    pub breakout_tolerance: f64,
    pub global_extremum_tolerance: f64,
    pub support_slope: Bounds,
    pub resistance_slope: Bounds,
    pub support_last_price: Bounds,
    pub resistance_last_price: Bounds,
}

impl Thresholds {
    pub fn slope_bounds(&self, trend_type: TrendType) -> Bounds {
        match trend_type {
            TrendType::Support => self.support_slope,
            TrendType::Resistance => self.resistance_slope,
        }
    }

    pub fn last_price_bounds(&self, trend_type: TrendType) -> Bounds {
        match trend_type {
            TrendType::Support => self.support_last_price,
            TrendType::Resistance => self.resistance_last_price,
        }
    }
}
