use crate::shape::CandlestickSeries;
use std::fmt;

/// Base of the exponential reward per supporting point.
pub const POINT_WEIGHT: f64 = 2.5;

/// Floor of the mean fit error, keeps a perfect fit's score finite.
pub const MIN_MEAN_ERROR: f64 = 1e-9;

/// 评分
///
/// Turns a fitted line into a comparable number, higher is better.
/// `errors` holds `|line - price|` at each supporting point, `slope` is in
/// plot units.
pub trait Scorer: Send + Sync {
    fn score(&self, series: &CandlestickSeries, errors: &[f64], num_points: usize, slope: f64)
        -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&CandlestickSeries, &[f64], usize, f64) -> f64 + Send + Sync,
{
    fn score(
        &self,
        series: &CandlestickSeries,
        errors: &[f64],
        num_points: usize,
        slope: f64,
    ) -> f64 {
        self(series, errors, num_points, slope)
    }
}

/// `(avg_candle_range / mean(errors)) * 2.5 ^ num_points`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScorer;

impl Scorer for DefaultScorer {
    fn score(
        &self,
        series: &CandlestickSeries,
        errors: &[f64],
        num_points: usize,
        _slope: f64,
    ) -> f64 {
        let mean_error = mean(errors).max(MIN_MEAN_ERROR);
        (series.avg_candle_range() / mean_error) * POINT_WEIGHT.powi(num_points as i32)
    }
}

impl fmt::Debug for dyn Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scorer")
    }
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}
