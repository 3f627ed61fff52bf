use crate::cancel::CancelToken;
use crate::score::Scorer;
use crate::shape::{pointset_id, CandlestickSeries, TrendType, Trendline};
use crate::threshold::Thresholds;
use crate::{Error, Result};
use std::collections::{BTreeSet, HashSet};
use std::time::Instant;

/// Options of the pairwise search, borrowed from `DetectConfig`.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub first_pt_must_be_pivot: bool,
    pub last_pt_must_be_pivot: bool,
    pub all_pts_must_be_pivots: bool,
    pub trendline_must_include_global_maxmin_pt: bool,
    pub min_points_required: usize,
    pub ignore_breakouts: bool,
}

/// 将价格序列解析为趋势线
///
/// Every pair `(i, j)` with `start <= i < j` in the scan range defines one
/// line. Each pair sweeps the remaining positions, so the search is
/// O(n^3) in the number of candles; this is the dominant cost of a
/// detection run. Candidates are returned in generation order (ascending
/// `i`, then `j`).
pub struct TrendlineShaper<'s> {
    series: &'s CandlestickSeries,
    trend_type: TrendType,
    prices: &'s [f64],
    start: usize,
    opts: SearchOptions,
    thresholds: &'s Thresholds,
    pivots: &'s BTreeSet<usize>,
    global_extrema: HashSet<usize>,
    scorer: &'s dyn Scorer,
    cancel: Option<&'s CancelToken>,
    deadline: Option<Instant>,
    seen: HashSet<String>,
    body: Vec<Trendline>,
}

impl<'s> TrendlineShaper<'s> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        series: &'s CandlestickSeries,
        trend_type: TrendType,
        start: usize,
        opts: SearchOptions,
        thresholds: &'s Thresholds,
        pivots: &'s BTreeSet<usize>,
        global_extrema: &[usize],
        scorer: &'s dyn Scorer,
    ) -> Self {
        TrendlineShaper {
            series,
            trend_type,
            prices: series.prices(trend_type),
            start,
            opts,
            thresholds,
            pivots,
            global_extrema: global_extrema.iter().cloned().collect(),
            scorer,
            cancel: None,
            deadline: None,
            seen: HashSet::new(),
            body: Vec::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: Option<&'s CancelToken>, deadline: Option<Instant>) -> Self {
        self.cancel = cancel;
        self.deadline = deadline;
        self
    }

    pub fn run(mut self) -> Result<Vec<Trendline>> {
        let n = self.prices.len();
        let first_pivot_only = self.opts.first_pt_must_be_pivot || self.opts.all_pts_must_be_pivots;
        let last_pivot_only = self.opts.last_pt_must_be_pivot || self.opts.all_pts_must_be_pivots;

        for i in self.start..n {
            self.check_interrupt()?;
            if first_pivot_only && !self.pivots.contains(&i) {
                continue;
            }
            for j in i + 1..n {
                if last_pivot_only && !self.pivots.contains(&j) {
                    continue;
                }
                if let Some(tl) = self.fit(i, j) {
                    self.seen.insert(tl.id.clone());
                    self.body.push(tl);
                }
            }
        }
        Ok(self.body)
    }

    fn check_interrupt(&self) -> Result<()> {
        if self.cancel.map(CancelToken::is_cancelled).unwrap_or(false) {
            return Err(Error::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(Error::DeadlineExceeded);
            }
        }
        Ok(())
    }

    /// Line through `(i, price[i])` and `(j, price[j])`, or None if any filter rejects it.
    fn fit(&self, i: usize, j: usize) -> Option<Trendline> {
        let prices = self.prices;
        let n = prices.len();
        let last_index = self.series.last_position();

        let m = (prices[j] - prices[i]) / (j - i) as f64;
        let b = prices[i] - m * i as f64;
        let slope = m * self.thresholds.avg_candle_range;
        let price_at_last = m * last_index as f64 + b;

        if !self.thresholds.slope_bounds(self.trend_type).contains(slope)
            || !self
                .thresholds
                .last_price_bounds(self.trend_type)
                .contains(price_at_last)
        {
            return None;
        }

        let mut points = vec![i, j];
        let mut breakout_index = None;
        for k in i..n {
            if self.opts.last_pt_must_be_pivot && !self.pivots.contains(&k) {
                continue;
            }
            if k == i || k == j {
                continue;
            }
            let trend_price = m * k as f64 + b;
            if breakout_index.is_none() && self.breaks(trend_price, prices[k]) {
                breakout_index = Some(k);
            }
            if (trend_price - prices[k]).abs() < self.thresholds.max_error_pt_to_trend {
                points.push(k);
            }
        }

        if points.len() < self.opts.min_points_required {
            return None;
        }
        points.sort_unstable();
        points.dedup();

        let id = pointset_id(self.trend_type, &points);
        if self.seen.contains(&id) {
            return None;
        }
        let includes_global_extremum = points.iter().any(|p| self.global_extrema.contains(p));
        if self.opts.trendline_must_include_global_maxmin_pt && !includes_global_extremum {
            return None;
        }
        let is_breakout = breakout_index.is_some();
        if is_breakout && self.opts.ignore_breakouts {
            return None;
        }

        let errors: Vec<f64> = points
            .iter()
            .map(|&p| (m * p as f64 + b - prices[p]).abs())
            .collect();
        let score = self.scorer.score(self.series, &errors, points.len(), slope);
        let candles = self.series.candles();

        Some(Trendline {
            id,
            trend_type: self.trend_type,
            point_timestamps: points.iter().map(|&p| candles[p].ts).collect(),
            starts_at: points[0],
            ends_at: points[points.len() - 1],
            is_breakout,
            breakout_index,
            // stamped with the line's start candle, not the breaking one
            breakout_ts: breakout_index.map(|_| candles[i].ts),
            num_points: points.len(),
            points,
            m,
            b,
            slope,
            price_at_last,
            price_at_next: price_at_last + m,
            score,
            includes_global_extremum,
            duplicate_group_id: None,
            is_best_of_group: false,
            overall_rank: None,
            rank_within_group: 0,
        })
    }

    #[inline]
    fn breaks(&self, trend_price: f64, actual: f64) -> bool {
        let tol = self.thresholds.breakout_tolerance;
        match self.trend_type {
            TrendType::Resistance => trend_price < actual - tol,
            TrendType::Support => trend_price > actual + tol,
        }
    }
}
