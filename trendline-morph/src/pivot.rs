use crate::shape::TrendType;
use std::collections::BTreeSet;

/// Longest plateau the look-back/look-ahead window may extend across.
pub const MAX_CONTINUOUS_PIVOTS: usize = 6;

/// 将价格序列解析为转折点集合
///
/// Scans `prices[start..]` and returns the positions of local turning points:
/// lows for support, highs for resistance. The first and last scanned
/// positions are always included.
pub fn find_pivots(
    prices: &[f64],
    trend_type: TrendType,
    start: usize,
    grouping: f64,
    separation: f64,
) -> BTreeSet<usize> {
    PivotShaper::new(prices, trend_type, start, grouping, separation).run()
}

struct PivotShaper<'p> {
    prices: &'p [f64],
    trend_type: TrendType,
    first: usize,
    grouping: f64,
    separation: f64,
}

impl<'p> PivotShaper<'p> {
    fn new(
        prices: &'p [f64],
        trend_type: TrendType,
        first: usize,
        grouping: f64,
        separation: f64,
    ) -> Self {
        PivotShaper {
            prices,
            trend_type,
            first,
            grouping,
            separation,
        }
    }

    fn run(self) -> BTreeSet<usize> {
        let mut pivots = BTreeSet::new();
        if self.first >= self.prices.len() {
            return pivots;
        }
        let last = self.prices.len() - 1;
        for i in self.first + 1..last {
            if self.is_pivot(i, last) {
                pivots.insert(i);
            }
        }
        pivots.insert(self.first);
        pivots.insert(last);
        pivots
    }

    fn is_pivot(&self, i: usize, last: usize) -> bool {
        let p = self.prices;
        let pcur = p[i];

        // look ahead across a plateau
        let mut j = 1;
        while j < MAX_CONTINUOUS_PIVOTS && i + j < last {
            if (p[i + j - 1] - p[i + j]).abs() < self.grouping {
                j += 1;
            } else {
                break;
            }
        }
        let pnext = p[i + j];

        // look back
        let mut j = 1;
        while j < MAX_CONTINUOUS_PIVOTS && i - j > self.first {
            if (p[i - j + 1] - p[i - j]).abs() < self.grouping {
                j += 1;
            } else {
                break;
            }
        }
        let pprev = p[i - j];

        let beyond = match self.trend_type {
            TrendType::Resistance => pprev > pcur || pnext > pcur,
            TrendType::Support => pprev < pcur || pnext < pcur,
        };
        if beyond {
            return false;
        }

        // one big move and one nontrivial move, in either order
        let dprev = (pcur - pprev).abs();
        let dnext = (pcur - pnext).abs();
        let small = self.separation * 0.25;
        let big = self.separation * 0.75;
        (dprev > small && dnext > big) || (dprev > big && dnext > small)
    }
}
