//! Reporting of detection results
//!
//! Flattens a `Detection` into the forms its consumers read: one row per
//! trendline for tables and JSON, and the short text summary printed by
//! the shell.

use chrono::NaiveDateTime;
use serde_derive::*;
use std::collections::HashSet;
use trendline_morph::{Detection, TrendDetection, TrendType, Trendline};

/// One trendline as a flat table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendlineRow {
    pub id: String,
    pub trend_type: TrendType,
    pub points: Vec<usize>,
    pub point_timestamps: Vec<NaiveDateTime>,
    pub starts_at: usize,
    pub starts_at_ts: NaiveDateTime,
    pub ends_at: usize,
    pub ends_at_ts: NaiveDateTime,
    pub is_breakout: bool,
    pub breakout_index: Option<usize>,
    pub breakout_ts: Option<NaiveDateTime>,
    pub num_points: usize,
    pub m: f64,
    pub b: f64,
    pub slope: f64,
    pub price_at_last: f64,
    pub price_at_next: f64,
    pub score: f64,
    pub includes_global_extremum: bool,
    pub global_extrema: Vec<usize>,
    pub duplicate_group_id: Option<u32>,
    pub is_best_of_group: bool,
    pub overall_rank: Option<usize>,
    pub rank_within_group: usize,
}

impl TrendlineRow {
    fn new(tl: &Trendline, td: &TrendDetection) -> Self {
        // a trendline has at least two points
        let last = tl.point_timestamps.len() - 1;
        TrendlineRow {
            id: tl.id.clone(),
            trend_type: tl.trend_type,
            points: tl.points.clone(),
            point_timestamps: tl.point_timestamps.clone(),
            starts_at: tl.starts_at,
            starts_at_ts: tl.point_timestamps[0],
            ends_at: tl.ends_at,
            ends_at_ts: tl.point_timestamps[last],
            is_breakout: tl.is_breakout,
            breakout_index: tl.breakout_index,
            breakout_ts: tl.breakout_ts,
            num_points: tl.num_points,
            m: tl.m,
            b: tl.b,
            slope: tl.slope,
            price_at_last: tl.price_at_last,
            price_at_next: tl.price_at_next,
            score: tl.score,
            includes_global_extremum: tl.includes_global_extremum,
            global_extrema: td.global_extrema.clone(),
            duplicate_group_id: tl.duplicate_group_id,
            is_best_of_group: tl.is_best_of_group,
            overall_rank: tl.overall_rank,
            rank_within_group: tl.rank_within_group,
        }
    }
}

/// All trendlines of the detection, support rows first, each type in score order.
pub fn rows(detection: &Detection) -> Vec<TrendlineRow> {
    detection
        .trends
        .iter()
        .flat_map(|td| td.trendlines.iter().map(move |tl| TrendlineRow::new(tl, td)))
        .collect()
}

/// Number of distinct (duplicate group, trend type) pairs.
pub fn group_count(detection: &Detection) -> usize {
    detection
        .trends
        .iter()
        .flat_map(|td| {
            td.trendlines
                .iter()
                .filter_map(|tl| tl.duplicate_group_id.map(|gid| (gid, tl.trend_type)))
        })
        .collect::<HashSet<_>>()
        .len()
}

/// Human readable summary.
///
/// ```text
/// 1 Resistance trendlines found
/// 2 Support trendlines found
/// 3pt Support line with uuid S-[0,1,2] found
/// 3pt Support line with uuid S-[4,5,6] found
/// 7pt Resistance line with uuid R-[0,1,2,3,4,5,6] found
/// ```
///
/// Counts are of best-of-group trendlines; a trend type that was not
/// requested counts as zero.
pub fn summary_lines(detection: &Detection) -> Vec<String> {
    let best_of = |tt: TrendType| {
        detection
            .trend(tt)
            .map(|td| td.best())
            .unwrap_or_else(Vec::new)
    };
    let support = best_of(TrendType::Support);
    let resistance = best_of(TrendType::Resistance);

    let mut lines = vec![
        format!("{} {} trendlines found", resistance.len(), TrendType::Resistance.label()),
        format!("{} {} trendlines found", support.len(), TrendType::Support.label()),
    ];
    for tl in support.into_iter().chain(resistance) {
        lines.push(format!(
            "{}pt {} line with uuid {} found",
            tl.num_points,
            tl.trend_type.label(),
            tl.id
        ));
    }
    lines
}
