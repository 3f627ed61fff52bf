use crate::cancel::CancelToken;
use crate::extremum::{find_global_extrema, ExtremumKind};
use crate::group::{by_score_desc, mark_duplicates, DuplicateThresholds, GroupingStrategy};
use crate::pivot::find_pivots;
use crate::score::{DefaultScorer, Scorer};
use crate::search::{SearchOptions, TrendlineShaper};
use crate::shape::{CandlestickSeries, TrendSelection, TrendType, Trendline};
use crate::threshold::{ThresholdConfig, Thresholds};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde_derive::*;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Where the scan range of a detection run begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStart {
    Position(usize),
    /// first candle at or after the timestamp
    Timestamp(NaiveDateTime),
}

impl Default for ScanStart {
    fn default() -> Self {
        ScanStart::Position(0)
    }
}

/// 检测配置
#[derive(Clone)]
pub struct DetectConfig {
    pub first_pt_must_be_pivot: bool,
    pub last_pt_must_be_pivot: bool,
    pub all_pts_must_be_pivots: bool,
    pub trendline_must_include_global_maxmin_pt: bool,
    pub min_points_required: usize,
    pub scan_from: ScanStart,
    pub ignore_breakouts: bool,
    pub thresholds: ThresholdConfig,
    pub scorer: Arc<dyn Scorer>,
    pub grouping: GroupingStrategy,
    pub cancel: Option<CancelToken>,
    pub deadline: Option<Instant>,
}

impl Default for DetectConfig {
    fn default() -> Self {
        DetectConfig {
            first_pt_must_be_pivot: false,
            last_pt_must_be_pivot: false,
            all_pts_must_be_pivots: false,
            trendline_must_include_global_maxmin_pt: false,
            min_points_required: 3,
            scan_from: ScanStart::default(),
            ignore_breakouts: true,
            thresholds: ThresholdConfig::default(),
            scorer: Arc::new(DefaultScorer),
            grouping: GroupingStrategy::default(),
            cancel: None,
            deadline: None,
        }
    }
}

impl fmt::Debug for DetectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectConfig")
            .field("first_pt_must_be_pivot", &self.first_pt_must_be_pivot)
            .field("last_pt_must_be_pivot", &self.last_pt_must_be_pivot)
            .field("all_pts_must_be_pivots", &self.all_pts_must_be_pivots)
            .field(
                "trendline_must_include_global_maxmin_pt",
                &self.trendline_must_include_global_maxmin_pt,
            )
            .field("min_points_required", &self.min_points_required)
            .field("scan_from", &self.scan_from)
            .field("ignore_breakouts", &self.ignore_breakouts)
            .field("thresholds", &self.thresholds)
            .field("grouping", &self.grouping)
            .field("cancel", &self.cancel)
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl DetectConfig {
    /// Checks the config against the series and returns the first scanned position.
    pub fn validate(&self, series: &CandlestickSeries) -> Result<usize> {
        if self.min_points_required < 2 {
            return Err(Error::invalid(format!(
                "min_points_required must be at least 2, received {}",
                self.min_points_required
            )));
        }
        match self.scan_from {
            ScanStart::Position(pos) if pos < series.len() => Ok(pos),
            ScanStart::Position(pos) => Err(Error::invalid(format!(
                "scan start {} is beyond the last position {}",
                pos,
                series.last_position()
            ))),
            ScanStart::Timestamp(ts) => series
                .position_at_or_after(ts)
                .ok_or_else(|| Error::invalid(format!("no candle at or after {}", ts))),
        }
    }

    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            first_pt_must_be_pivot: self.first_pt_must_be_pivot,
            last_pt_must_be_pivot: self.last_pt_must_be_pivot,
            all_pts_must_be_pivots: self.all_pts_must_be_pivots,
            trendline_must_include_global_maxmin_pt: self.trendline_must_include_global_maxmin_pt,
            min_points_required: self.min_points_required,
            ignore_breakouts: self.ignore_breakouts,
        }
    }
}

/// Detection result of one trend type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDetection {
    pub trend_type: TrendType,
    pub pivots: BTreeSet<usize>,
    pub global_extrema: Vec<usize>,
    pub thresholds: Thresholds,
    /// sorted by score descending, ties in generation order
    pub trendlines: Vec<Trendline>,
}

impl TrendDetection {
    /// Best-of-group trendlines in `overall_rank` order.
    pub fn best(&self) -> Vec<&Trendline> {
        let mut best: Vec<&Trendline> = self
            .trendlines
            .iter()
            .filter(|tl| tl.is_best_of_group)
            .collect();
        best.sort_by_key(|tl| tl.overall_rank);
        best
    }

    pub fn get(&self, id: &str) -> Option<&Trendline> {
        self.trendlines.iter().find(|tl| tl.id == id)
    }
}

/// Results of all requested trend types, support first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub selection: TrendSelection,
    pub trends: Vec<TrendDetection>,
}

impl Detection {
    pub fn trend(&self, trend_type: TrendType) -> Option<&TrendDetection> {
        self.trends.iter().find(|t| t.trend_type == trend_type)
    }

    pub fn support(&self) -> Option<&TrendDetection> {
        self.trend(TrendType::Support)
    }

    pub fn resistance(&self) -> Option<&TrendDetection> {
        self.trend(TrendType::Resistance)
    }
}

/// 检测趋势线
///
/// Runs the full pipeline for every trend type in `selection`: thresholds,
/// pivots, global extrema, pairwise search, duplicate grouping and the
/// final score sort. The series is only read; the config is validated
/// before any work starts.
pub fn detect(
    series: &CandlestickSeries,
    selection: TrendSelection,
    config: &DetectConfig,
) -> Result<Detection> {
    let start = config.validate(series)?;
    let thresholds = config.thresholds.resolve(series);
    log::debug!("resolved thresholds: {:?}", thresholds);

    let mut trends = Vec::new();
    for tt in selection.trend_types() {
        let td = detect_trend(series, tt, start, &thresholds, config).map_err(|e| {
            if matches!(e, Error::Cancelled | Error::DeadlineExceeded) {
                log::warn!("{} detection aborted: {}", tt, e);
            }
            e
        })?;
        log::info!(
            "{} trendlines found for {}, {} duplicate groups",
            td.trendlines.len(),
            tt,
            td.best().len()
        );
        trends.push(td);
    }
    Ok(Detection { selection, trends })
}

fn detect_trend(
    series: &CandlestickSeries,
    trend_type: TrendType,
    start: usize,
    thresholds: &Thresholds,
    config: &DetectConfig,
) -> Result<TrendDetection> {
    let prices = series.prices(trend_type);
    let pivots = find_pivots(
        prices,
        trend_type,
        start,
        thresholds.pivot_grouping,
        thresholds.pivot_separation,
    );
    log_pivots(trend_type, &pivots, series.len() - start);

    let kind = match trend_type {
        TrendType::Resistance => ExtremumKind::Max,
        TrendType::Support => ExtremumKind::Min,
    };
    let global_extrema = find_global_extrema(
        &prices[start..],
        start,
        kind,
        thresholds.global_extremum_tolerance,
    );

    let mut trendlines = TrendlineShaper::new(
        series,
        trend_type,
        start,
        config.search_options(),
        thresholds,
        &pivots,
        &global_extrema,
        config.scorer.as_ref(),
    )
    .with_cancel(config.cancel.as_ref(), config.deadline)
    .run()?;
    log::debug!("{} {} candidates before grouping", trendlines.len(), trend_type);

    mark_duplicates(
        &mut trendlines,
        trend_type,
        DuplicateThresholds {
            last_price: thresholds.dup_last_price,
            slope: thresholds.dup_slope,
        },
        config.grouping,
    );
    // stable: equal scores keep generation order
    trendlines.sort_by(by_score_desc);

    Ok(TrendDetection {
        trend_type,
        pivots,
        global_extrema,
        thresholds: *thresholds,
        trendlines,
    })
}

/// Pivots of one trend type over the configured scan range.
pub fn get_pivots(
    series: &CandlestickSeries,
    trend_type: TrendType,
    config: &DetectConfig,
) -> Result<BTreeSet<usize>> {
    let start = config.validate(series)?;
    let thresholds = config.thresholds.resolve(series);
    let pivots = find_pivots(
        series.prices(trend_type),
        trend_type,
        start,
        thresholds.pivot_grouping,
        thresholds.pivot_separation,
    );
    log_pivots(trend_type, &pivots, series.len() - start);
    Ok(pivots)
}

fn log_pivots(trend_type: TrendType, pivots: &BTreeSet<usize>, scanned: usize) {
    log::debug!(
        "{} pivots found = {:?}, {:.2}% of {} scanned points",
        trend_type,
        pivots,
        pivots.len() as f64 / scanned as f64 * 100.0,
        scanned
    );
}
