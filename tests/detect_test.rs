mod fixtures;

use fixtures::*;
use std::collections::BTreeSet;
use trendline::report::group_count;
use trendline::{
    detect, CandlestickSeries, DetectConfig, Detection, GroupingStrategy, Interval, Result,
    ScanStart, Threshold, ThresholdConfig, TrendSelection, TrendType, Trendline,
};

#[test]
fn test_breakouts_enabled() -> Result<()> {
    let det = run(NO_TREND_DUE_BREAKOUT_5M, Interval::M5, with_breakouts())?;

    // distances of exactly 0.1 against max error, and a slope gap one
    // step over dup_slope, decide the extra S-[1,2,3] and the lone R-[1,2,3,4]
    assert_eq!(
        vec!["S-[0,1,2,3,4]", "S-[1,2,3,4]", "S-[1,2,3]", "S-[2,3,4]"],
        ids(&det, TrendType::Support)
    );
    assert_eq!(
        vec!["R-[0,1,2,3,4]", "R-[1,2,3,4]", "R-[2,3,4]"],
        ids(&det, TrendType::Resistance)
    );
    assert_eq!(3, group_count(&det));

    let s = find(&det, "S-[0,1,2,3,4]");
    assert_breakout(s, 5);
    assert_ranks(s, Some(1), 1);
    for (id, rank) in &[("S-[1,2,3,4]", 2), ("S-[1,2,3]", 3), ("S-[2,3,4]", 4)] {
        let tl = find(&det, id);
        assert_breakout(tl, 5);
        assert_ranks(tl, None, *rank);
        assert_eq!(Some(2000), tl.duplicate_group_id);
    }

    let r = find(&det, "R-[0,1,2,3,4]");
    assert_breakout(r, 5);
    assert_ranks(r, Some(1), 1);
    assert_eq!(Some(1000), r.duplicate_group_id);
    let r4 = find(&det, "R-[1,2,3,4]");
    assert_breakout(r4, 5);
    assert_ranks(r4, Some(2), 1);
    assert_eq!(Some(1001), r4.duplicate_group_id);
    let r3 = find(&det, "R-[2,3,4]");
    assert_breakout(r3, 5);
    assert_ranks(r3, None, 2);
    assert_eq!(Some(1000), r3.duplicate_group_id);
    Ok(())
}

#[test]
fn test_breakouts_disabled() -> Result<()> {
    let det = run(NO_TREND_DUE_BREAKOUT_5M, Interval::M5, base())?;
    assert_eq!(0, group_count(&det));
    assert!(det.trends.iter().all(|td| td.trendlines.is_empty()));
    Ok(())
}

#[test]
fn test_no_trend() -> Result<()> {
    for (table, interval) in &[(NO_TREND_5M, Interval::M5), (NO_TREND_1D, Interval::D1)] {
        let det = run(table, *interval, base())?;
        assert_eq!(0, group_count(&det));
    }
    Ok(())
}

#[test]
fn test_support_6pt() -> Result<()> {
    for (table, interval) in &[(SUP_6PT_TREND_5M, Interval::M5), (SUP_6PT_TREND_1D, Interval::D1)] {
        let det = run(table, *interval, base())?;
        let tl = find(&det, "S-[0,1,2,3,4,5]");
        assert!(!tl.is_breakout);
        assert_ranks(tl, Some(1), 1);
        assert_eq!(1, group_count(&det));
        assert!(trend(&det, TrendType::Resistance).is_empty());
    }
    Ok(())
}

#[test]
fn test_resistance_6pt() -> Result<()> {
    let det = run(RES_6PT_TREND_1D, Interval::D1, base())?;
    assert_ranks(find(&det, "R-[0,1,2,3,4,5]"), Some(1), 1);
    assert_eq!(1, group_count(&det));
    assert!(trend(&det, TrendType::Support).is_empty());
    Ok(())
}

#[test]
fn test_support_3pt() -> Result<()> {
    let det = run(SUP_3PT_TREND_1D, Interval::D1, base())?;
    let sks = trend(&det, TrendType::Support);
    assert_eq!(1, sks.len());
    assert_eq!("S-[2,3,4]", sks[0].id);
    assert_ranks(&sks[0], Some(1), 1);
    assert!(trend(&det, TrendType::Resistance).is_empty());
    Ok(())
}

#[test]
fn test_two_support_and_one_resistance() -> Result<()> {
    let det = run(TWO_SUP_AND_ONE_RES_TREND_1D, Interval::D1, base())?;
    assert_ranks(find(&det, "R-[0,1,2,3,4,5,6]"), Some(1), 1);
    // equal scores, the earlier line ranks first
    assert_ranks(find(&det, "S-[0,1,2]"), Some(1), 1);
    assert_ranks(find(&det, "S-[4,5,6]"), Some(2), 1);
    assert_eq!(3, group_count(&det));
    Ok(())
}

#[test]
fn test_flat_support_and_resistance() -> Result<()> {
    let det = run(FLAT_RES_AND_SUP, Interval::D1, base())?;
    assert_ranks(find(&det, "S-[1,2,4]"), Some(1), 1);
    assert_ranks(find(&det, "R-[1,3,5]"), Some(1), 1);
    assert_eq!(2, group_count(&det));
    Ok(())
}

#[test]
fn test_resistance_through_global_max() -> Result<()> {
    for &required in &[true, false] {
        let cfg = DetectConfig {
            trendline_must_include_global_maxmin_pt: required,
            ..base()
        };
        let det = run(ONE_RES_LINE_WITH_GLOBAL_MAX_1D, Interval::D1, cfg)?;
        let tl = find(&det, "R-[2,3,4]");
        assert!(tl.includes_global_extremum);
        assert_ranks(tl, Some(1), 1);
        assert_eq!(1, group_count(&det));
    }
    Ok(())
}

#[test]
fn test_resistance_missing_global_max() -> Result<()> {
    let required = DetectConfig {
        trendline_must_include_global_maxmin_pt: true,
        ..base()
    };
    let det = run(ONE_RES_LINE_WITHOUT_GLOBAL_MAX_1D, Interval::D1, required)?;
    assert_eq!(0, group_count(&det));

    let det = run(ONE_RES_LINE_WITHOUT_GLOBAL_MAX_1D, Interval::D1, base())?;
    let tl = find(&det, "R-[2,3,4]");
    assert!(!tl.includes_global_extremum);
    assert_ranks(tl, Some(1), 1);
    assert_eq!(1, group_count(&det));
    Ok(())
}

#[test]
fn test_pivot_constraints() -> Result<()> {
    let first = DetectConfig {
        first_pt_must_be_pivot: true,
        ..base()
    };
    let det = run(TWO_SUP_AND_ONE_RES_TREND_1D, Interval::D1, first)?;
    assert_eq!(vec!["S-[0,1,2]"], ids(&det, TrendType::Support));
    assert_eq!(vec!["R-[0,1,2,3,4,5,6]"], ids(&det, TrendType::Resistance));

    // pivots are only 0 and 6, and swept points must be pivots too
    let last = DetectConfig {
        last_pt_must_be_pivot: true,
        ..base()
    };
    let det = run(TWO_SUP_AND_ONE_RES_TREND_1D, Interval::D1, last)?;
    assert_eq!(0, group_count(&det));

    // all-pivots constrains the pair only, swept points may be non-pivots
    let all = DetectConfig {
        all_pts_must_be_pivots: true,
        ..base()
    };
    let det = run(TWO_SUP_AND_ONE_RES_TREND_1D, Interval::D1, all)?;
    assert!(ids(&det, TrendType::Support).is_empty());
    assert_eq!(vec!["R-[0,1,2,3,4,5,6]"], ids(&det, TrendType::Resistance));
    Ok(())
}

#[test]
fn test_scan_from_timestamp() -> Result<()> {
    let series = load(TWO_SUP_AND_ONE_RES_TREND_1D, Interval::D1)?;
    let cfg = DetectConfig {
        scan_from: ScanStart::Timestamp(series.candles()[2].ts),
        ..base()
    };
    let det = detect(&series, TrendSelection::Both, &cfg)?;
    assert_eq!(vec!["S-[4,5,6]"], ids(&det, TrendType::Support));
    assert_eq!(
        vec!["R-[2,3,4,5,6]", "R-[3,4,5,6]", "R-[4,5,6]"],
        ids(&det, TrendType::Resistance)
    );
    for td in &det.trends {
        assert_eq!(Some(&2), td.pivots.iter().next());
    }
    Ok(())
}

#[test]
fn test_first_match_grouping_on_fixtures() -> Result<()> {
    for (table, interval) in all_tables() {
        let transitive = run(table, interval, with_breakouts())?;
        let first_match = run(
            table,
            interval,
            DetectConfig {
                grouping: GroupingStrategy::FirstMatch,
                ..with_breakouts()
            },
        )?;
        assert_eq!(group_count(&transitive), group_count(&first_match));
    }
    Ok(())
}

#[test]
fn test_pivots_include_first_and_last() -> Result<()> {
    for (table, interval) in all_tables() {
        let det = run(table, interval, base())?;
        for td in &det.trends {
            let n = td.thresholds.avg_candle_range;
            assert!(n > 0.0);
            assert!(td.pivots.contains(&0));
            assert_eq!(td.pivots.iter().next_back(), Some(&last_position(table)?));
        }
    }
    Ok(())
}

#[test]
fn test_points_sorted_and_unique() -> Result<()> {
    for &min_points in &[2, 3, 4] {
        for (table, interval) in all_tables() {
            let cfg = DetectConfig {
                min_points_required: min_points,
                ..with_breakouts()
            };
            let det = run(table, interval, cfg)?;
            for td in &det.trends {
                for tl in &td.trendlines {
                    assert!(tl.points.len() >= min_points);
                    assert!(tl.points.windows(2).all(|w| w[0] < w[1]));
                    assert_eq!(tl.points[0], tl.starts_at);
                    assert_eq!(*tl.points.last().unwrap(), tl.ends_at);
                }
                assert!(td.trendlines.windows(2).all(|w| w[0].score >= w[1].score));
            }
        }
    }
    Ok(())
}

#[test]
fn test_detection_is_deterministic() -> Result<()> {
    for (table, interval) in all_tables() {
        let a = run(table, interval, with_breakouts())?;
        let b = run(table, interval, with_breakouts())?;
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
    Ok(())
}

#[test]
fn test_ignore_breakouts() -> Result<()> {
    for (table, interval) in all_tables() {
        let det = run(table, interval, base())?;
        assert!(det
            .trends
            .iter()
            .flat_map(|td| td.trendlines.iter())
            .all(|tl| !tl.is_breakout));
    }
    let det = run(NO_TREND_DUE_BREAKOUT_5M, Interval::M5, with_breakouts())?;
    assert!(det
        .trends
        .iter()
        .flat_map(|td| td.trendlines.iter())
        .any(|tl| tl.is_breakout));
    Ok(())
}

#[test]
fn test_global_extremum_filter_is_subset() -> Result<()> {
    for (table, interval) in all_tables() {
        let required = run(
            table,
            interval,
            DetectConfig {
                trendline_must_include_global_maxmin_pt: true,
                ..with_breakouts()
            },
        )?;
        let free = run(table, interval, with_breakouts())?;
        for td in &required.trends {
            for tl in &td.trendlines {
                assert!(tl.points.iter().any(|p| td.global_extrema.contains(p)));
            }
        }
        let required_ids = all_ids(&required);
        let free_ids = all_ids(&free);
        assert!(required_ids.is_subset(&free_ids));
    }
    Ok(())
}

fn base() -> DetectConfig {
    DetectConfig {
        min_points_required: 3,
        ignore_breakouts: true,
        thresholds: ThresholdConfig {
            max_error_pt_to_trend: Some(Threshold::fixed(0.10)),
            dup_last_price: Some(Threshold::fixed(0.40)),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn with_breakouts() -> DetectConfig {
    DetectConfig {
        ignore_breakouts: false,
        ..base()
    }
}

fn run(table: &str, interval: Interval, cfg: DetectConfig) -> Result<Detection> {
    let series: CandlestickSeries = load(table, interval)?;
    detect(&series, TrendSelection::Both, &cfg)
}

fn all_tables() -> Vec<(&'static str, Interval)> {
    vec![
        (NO_TREND_DUE_BREAKOUT_5M, Interval::M5),
        (NO_TREND_5M, Interval::M5),
        (NO_TREND_1D, Interval::D1),
        (SUP_6PT_TREND_5M, Interval::M5),
        (SUP_6PT_TREND_1D, Interval::D1),
        (RES_6PT_TREND_1D, Interval::D1),
        (SUP_3PT_TREND_1D, Interval::D1),
        (ONE_SUP_AND_ONE_RES_TREND_1D, Interval::D1),
        (TWO_SUP_AND_ONE_RES_TREND_1D, Interval::D1),
        (ONE_RES_LINE_WITH_GLOBAL_MAX_1D, Interval::D1),
        (ONE_RES_LINE_WITHOUT_GLOBAL_MAX_1D, Interval::D1),
        (FLAT_RES_AND_SUP, Interval::D1),
        (ONE_PIVOT_LOW_AND_HIGH, Interval::D1),
        (NO_PIVOTS_EXCEPT_FOR_START_END, Interval::D1),
    ]
}

fn last_position(table: &str) -> Result<usize> {
    Ok(load(table, Interval::D1)?.last_position())
}

fn trend(det: &Detection, tt: TrendType) -> &[Trendline] {
    det.trend(tt).map(|td| &td.trendlines[..]).unwrap_or(&[])
}

fn ids(det: &Detection, tt: TrendType) -> Vec<&str> {
    trend(det, tt).iter().map(|tl| tl.id.as_str()).collect()
}

fn all_ids(det: &Detection) -> BTreeSet<String> {
    det.trends
        .iter()
        .flat_map(|td| td.trendlines.iter().map(|tl| tl.id.clone()))
        .collect()
}

fn find<'d>(det: &'d Detection, id: &str) -> &'d Trendline {
    let matches: Vec<&Trendline> = det
        .trends
        .iter()
        .flat_map(|td| td.trendlines.iter())
        .filter(|tl| tl.id == id)
        .collect();
    assert_eq!(1, matches.len(), "expected trendline with id {} to exist", id);
    matches[0]
}

fn assert_breakout(tl: &Trendline, at: usize) {
    assert!(tl.is_breakout, "expected {} to be a breakout", tl.id);
    assert_eq!(Some(at), tl.breakout_index, "breakout index of {}", tl.id);
}

fn assert_ranks(tl: &Trendline, overall_rank: Option<usize>, rank_within_group: usize) {
    assert_eq!(overall_rank, tl.overall_rank, "overall rank of {}", tl.id);
    assert_eq!(
        rank_within_group, tl.rank_within_group,
        "rank within group of {}",
        tl.id
    );
    assert_eq!(overall_rank.is_some(), tl.is_best_of_group);
}
