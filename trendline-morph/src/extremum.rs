use serde_derive::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    Max,
    Min,
}

/// Positions whose price equals the global max/min of `prices` or lies
/// within `tolerance` of it.
///
/// `offset` is the position of `prices[0]` in the full series, returned
/// positions are absolute and ascending.
pub fn find_global_extrema(
    prices: &[f64],
    offset: usize,
    kind: ExtremumKind,
    tolerance: f64,
) -> Vec<usize> {
    let extreme = match kind {
        ExtremumKind::Max => prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        ExtremumKind::Min => prices.iter().cloned().fold(f64::INFINITY, f64::min),
    };
    prices
        .iter()
        .enumerate()
        .filter(|(_, &v)| v == extreme || (extreme - v).abs() < tolerance)
        .map(|(i, _)| offset + i)
        .collect()
}
