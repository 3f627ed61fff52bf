use crate::shape::{TrendType, Trendline};
use serde_derive::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// How near-identical trendlines are merged into duplicate groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingStrategy {
    /// Transitive closure of the duplicate relation: if A~B and B~C then
    /// A, B and C share one group regardless of list order.
    Transitive,
    /// Each trendline joins only the group of its first match in list order.
    /// Reproduces the greedy pass, whose groups can depend on order.
    FirstMatch,
}

impl Default for GroupingStrategy {
    fn default() -> Self {
        GroupingStrategy::Transitive
    }
}

/// First group id handed out per trend type.
pub fn group_id_base(trend_type: TrendType) -> u32 {
    match trend_type {
        TrendType::Resistance => 1000,
        TrendType::Support => 2000,
    }
}

/// Thresholds of the duplicate relation.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateThresholds {
    pub last_price: f64,
    pub slope: f64,
}

impl DuplicateThresholds {
    /// Same breakout flag, close projected last price and close slope.
    #[inline]
    pub fn matches(&self, a: &Trendline, b: &Trendline) -> bool {
        (a.price_at_last - b.price_at_last).abs() < self.last_price
            && (a.slope - b.slope).abs() < self.slope
            && a.is_breakout == b.is_breakout
    }
}

/// 标记重复趋势线
///
/// Assigns `duplicate_group_id`, `is_best_of_group`, `overall_rank` and
/// `rank_within_group` on trendlines of a single trend type. The slice must
/// be in generation order; it is not reordered. Ties on score go to the
/// trendline generated first.
pub fn mark_duplicates(
    trendlines: &mut [Trendline],
    trend_type: TrendType,
    thresholds: DuplicateThresholds,
    strategy: GroupingStrategy,
) {
    for tl in trendlines.iter_mut() {
        tl.duplicate_group_id = None;
        tl.is_best_of_group = false;
        tl.overall_rank = None;
        tl.rank_within_group = 0;
    }
    if trendlines.is_empty() {
        return;
    }

    let n = trendlines.len();
    let mut set = DisjointSet::new(n);
    match strategy {
        GroupingStrategy::Transitive => {
            for i in 0..n {
                for j in i + 1..n {
                    if thresholds.matches(&trendlines[i], &trendlines[j]) {
                        set.union(i, j);
                    }
                }
            }
        }
        GroupingStrategy::FirstMatch => {
            for i in 0..n {
                let first = (0..n).find(|&j| j != i && thresholds.matches(&trendlines[i], &trendlines[j]));
                if let Some(j) = first {
                    set.union(i, j);
                }
            }
        }
    }

    // group ids follow the position of each group's earliest member
    let base = group_id_base(trend_type);
    let mut ids: HashMap<usize, u32> = HashMap::new();
    let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for i in 0..n {
        let root = set.find(i);
        let next = base + ids.len() as u32;
        let gid = *ids.entry(root).or_insert(next);
        trendlines[i].duplicate_group_id = Some(gid);
        groups.entry(gid).or_insert_with(Vec::new).push(i);
    }

    let mut best = Vec::with_capacity(groups.len());
    for members in groups.values_mut() {
        members.sort_by(|&a, &b| by_score_desc(&trendlines[a], &trendlines[b]));
        for (rank, &idx) in members.iter().enumerate() {
            trendlines[idx].rank_within_group = rank + 1;
        }
        trendlines[members[0]].is_best_of_group = true;
        best.push(members[0]);
    }

    best.sort_by(|&a, &b| by_score_desc(&trendlines[a], &trendlines[b]).then(a.cmp(&b)));
    for (rank, &idx) in best.iter().enumerate() {
        trendlines[idx].overall_rank = Some(rank + 1);
    }
}

/// Descending score, NaN last.
pub fn by_score_desc(a: &Trendline, b: &Trendline) -> Ordering {
    rank_key(b.score)
        .partial_cmp(&rank_key(a.score))
        .unwrap_or(Ordering::Equal)
}

#[inline]
fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Union-find over list indices.
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            Ordering::Less => self.parent[ra] = rb,
            Ordering::Greater => self.parent[rb] = ra,
            Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}
