//! Result types produced by the derived views.

use serde::Serialize;

/// A direction (or the synthetic "Backend" entry) in a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionEntry {
    pub name: String,
    pub count: usize,
    pub sum: f64,
    pub avg: f64,
    /// Member directions, only set on the collapsed backend entry.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DirectionEntry>,
}

/// Combined statistics across every direction of a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate {
    pub count: usize,
    pub sum: f64,
    pub avg: f64,
}

/// One labeled histogram cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBucket {
    pub range: String,
    pub range_index: usize,
    pub count: usize,
}

/// Where a candidate stands in the overall ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankInfo {
    pub rank: usize,
    pub total_score: f64,
    pub passes: bool,
    pub total_participants: usize,
    pub pass_slots: usize,
    pub pass_percent: f64,
}

/// A single line of the exported ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub code: String,
    pub total_score: f64,
    pub passes: bool,
}
