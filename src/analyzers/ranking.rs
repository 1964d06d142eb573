//! Ranking of candidates by total score against a fixed number of pass slots.

use std::ptr;

use crate::analyzers::types::{RankInfo, RankedRow};
use crate::analyzers::utility::{percent1, round2};
use crate::stats::{Row, StatsData};

/// Ranks up to and including this value pass.
pub const PASS_SLOTS: usize = 300;

/// Sum of every direction score of the row, added in header order. Zero
/// scores contribute nothing.
pub fn total_score_for_row(row: &Row) -> f64 {
    row.scores.iter().map(|(_, score)| score).sum()
}

/// Rows with their totals, best first. Equal totals keep input order.
pub fn rank_order(data: &StatsData) -> Vec<(&Row, f64)> {
    let mut ranked: Vec<(&Row, f64)> = data
        .rows
        .iter()
        .map(|row| (row, total_score_for_row(row)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Case-insensitive lookup: exact code match first, then the first code that
/// contains the query.
pub fn get_row_by_code<'a>(data: &'a StatsData, query: &str) -> Option<&'a Row> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || data.rows.is_empty() {
        return None;
    }

    data.rows
        .iter()
        .find(|row| row.code.trim().to_lowercase() == needle)
        .or_else(|| {
            data.rows
                .iter()
                .find(|row| row.code.to_lowercase().contains(&needle))
        })
}

pub fn get_rank_info(data: &StatsData, code: &str) -> Option<RankInfo> {
    let row = get_row_by_code(data, code)?;
    let ranked = rank_order(data);
    let position = ranked.iter().position(|(r, _)| ptr::eq(*r, row))?;

    let rank = position + 1;
    let total_participants = ranked.len();
    Some(RankInfo {
        rank,
        total_score: round2(ranked[position].1),
        passes: rank <= PASS_SLOTS,
        total_participants,
        pass_slots: PASS_SLOTS,
        pass_percent: percent1(PASS_SLOTS, total_participants),
    })
}

/// The full ranking, one record per row.
pub fn ranked_rows(data: &StatsData) -> Vec<RankedRow> {
    rank_order(data)
        .into_iter()
        .enumerate()
        .map(|(i, (row, total))| RankedRow {
            rank: i + 1,
            code: row.code.clone(),
            total_score: round2(total),
            passes: i < PASS_SLOTS,
        })
        .collect()
}
