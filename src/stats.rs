use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::analyzers::utility::{avg2, bucket_index};
use crate::parser::parse_csv;

/// Number of buckets in the fixed width-10 histogram.
pub const BUCKET_COUNT: usize = 10;

pub const SCORE_BUCKET_LABELS: [&str; BUCKET_COUNT] = [
    "0–10", "10–20", "20–30", "30–40", "40–50", "50–60", "60–70", "70–80", "80–90", "90–100",
];

/// Aggregate for one direction. Only strictly positive scores contribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectionStats {
    pub count: usize,
    pub sum: f64,
    pub avg: f64,
}

/// One candidate: its code and a score for every direction in the header.
///
/// Scores are kept in header order so that sums over a row always add up in
/// the same sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    pub code: String,
    pub scores: Vec<(String, f64)>,
}

impl Row {
    /// Score for `direction`, 0.0 when the direction is unknown.
    pub fn score(&self, direction: &str) -> f64 {
        self.scores
            .iter()
            .find(|(name, _)| name == direction)
            .map_or(0.0, |(_, score)| *score)
    }

    /// Sets the score for `direction`. A repeated header name overwrites the
    /// earlier value in place.
    fn set_score(&mut self, direction: &str, score: f64) {
        match self.scores.iter_mut().find(|(name, _)| name == direction) {
            Some((_, slot)) => *slot = score,
            None => self.scores.push((direction.to_string(), score)),
        }
    }
}

/// Snapshot of everything computed from one CSV load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsData {
    pub loaded_at: DateTime<Utc>,
    pub directions: HashMap<String, DirectionStats>,
    pub direction_names: Vec<String>,
    pub score_buckets_by_direction: HashMap<String, [usize; BUCKET_COUNT]>,
    pub total_rows: usize,
    pub rows_with_any_score: usize,
    pub global_avg: f64,
    #[serde(skip)]
    pub rows: Vec<Row>,
}

impl StatsData {
    /// Zero-valued snapshot with no directions.
    pub fn empty() -> Self {
        StatsData {
            loaded_at: Utc::now(),
            ..Default::default()
        }
    }

    /// Parses `text` and aggregates it.
    pub fn from_csv(text: &str) -> Self {
        Self::from_rows(&parse_csv(text))
    }

    /// Aggregates parsed rows. Row 0 is the header; its first cell is ignored
    /// and the remaining cells name the directions.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        if rows.len() < 2 {
            return Self::empty();
        }

        let direction_names: Vec<String> = rows[0].iter().skip(1).cloned().collect();

        let mut totals: HashMap<&str, (usize, f64)> = HashMap::new();
        let mut buckets: HashMap<String, [usize; BUCKET_COUNT]> = HashMap::new();
        for name in &direction_names {
            totals.insert(name.as_str(), (0, 0.0));
            buckets.insert(name.clone(), [0; BUCKET_COUNT]);
        }

        let mut rows_with_any_score = 0;
        let mut global_sum = 0.0;
        let mut global_count = 0usize;
        let mut parsed = Vec::with_capacity(rows.len() - 1);

        for cells in &rows[1..] {
            let mut row = Row {
                code: cells.first().cloned().unwrap_or_default(),
                scores: Vec::with_capacity(direction_names.len()),
            };
            let mut has_any = false;

            for (c, name) in direction_names.iter().enumerate() {
                let score = cells.get(c + 1).map_or(0.0, |cell| parse_score(cell));
                row.set_score(name, score);
                if score == 0.0 {
                    continue;
                }

                if let Some((count, sum)) = totals.get_mut(name.as_str()) {
                    *count += 1;
                    *sum += score;
                }
                if let Some(b) = buckets.get_mut(name) {
                    b[bucket_index(score, 10, BUCKET_COUNT)] += 1;
                }
                has_any = true;
                global_sum += score;
                global_count += 1;
            }

            if has_any {
                rows_with_any_score += 1;
            }

            parsed.push(row);
        }

        let directions = totals
            .into_iter()
            .map(|(name, (count, sum))| {
                (
                    name.to_string(),
                    DirectionStats {
                        count,
                        sum,
                        avg: avg2(sum, count),
                    },
                )
            })
            .collect();

        StatsData {
            loaded_at: Utc::now(),
            directions,
            direction_names,
            score_buckets_by_direction: buckets,
            total_rows: rows.len() - 1,
            rows_with_any_score,
            global_avg: avg2(global_sum, global_count),
            rows: parsed,
        }
    }

    pub fn direction(&self, name: &str) -> Option<&DirectionStats> {
        self.directions.get(name)
    }
}

/// Reads a score cell. Empty, unparseable, non-finite and non-positive cells
/// all become 0.0, which the aggregates treat as "no score".
///
/// Like a lenient float reader, the longest numeric prefix is used, so
/// `"42pts"` reads as 42. `"Infinity"` and overflowing values such as `1e400`
/// are not scores and read as 0.0.
pub fn parse_score(cell: &str) -> f64 {
    let prefix = numeric_prefix(cell.trim_start());
    match prefix.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n,
        _ => 0.0,
    }
}

fn numeric_prefix(s: &str) -> &str {
    let b = s.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return "";
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    &s[..i]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "id,Backend - Python,Frontend\na,55,0\nb,,30\nc,100,100\n";

    #[test]
    fn test_parse_score_plain() {
        assert_eq!(parse_score("42"), 42.0);
        assert_eq!(parse_score("12.5"), 12.5);
        assert_eq!(parse_score(".5"), 0.5);
        assert_eq!(parse_score("1e1"), 10.0);
    }

    #[test]
    fn test_parse_score_prefix() {
        assert_eq!(parse_score("42pts"), 42.0);
        assert_eq!(parse_score("7.abc"), 7.0);
        assert_eq!(parse_score("3e"), 3.0);
    }

    #[test]
    fn test_parse_score_absent_values() {
        assert_eq!(parse_score(""), 0.0);
        assert_eq!(parse_score("n/a"), 0.0);
        assert_eq!(parse_score("0"), 0.0);
        assert_eq!(parse_score("-15"), 0.0);
        assert_eq!(parse_score("."), 0.0);
        assert_eq!(parse_score("-"), 0.0);
        assert_eq!(parse_score("Infinity"), 0.0);
        assert_eq!(parse_score("1e400"), 0.0);
    }

    #[test]
    fn test_from_csv_example() {
        let data = StatsData::from_csv(SAMPLE);

        assert_eq!(data.direction_names, vec!["Backend - Python", "Frontend"]);
        assert_eq!(data.total_rows, 3);
        assert_eq!(data.rows_with_any_score, 3);

        let py = data.direction("Backend - Python").unwrap();
        assert_eq!(py.count, 2);
        assert_eq!(py.sum, 155.0);
        assert_eq!(py.avg, 77.5);

        let fe = data.direction("Frontend").unwrap();
        assert_eq!(fe.count, 2);
        assert_eq!(fe.sum, 130.0);
        assert_eq!(fe.avg, 65.0);

        assert_eq!(data.global_avg, 71.25);
    }

    #[test]
    fn test_from_csv_buckets() {
        let data = StatsData::from_csv(SAMPLE);
        let py = data.score_buckets_by_direction["Backend - Python"];
        assert_eq!(py[5], 1);
        assert_eq!(py[9], 1);

        for name in &data.direction_names {
            let total: usize = data.score_buckets_by_direction[name].iter().sum();
            assert_eq!(total, data.directions[name].count);
        }
    }

    #[test]
    fn test_rows_keep_every_direction() {
        let data = StatsData::from_csv(SAMPLE);
        assert_eq!(data.rows.len(), 3);
        let b = &data.rows[1];
        assert_eq!(b.code, "b");
        assert_eq!(b.scores.len(), 2);
        assert_eq!(b.score("Backend - Python"), 0.0);
        assert_eq!(b.score("Frontend"), 30.0);
    }

    #[test]
    fn test_ragged_row_is_tolerated() {
        let data = StatsData::from_csv("id,ML,Frontend\nx,20\ny\n");
        assert_eq!(data.total_rows, 2);
        assert_eq!(data.rows_with_any_score, 1);
        assert_eq!(data.rows[0].score("Frontend"), 0.0);
        assert_eq!(data.rows[1].scores.len(), 2);
        assert_eq!(data.directions["ML"].count, 1);
    }

    #[test]
    fn test_scores_follow_header_order() {
        let data = StatsData::from_csv("id,C,A,B,A\nx,1,2,3,4\n");
        let names: Vec<_> = data.rows[0].scores.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(data.rows[0].score("A"), 4.0);
    }

    #[test]
    fn test_header_only_is_empty() {
        let data = StatsData::from_csv("id,ML\n");
        assert_eq!(data.total_rows, 0);
        assert_eq!(data.rows_with_any_score, 0);
        assert_eq!(data.global_avg, 0.0);
        assert!(data.directions.is_empty());
        assert!(data.direction_names.is_empty());
    }

    #[test]
    fn test_zero_count_direction_has_zero_avg() {
        let data = StatsData::from_csv("id,ML\na,0\nb,oops\n");
        assert_eq!(data.directions["ML"], DirectionStats::default());
        assert_eq!(data.rows_with_any_score, 0);
    }
}
