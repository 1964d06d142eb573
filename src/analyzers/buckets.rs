//! Histogram view over a group of directions.

use crate::analyzers::groups::GroupKey;
use crate::analyzers::types::ScoreBucket;
use crate::analyzers::utility::bucket_index;
use crate::stats::{BUCKET_COUNT, StatsData};

/// Bucket widths other than 5 and 2 fall back to 10.
pub fn normalize_step(step: usize) -> usize {
    match step {
        5 | 2 => step,
        _ => 10,
    }
}

/// Labels `"0–w"`, `"w–2w"`, ... up to 100 for a normalized width.
pub fn bucket_labels(width: usize) -> Vec<String> {
    (0..100 / width)
        .map(|i| format!("{}–{}", i * width, (i + 1) * width))
        .collect()
}

/// Histogram of every score in the group, merged across its directions.
///
/// Width 10 sums the histograms computed at load time; narrower widths are
/// rebuilt from the per-row scores.
pub fn score_buckets_for_group(data: &StatsData, key: GroupKey, step: usize) -> Vec<ScoreBucket> {
    let width = normalize_step(step);
    let labels = bucket_labels(width);
    let mut counts = vec![0usize; labels.len()];

    if width == 10 {
        for buckets in key
            .members()
            .iter()
            .filter_map(|name| data.score_buckets_by_direction.get(*name))
        {
            for (merged, n) in counts.iter_mut().zip(buckets.iter().take(BUCKET_COUNT)) {
                *merged += n;
            }
        }
    } else {
        for row in &data.rows {
            for name in key.members() {
                let score = row.score(name);
                if score > 0.0 {
                    counts[bucket_index(score, width, labels.len())] += 1;
                }
            }
        }
    }

    labels
        .into_iter()
        .zip(counts)
        .enumerate()
        .map(|(range_index, (range, count))| ScoreBucket {
            range,
            range_index,
            count,
        })
        .collect()
}
