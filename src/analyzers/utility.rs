/// Rounds half up on the scaled value: `floor(value * 100 + 0.5) / 100`.
///
/// Ties always go towards positive infinity, so `-1.005` style inputs do not
/// round away from zero the way [`f64::round`] would.
pub fn round2(value: f64) -> f64 {
    round_scaled(value, 100.0)
}

fn round_scaled(value: f64, scale: f64) -> f64 {
    (value * scale + 0.5).floor() / scale
}

/// `part / whole` as a percentage with one decimal. Returns 0.0 when `whole`
/// is zero.
pub fn percent1(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64 * 1000.0 + 0.5).floor() / 10.0
    }
}

/// Average of `sum` over `count` rounded to two decimals. Returns 0.0 when
/// `count` is zero.
pub fn avg2(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        round2(sum / count as f64)
    }
}

/// Index of the bucket a positive score falls into, clamped to the last one.
pub fn bucket_index(score: f64, width: usize, buckets: usize) -> usize {
    let idx = (score / width as f64).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(buckets - 1)
    }
}
