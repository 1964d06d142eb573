//! Views derived from a loaded [`StatsData`](crate::stats::StatsData).
//!
//! Every function here is a pure read of the snapshot: direction listings,
//! group aggregates, histograms at 10/5/2 point widths and the ranking.

pub mod aggregate;
pub mod buckets;
pub mod groups;
pub mod ranking;
pub mod types;
pub mod utility;
