//! Holder for the current [`StatsData`] snapshot and the queries the
//! dashboard runs against it.
//!
//! A load either replaces the snapshot wholesale or clears it and records
//! the error. Queries are recomputed from the snapshot on every call and
//! return empty results while nothing is loaded.

use anyhow::Error;
use tracing::{error, info};

use crate::analyzers::aggregate;
use crate::analyzers::buckets;
use crate::analyzers::groups::GroupKey;
use crate::analyzers::ranking;
use crate::analyzers::types::{DirectionEntry, GroupAggregate, RankInfo, RankedRow, ScoreBucket};
use crate::fetch::{HttpClient, load_source};
use crate::stats::{Row, StatsData};

#[derive(Debug, Default)]
pub struct StatsStore {
    data: Option<StatsData>,
    error: Option<Error>,
    version: u64,
}

impl StatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&StatsData> {
        self.data.as_ref()
    }

    /// Error from the most recent load, if it failed.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Incremented on every load attempt, successful or not.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Fetches `source`, parses and aggregates it.
    ///
    /// On failure the snapshot is cleared, the error is kept for
    /// [`error`](Self::error) and `None` is returned. There is no retry.
    #[tracing::instrument(skip(self, client))]
    pub async fn load<C: HttpClient>(&mut self, client: &C, source: &str) -> Option<&StatsData> {
        match load_source(client, source).await {
            Ok(text) => Some(self.load_text(&text)),
            Err(e) => {
                error!(error = %e, "Failed to load stats source");
                self.data = None;
                self.error = Some(e);
                self.version += 1;
                None
            }
        }
    }

    /// Replaces the snapshot with the aggregate of already fetched text.
    pub fn load_text(&mut self, text: &str) -> &StatsData {
        let data = StatsData::from_csv(text);
        info!(
            total_rows = data.total_rows,
            rows_with_any_score = data.rows_with_any_score,
            directions = data.direction_names.len(),
            global_avg = data.global_avg,
            "Stats loaded"
        );

        self.error = None;
        self.version += 1;
        self.data.insert(data)
    }

    pub fn direction_stats_list(&self) -> Vec<DirectionEntry> {
        self.data
            .as_ref()
            .map(aggregate::direction_stats_list)
            .unwrap_or_default()
    }

    pub fn direction_stats_list_grouped(&self) -> Vec<DirectionEntry> {
        self.data
            .as_ref()
            .map(aggregate::direction_stats_list_grouped)
            .unwrap_or_default()
    }

    pub fn direction_stats_for_group(&self, key: GroupKey) -> Vec<DirectionEntry> {
        self.data
            .as_ref()
            .map(|d| aggregate::direction_stats_for_group(d, key))
            .unwrap_or_default()
    }

    pub fn group_aggregate(&self, key: GroupKey) -> Option<GroupAggregate> {
        self.data
            .as_ref()
            .and_then(|d| aggregate::group_aggregate(d, key))
    }

    /// Histogram for the group; `step` other than 5 or 2 means 10.
    pub fn score_buckets_for_group(&self, key: GroupKey, step: usize) -> Vec<ScoreBucket> {
        self.data
            .as_ref()
            .map(|d| buckets::score_buckets_for_group(d, key, step))
            .unwrap_or_default()
    }

    pub fn get_row_by_code(&self, code: &str) -> Option<&Row> {
        self.data
            .as_ref()
            .and_then(|d| ranking::get_row_by_code(d, code))
    }

    pub fn get_rank_info(&self, code: &str) -> Option<RankInfo> {
        self.data
            .as_ref()
            .and_then(|d| ranking::get_rank_info(d, code))
    }

    pub fn ranked_rows(&self) -> Vec<RankedRow> {
        self.data
            .as_ref()
            .map(ranking::ranked_rows)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::StubClient;

    const SAMPLE: &str = "id,Backend - Python,Frontend\na,55,0\nb,,30\nc,100,100\n";

    #[test]
    fn test_unloaded_store_is_empty() {
        let store = StatsStore::new();
        assert!(store.data().is_none());
        assert!(store.error().is_none());
        assert_eq!(store.version(), 0);
        assert!(store.direction_stats_list().is_empty());
        assert!(store.direction_stats_list_grouped().is_empty());
        assert!(store.direction_stats_for_group(GroupKey::Backend).is_empty());
        assert!(store.group_aggregate(GroupKey::Backend).is_none());
        assert!(store.score_buckets_for_group(GroupKey::Ml, 10).is_empty());
        assert!(store.get_row_by_code("a").is_none());
        assert!(store.get_rank_info("a").is_none());
        assert!(store.ranked_rows().is_empty());
    }

    #[test]
    fn test_load_text_queries() {
        let mut store = StatsStore::new();
        store.load_text(SAMPLE);

        assert_eq!(store.version(), 1);
        assert_eq!(store.direction_stats_list().len(), 2);
        let grouped = store.direction_stats_list_grouped();
        assert_eq!(grouped[0].name, "Backend");
        assert_eq!(grouped[0].children.len(), 1);
        assert_eq!(store.group_aggregate(GroupKey::Frontend).unwrap().avg, 65.0);
        assert_eq!(store.score_buckets_for_group(GroupKey::Frontend, 5).len(), 20);
        assert_eq!(store.get_row_by_code("A").unwrap().code, "a");
        assert_eq!(store.get_rank_info("c").unwrap().rank, 1);
    }

    #[tokio::test]
    async fn test_load_from_http() {
        let client = StubClient {
            status: 200,
            body: SAMPLE.as_bytes().to_vec(),
        };
        let mut store = StatsStore::new();
        let data = store.load(&client, "https://example.org/data.csv").await.unwrap();
        assert_eq!(data.total_rows, 3);
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_load_clears_snapshot() {
        let mut store = StatsStore::new();
        store.load_text(SAMPLE);

        let client = StubClient {
            status: 404,
            body: Vec::new(),
        };
        assert!(store.load(&client, "https://example.org/data.csv").await.is_none());
        assert!(store.data().is_none());
        assert!(store.error().is_some());
        assert_eq!(store.version(), 2);
        assert!(store.get_rank_info("c").is_none());

        store.load_text(SAMPLE);
        assert!(store.error().is_none());
        assert_eq!(store.version(), 3);
    }
}
