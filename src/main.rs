//! CLI entry point for direction_stats.
//!
//! Loads the score CSV from a file or URL and prints the dashboard views:
//! overall summary, per-group statistics and histograms, and candidate ranks.

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use direction_stats::{
    GroupKey, PASS_SLOTS, StatsStore,
    config::Settings,
    fetch::BasicClient,
    output::{print_json, print_pretty, write_ranking},
};
use serde_json::json;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "direction_stats")]
#[command(about = "Descriptive statistics over per-direction candidate scores", long_about = None)]
struct Cli {
    /// Path or URL of the score CSV (defaults to $STATS_SOURCE, then data.csv)
    #[arg(short, long, global = true, value_name = "FILE_OR_URL")]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Totals and the direction listing with backend collapsed
    Summary,
    /// Statistics and histogram for one group of directions
    Group {
        /// backend, frontend, ios, android or ml
        key: GroupKey,

        /// Histogram bucket width: 10, 5 or 2 (anything else means 10)
        #[arg(long, default_value_t = 10)]
        step: usize,
    },
    /// Rank of a candidate against the pass slots
    Rank {
        /// Candidate code, or a fragment of it
        code: String,
    },
    /// Write the full ranking as CSV
    ExportRanking {
        /// Output file; a .gz suffix compresses it
        #[arg(short, long, default_value = "ranking.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&settings.log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&settings.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("direction_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let source = cli.source.unwrap_or(settings.source);

    let mut store = StatsStore::new();
    if store.load(&BasicClient::new(), &source).await.is_none() {
        return Err(store
            .error()
            .map(|e| anyhow!("{e:#}"))
            .unwrap_or_else(|| anyhow!("failed to load {source}")));
    }
    if let Some(data) = store.data() {
        print_pretty(data);
    }

    match cli.command {
        Commands::Summary => {
            if let Some(data) = store.data() {
                print_json(&json!({
                    "total_rows": data.total_rows,
                    "rows_with_any_score": data.rows_with_any_score,
                    "global_avg": data.global_avg,
                    "directions": store.direction_stats_list_grouped(),
                }))?;
            }
        }
        Commands::Group { key, step } => {
            print_json(&json!({
                "group": key,
                "directions": store.direction_stats_for_group(key),
                "aggregate": store.group_aggregate(key),
                "buckets": store.score_buckets_for_group(key, step),
            }))?;
        }
        Commands::Rank { code } => match store.get_rank_info(&code) {
            Some(rank) => print_json(&rank)?,
            None => warn!(code = %code, "No candidate matches this code"),
        },
        Commands::ExportRanking { output } => {
            let rows = store.ranked_rows();
            write_ranking(&output, &rows)?;
            info!(
                output = %output,
                rows = rows.len(),
                pass_slots = PASS_SLOTS,
                "Ranking exported"
            );
        }
    }

    Ok(())
}
