//! Output of computed views: log lines and the ranking CSV.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::File;
use std::io::Write;
use tracing::{debug, info};

use crate::analyzers::types::RankedRow;

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes the ranking to `path` as CSV with a header row, replacing any
/// existing file. Paths ending in `.gz` are gzip-compressed.
pub fn write_ranking(path: &str, rows: &[RankedRow]) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing ranking CSV");
    let file = File::create(path).with_context(|| format!("failed to create {path}"))?;

    if path.ends_with(".gz") {
        let mut encoder = GzEncoder::new(file, Compression::default());
        write_rows(&mut encoder, rows)?;
        encoder.finish()?;
    } else {
        write_rows(file, rows)?;
    }

    Ok(())
}

fn write_rows<W: Write>(out: W, rows: &[RankedRow]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
