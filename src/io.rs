//! Record and report serialization
//!
//! Batches are stored as JSON arrays of records. Readers and writers
//! are buffered; errors carry the underlying I/O or JSON cause.

use dedupe_core::{Record, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read a record batch from a JSON array file.
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)?;
    let records = serde_json::from_reader(BufReader::new(file))?;
    Ok(records)
}

/// Write a record batch as a pretty-printed JSON array.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    write_json(path, &records)
}

/// Write any serializable payload as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, payload: &T) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), payload)?;
    Ok(())
}
