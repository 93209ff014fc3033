//! OurAirports CSV datasets.
//!
//! This module reads the `airports.csv` and `runways.csv` exports published by
//! OurAirports and provides the normalizers turning them into compact JSON
//! documents: a list of airport tuples and a mapping from airport code to
//! runways.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use serde::Serialize;

use crate::{Error, Result};

pub mod airport;
pub mod runway;
pub mod surface;

/**
 * One CSV row, keyed by column name.
 *
 * A missing column and an empty cell read the same: both yield `""`.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    /// Pair a row with the header it was read under.
    ///
    /// Short rows leave the trailing columns absent, extra cells are dropped.
    pub fn from_row(headers: &[String], row: &StringRecord) -> Self {
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();
        RawRecord { fields }
    }

    /// Raw value of a column, `""` when absent.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value of a column, `None` when absent or blank.
    pub fn get_trimmed(&self, field: &str) -> Option<&str> {
        Some(self.get(field).trim()).filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawRecord {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Iterator over the rows of a CSV export with a header line.
///
/// Rows the CSV parser cannot decode (invalid UTF-8 for instance) are skipped
/// with a warning. An I/O error on the underlying reader ends the iteration.
pub struct RecordReader<R> {
    headers: Vec<String>,
    records: StringRecordsIntoIter<R>,
}

impl<R: io::Read> RecordReader<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        Ok(RecordReader {
            headers,
            records: reader.into_records(),
        })
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|header| header == name)
    }
}

impl RecordReader<File> {
    /// Open a CSV file, failing with [`Error::MissingInput`] if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }
        Self::from_reader(File::open(path)?)
    }
}

impl<R: io::Read> Iterator for RecordReader<R> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        loop {
            match self.records.next()? {
                Ok(row) => return Some(RawRecord::from_row(&self.headers, &row)),
                Err(e) if e.is_io_error() => {
                    tracing::warn!("Stopping CSV read: {}", e);
                    return None;
                }
                Err(e) => tracing::warn!("Skipping malformed CSV row: {}", e),
            }
        }
    }
}

/// Write a document as compact JSON, creating parent directories as needed.
///
/// Returns the size of the written file in bytes.
pub fn write_compact<T: Serialize, P: AsRef<Path>>(document: &T, path: P) -> Result<u64> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, document)?;
    writer.flush()?;
    Ok(fs::metadata(path)?.len())
}
