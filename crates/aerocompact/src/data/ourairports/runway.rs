use std::collections::BTreeMap;
use std::path::Path;

use serde::{Serialize, Serializer};

use super::surface::{SurfaceCategory, SurfaceReport};
use super::{write_compact, RawRecord, RecordReader};
use crate::data::fields::{parse_float, parse_int, round_to};

/// One of the two physical directions of a runway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunwaySide {
    /// Low end, `le_` columns
    Low,
    /// High end, `he_` columns
    High,
}

impl RunwaySide {
    pub fn prefix(&self) -> &'static str {
        match self {
            RunwaySide::Low => "le",
            RunwaySide::High => "he",
        }
    }
}

/**
 * One end of a runway.
 *
 * Only the identifier is mandatory, every other field is omitted from the
 * output when unknown.
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunwayEnd {
    /// Runway designator for this direction, e.g. `04L`
    #[serde(rename = "id")]
    pub ident: String,
    /// Threshold latitude, rounded to 6 decimals
    #[serde(rename = "lat", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Threshold longitude, rounded to 6 decimals
    #[serde(rename = "lon", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Threshold elevation in feet
    #[serde(rename = "elev", skip_serializing_if = "Option::is_none")]
    pub elevation: Option<i64>,
    /// True heading in degrees, rounded to 1 decimal
    #[serde(rename = "hdg", skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    /// Displaced threshold in feet, always positive
    #[serde(rename = "dt", skip_serializing_if = "Option::is_none")]
    pub displaced_threshold: Option<i64>,
}

/**
 * A runway as exported in the runway document.
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunwayRecord {
    /// Length in feet, never zero
    #[serde(rename = "l", skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    /// Width in feet, never zero
    #[serde(rename = "w", skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub surface: Option<SurfaceCategory>,
    #[serde(rename = "lit", skip_serializing_if = "is_false", serialize_with = "serialize_flag")]
    pub lighted: bool,
    #[serde(rename = "cls", skip_serializing_if = "is_false", serialize_with = "serialize_flag")]
    pub closed: bool,
    #[serde(rename = "le", skip_serializing_if = "Option::is_none")]
    pub low_end: Option<RunwayEnd>,
    #[serde(rename = "he", skip_serializing_if = "Option::is_none")]
    pub high_end: Option<RunwayEnd>,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

// flags only ever appear as `1`
fn serialize_flag<S: Serializer>(_flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(1)
}

/// Build one end of a runway from the columns prefixed for that side.
///
/// Returns `None` when the side has no identifier, whatever the other
/// columns hold.
pub fn build_runway_end(record: &RawRecord, side: RunwaySide) -> Option<RunwayEnd> {
    let prefix = side.prefix();
    let column = |name: &str| record.get(&format!("{prefix}_{name}")).to_string();

    let ident = column("ident").trim().to_string();
    if ident.is_empty() {
        return None;
    }

    Some(RunwayEnd {
        ident,
        latitude: parse_float(&column("latitude_deg")).map(|lat| round_to(lat, 6)),
        longitude: parse_float(&column("longitude_deg")).map(|lon| round_to(lon, 6)),
        elevation: parse_int(&column("elevation_ft")),
        heading: parse_float(&column("heading_degT")).map(|hdg| round_to(hdg, 1)),
        displaced_threshold: parse_int(&column("displaced_threshold_ft")).filter(|dt| *dt > 0),
    })
}

/// Build a runway from a CSV row, along with the airport code it belongs to.
///
/// Rows without an airport code or without any identified end yield `None`.
/// Surface descriptions that cannot be categorized are recorded in `report`
/// as soon as the row has an airport code.
pub fn assemble_runway(record: &RawRecord, report: &mut SurfaceReport) -> Option<(String, RunwayRecord)> {
    let code = record.get_trimmed("airport_ident")?.to_string();

    let runway = RunwayRecord {
        length: parse_int(record.get("length_ft")).filter(|length| *length != 0),
        width: parse_int(record.get("width_ft")).filter(|width| *width != 0),
        surface: report.categorize(record.get("surface")),
        lighted: record.get("lighted") == "1",
        closed: record.get("closed") == "1",
        low_end: build_runway_end(record, RunwaySide::Low),
        high_end: build_runway_end(record, RunwaySide::High),
    };

    if runway.low_end.is_none() && runway.high_end.is_none() {
        tracing::debug!("Skipping runway at '{}': no identified end", code);
        return None;
    }
    Some((code, runway))
}

/**
 * Runways grouped by airport code.
 *
 * Codes are kept sorted; runways of one airport stay in input order.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunwayDocument {
    airports: BTreeMap<String, Vec<RunwayRecord>>,
}

impl RunwayDocument {
    pub fn push(&mut self, code: String, runway: RunwayRecord) {
        self.airports.entry(code).or_default().push(runway);
    }

    pub fn get(&self, code: &str) -> Option<&[RunwayRecord]> {
        self.airports.get(code).map(Vec::as_slice)
    }

    /// Airport codes, in output order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.airports.keys().map(String::as_str)
    }

    /// Number of airports with at least one runway.
    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn runway_count(&self) -> usize {
        self.airports.values().map(Vec::len).sum()
    }
}

impl Serialize for RunwayDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.airports.serialize(serializer)
    }
}

/// Normalize all rows of a runway export.
pub fn normalize_runways<I>(records: I) -> (RunwayDocument, SurfaceReport)
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut document = RunwayDocument::default();
    let mut report = SurfaceReport::default();
    let mut rows = 0;

    for record in records {
        rows += 1;
        if let Some((code, runway)) = assemble_runway(&record, &mut report) {
            document.push(code, runway);
        }
    }

    tracing::info!(
        "Kept {} runways at {} airports out of {} rows",
        document.runway_count(),
        document.airport_count(),
        rows
    );
    if !report.is_empty() {
        tracing::info!("{} unidentified surface descriptions", report.len());
    }
    (document, report)
}

/// Convert a runway CSV file into the runway document.
///
/// Returns the document, the unidentified surfaces and the output size in bytes.
pub fn convert_runways_file<P, Q>(input: P, output: Q) -> crate::Result<(RunwayDocument, SurfaceReport, u64)>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let reader = RecordReader::open(input)?;
    let (document, report) = normalize_runways(reader);
    let size = write_compact(&document, output)?;
    Ok((document, report, size))
}
