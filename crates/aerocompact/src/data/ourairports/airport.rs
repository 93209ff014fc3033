use std::path::Path;

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

use super::{write_compact, RawRecord, RecordReader};
use crate::data::fields::{parse_float, parse_int};

/**
 * An airport as exported in the compact airport list.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct AirportEntry {
    /// ICAO code, or the OurAirports identifier when there is none
    pub code: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    pub name: String,
    /// Elevation in feet, if known
    pub elevation: Option<i64>,
}

/// What to do with an airport whose `elevation_ft` cell does not parse.
///
/// Runway fields always degrade to absent. For airports the default is to
/// drop the row, since a garbled elevation usually means a garbled row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElevationPolicy {
    /// Reject the airport
    #[default]
    Strict,
    /// Keep the airport without elevation
    Lenient,
}

/// Shape of the tuples in the airport list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AirportFormat {
    /// `[code, lat, lon, name]`
    #[default]
    Compact,
    /// `[code, lat, lon, name, elevation_ft | null]`
    WithElevation,
}

impl AirportFormat {
    /// Pick the format from the columns available in the input.
    pub fn from_columns(has_elevation: bool) -> Self {
        if has_elevation {
            AirportFormat::WithElevation
        } else {
            AirportFormat::Compact
        }
    }
}

/// Build an airport entry from a CSV row, `None` if the row is not usable.
pub fn normalize_airport(record: &RawRecord, policy: ElevationPolicy) -> Option<AirportEntry> {
    let code = record.get_trimmed("icao_code").or_else(|| record.get_trimmed("ident"))?;

    let (Some(lat), Some(lon), Some(name)) = (
        record.get_trimmed("latitude_deg"),
        record.get_trimmed("longitude_deg"),
        record.get_trimmed("name"),
    ) else {
        tracing::debug!("Skipping airport '{}': missing coordinates or name", code);
        return None;
    };

    let (Some(latitude), Some(longitude)) = (parse_float(lat), parse_float(lon)) else {
        tracing::debug!("Skipping airport '{}': invalid coordinates ({}, {})", code, lat, lon);
        return None;
    };

    let elevation = match record.get_trimmed("elevation_ft") {
        None => None,
        Some(raw) => match (parse_int(raw), policy) {
            (Some(elevation), _) => Some(elevation),
            (None, ElevationPolicy::Lenient) => None,
            (None, ElevationPolicy::Strict) => {
                tracing::debug!("Skipping airport '{}': invalid elevation '{}'", code, raw);
                return None;
            }
        },
    };

    Some(AirportEntry {
        code: code.to_string(),
        latitude,
        longitude,
        name: name.to_string(),
        elevation,
    })
}

/**
 * The compact airport list, in input order.
 *
 * Serializes as an array of arrays, no deduplication on codes.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirportDocument {
    pub format: AirportFormat,
    pub airports: Vec<AirportEntry>,
}

impl AirportDocument {
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

/// Normalize all rows of an airport export.
pub fn normalize_airports<I>(records: I, policy: ElevationPolicy, format: AirportFormat) -> AirportDocument
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut rows = 0;
    let airports: Vec<_> = records
        .into_iter()
        .inspect(|_| rows += 1)
        .filter_map(|record| normalize_airport(&record, policy))
        .collect();
    tracing::info!("Kept {} airports out of {} rows", airports.len(), rows);
    AirportDocument { format, airports }
}

/// Convert an airport CSV file into the compact airport list.
///
/// The tuples carry elevations when the input has an `elevation_ft` column.
pub fn convert_airports_file<P, Q>(input: P, output: Q, policy: ElevationPolicy) -> crate::Result<AirportDocument>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let reader = RecordReader::open(input)?;
    let format = AirportFormat::from_columns(reader.has_column("elevation_ft"));
    let document = normalize_airports(reader, policy, format);
    write_compact(&document, output)?;
    Ok(document)
}

struct AirportTuple<'a>(&'a AirportEntry, AirportFormat);

impl Serialize for AirportTuple<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let AirportTuple(airport, format) = self;
        let len = match format {
            AirportFormat::Compact => 4,
            AirportFormat::WithElevation => 5,
        };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&airport.code)?;
        seq.serialize_element(&airport.latitude)?;
        seq.serialize_element(&airport.longitude)?;
        seq.serialize_element(&airport.name)?;
        if *format == AirportFormat::WithElevation {
            seq.serialize_element(&airport.elevation)?;
        }
        seq.end()
    }
}

impl Serialize for AirportDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.airports.iter().map(|airport| AirportTuple(airport, self.format)))
    }
}
