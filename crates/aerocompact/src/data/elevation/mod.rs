//! Elevation enrichment of existing JSON documents.
//!
//! A document of the form `{"data": [{"lat": .., "lon": .., ...}, ...]}` is
//! enriched in place with an `elevation` field (feet) on every record. The
//! lookups are made in fixed-size batches with a pause between batches; a
//! batch that fails yields `null` elevations and the run goes on.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use serde_json::Value;

use crate::{Error, Result};

#[cfg(feature = "net")]
pub mod open_elevation;

pub const METERS_TO_FEET: f64 = 3.28084;

/// A service returning ground elevations for coordinates.
pub trait ElevationSource {
    /// Elevation in meters for each `(latitude, longitude)` pair, in order.
    ///
    /// A `None` entry means the service has no value for that location. The
    /// returned list may be shorter than the request.
    fn lookup(&self, locations: &[(f64, f64)]) -> Result<Vec<Option<f64>>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnricherConfig {
    /// Number of locations per request
    pub batch_size: usize,
    /// Pause between two requests
    pub delay: Duration,
}

impl Default for EnricherConfig {
    fn default() -> Self {
        EnricherConfig {
            batch_size: 100,
            delay: Duration::from_millis(500),
        }
    }
}

/// Outcome of an enrichment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    pub records: usize,
    pub with_elevation: usize,
    pub failed_batches: usize,
}

/// Convert to whole feet, ties going to even.
pub fn meters_to_feet(meters: f64) -> i64 {
    (meters * METERS_TO_FEET).round_ties_even() as i64
}

fn coordinates(record: &Value) -> Option<(f64, f64)> {
    let lat = record.get("lat")?.as_f64()?;
    let lon = record.get("lon")?.as_f64()?;
    (lat.is_finite() && lon.is_finite()).then_some((lat, lon))
}

/// Set the `elevation` field of every record, batch by batch.
///
/// Records without usable `lat`/`lon` are not sent and get `null`. Records
/// that are not JSON objects are left untouched.
pub fn enrich_records<S>(records: &mut [Value], source: &S, config: &EnricherConfig) -> EnrichmentStats
where
    S: ElevationSource + ?Sized,
{
    let batch_size = config.batch_size.max(1);
    let batch_count = records.len().div_ceil(batch_size);
    let mut stats = EnrichmentStats {
        records: records.len(),
        ..Default::default()
    };

    for (index, batch) in records.chunks_mut(batch_size).enumerate() {
        let located: Vec<(usize, (f64, f64))> = batch
            .iter()
            .enumerate()
            .filter_map(|(i, record)| coordinates(record).map(|coords| (i, coords)))
            .collect();
        let locations: Vec<_> = located.iter().map(|(_, coords)| *coords).collect();

        let elevations = if locations.is_empty() {
            Vec::new()
        } else {
            match source.lookup(&locations) {
                Ok(elevations) => elevations,
                Err(e) => {
                    tracing::warn!("Error fetching batch {}/{}: {}", index + 1, batch_count, e);
                    stats.failed_batches += 1;
                    Vec::new()
                }
            }
        };

        let mut found = vec![None; batch.len()];
        for ((i, _), elevation) in located.iter().zip(elevations) {
            found[*i] = elevation.filter(|m| m.is_finite()).map(meters_to_feet);
        }

        let ok = found.iter().filter(|elevation| elevation.is_some()).count();
        tracing::info!("Batch {}/{}: {}/{} OK", index + 1, batch_count, ok, batch.len());
        stats.with_elevation += ok;

        for (record, elevation) in batch.iter_mut().zip(found) {
            if let Some(object) = record.as_object_mut() {
                object.insert("elevation".to_string(), elevation.map_or(Value::Null, Value::from));
            }
        }

        if index + 1 < batch_count && !config.delay.is_zero() {
            thread::sleep(config.delay);
        }
    }

    stats
}

/// Enrich the `data` array of a document.
pub fn enrich_document<S>(document: &mut Value, source: &S, config: &EnricherConfig) -> Result<EnrichmentStats>
where
    S: ElevationSource + ?Sized,
{
    let records = document
        .get_mut("data")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::InvalidDocument("expected a \"data\" array".to_string()))?;
    tracing::info!("Processing {} records in batches of {}", records.len(), config.batch_size);
    Ok(enrich_records(records, source, config))
}

/// Enrich a document file and write it back, pretty-printed.
pub fn enrich_file<P, S>(path: P, source: &S, config: &EnricherConfig) -> Result<EnrichmentStats>
where
    P: AsRef<Path>,
    S: ElevationSource + ?Sized,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }
    let mut document: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    let stats = enrich_document(&mut document, source, config)?;

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;

    /// Answers `lat * 10` meters, fails on any batch containing latitude 0.
    #[derive(Default)]
    struct FakeSource {
        calls: RefCell<Vec<usize>>,
    }

    impl ElevationSource for FakeSource {
        fn lookup(&self, locations: &[(f64, f64)]) -> Result<Vec<Option<f64>>> {
            self.calls.borrow_mut().push(locations.len());
            if locations.iter().any(|(lat, _)| *lat == 0.0) {
                return Err(Error::InvalidDocument("service unavailable".to_string()));
            }
            Ok(locations
                .iter()
                .map(|(lat, _)| if *lat < 0.0 { None } else { Some(lat * 10.0) })
                .collect())
        }
    }

    fn config(batch_size: usize) -> EnricherConfig {
        EnricherConfig {
            batch_size,
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_meters_to_feet() {
        assert_eq!(meters_to_feet(100.0), 328);
        assert_eq!(meters_to_feet(0.0), 0);
        assert_eq!(meters_to_feet(-10.0), -33);
        assert_eq!(meters_to_feet(2.5), 8);
    }

    #[test]
    fn test_batches_and_failures() {
        let mut records = vec![
            json!({"name": "a", "lat": 10.0, "lon": 1.0}),
            json!({"name": "b", "lat": 20.0, "lon": 1.0}),
            json!({"name": "c", "lat": 0.0, "lon": 1.0}),
            json!({"name": "d", "lat": 30.0, "lon": 1.0}),
            json!({"name": "e", "lat": -5.0, "lon": 1.0}),
        ];
        let source = FakeSource::default();
        let stats = enrich_records(&mut records, &source, &config(2));

        assert_eq!(*source.calls.borrow(), vec![2, 2, 1]);
        assert_eq!(
            stats,
            EnrichmentStats {
                records: 5,
                with_elevation: 2,
                failed_batches: 1
            }
        );
        assert_eq!(records[0]["elevation"], json!(328));
        assert_eq!(records[1]["elevation"], json!(656));
        // second batch failed as a whole
        assert_eq!(records[2]["elevation"], Value::Null);
        assert_eq!(records[3]["elevation"], Value::Null);
        assert_eq!(records[4]["elevation"], Value::Null);
        assert_eq!(records[4]["name"], json!("e"));
    }

    #[test]
    fn test_records_without_coordinates() {
        let mut records = vec![
            json!({"lat": 10.0}),
            json!({"lat": "10", "lon": 1.0}),
            json!({"lat": 10.0, "lon": 1.0}),
        ];
        let source = FakeSource::default();
        let stats = enrich_records(&mut records, &source, &config(100));

        assert_eq!(*source.calls.borrow(), vec![1]);
        assert_eq!(stats.with_elevation, 1);
        assert_eq!(records[0]["elevation"], Value::Null);
        assert_eq!(records[1]["elevation"], Value::Null);
        assert_eq!(records[2]["elevation"], json!(328));
    }

    #[test]
    fn test_document_shape() {
        let source = FakeSource::default();
        let mut document = json!({"data": [{"lat": 1.0, "lon": 2.0}], "source": "ad-lads"});
        let stats = enrich_document(&mut document, &source, &config(100)).unwrap();
        assert_eq!(stats.with_elevation, 1);
        assert_eq!(document["data"][0]["elevation"], json!(33));
        assert_eq!(document["source"], json!("ad-lads"));

        let mut document = json!({"records": []});
        assert!(matches!(
            enrich_document(&mut document, &source, &config(100)),
            Err(Error::InvalidDocument(_))
        ));
    }
}
