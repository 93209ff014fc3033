use std::fs;

use aerocompact::data::elevation::{enrich_file, ElevationSource, EnricherConfig};
use aerocompact::data::ourairports::airport::{convert_airports_file, AirportFormat, ElevationPolicy};
use aerocompact::data::ourairports::runway::convert_runways_file;
use aerocompact::Error;
use serde_json::{json, Value};
use tempfile::TempDir;

const AIRPORTS_CSV: &str = "\
id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,icao_code
3622,KJFK,large_airport,John F Kennedy International Airport,40.639447,-73.779317,13,KJFK
5767,SAAV,medium_airport,Sauce Viejo Airport,-31.7117,-60.8117,55,
331140,AR-0496,small_airport,Estancia La Ñata,-34.5,-58.9,,
42,XX-0001,heliport,,10.0,10.0,100,
43,XX-0002,heliport,Broken elevation,10.0,10.0,n/a,
";

const RUNWAYS_CSV: &str = "\
id,airport_ref,airport_ident,length_ft,width_ft,surface,lighted,closed,le_ident,le_latitude_deg,le_longitude_deg,le_elevation_ft,le_heading_degT,le_displaced_threshold_ft,he_ident,he_latitude_deg,he_longitude_deg,he_elevation_ft,he_heading_degT,he_displaced_threshold_ft
1,3622,KJFK,12000,,ASPH,1,0,04L,,,,,,22R,,,,,
2,5767,SAAV,6890,98,CON,1,0,02,-31.72,-60.82,53,20.04,0,20,-31.70,-60.80,58,200.04,492
3,9999,,3000,60,GRASS,0,0,09,,,,,,27,,,,,
4,9998,AR-0496,2000,0,Pasto natural,0,1,,,,,,,,,,,,
5,9997,00AK,1500,70,Xyz,0,0,N,,,,,,S,,,,,
";

#[test]
fn test_convert_airports_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("airports.csv");
    let output = dir.path().join("out").join("airports.json");
    fs::write(&input, AIRPORTS_CSV).unwrap();

    let document = convert_airports_file(&input, &output, ElevationPolicy::Strict).unwrap();
    assert_eq!(document.format, AirportFormat::WithElevation);
    assert_eq!(document.len(), 3);

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        concat!(
            r#"[["KJFK",40.639447,-73.779317,"John F Kennedy International Airport",13],"#,
            r#"["SAAV",-31.7117,-60.8117,"Sauce Viejo Airport",55],"#,
            r#"["AR-0496",-34.5,-58.9,"Estancia La Ñata",null]]"#
        )
    );
}

#[test]
fn test_convert_airports_without_elevation_column() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("airports.csv");
    let output = dir.path().join("airports.json");
    fs::write(&input, "ident,name,latitude_deg,longitude_deg\nLFBO,Toulouse,43.6,1.4\n").unwrap();

    let document = convert_airports_file(&input, &output, ElevationPolicy::Lenient).unwrap();
    assert_eq!(document.format, AirportFormat::Compact);
    assert_eq!(fs::read_to_string(&output).unwrap(), r#"[["LFBO",43.6,1.4,"Toulouse"]]"#);
}

#[test]
fn test_lenient_policy_keeps_broken_elevation() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("airports.csv");
    let output = dir.path().join("airports.json");
    fs::write(&input, AIRPORTS_CSV).unwrap();

    let document = convert_airports_file(&input, &output, ElevationPolicy::Lenient).unwrap();
    assert_eq!(document.len(), 4);
    assert_eq!(document.airports[3].code, "XX-0002");
    assert_eq!(document.airports[3].elevation, None);
}

#[test]
fn test_convert_runways_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("runways.csv");
    let output = dir.path().join("data").join("runways.json");
    fs::write(&input, RUNWAYS_CSV).unwrap();

    let (document, report, size) = convert_runways_file(&input, &output).unwrap();
    assert_eq!(document.airport_count(), 3);
    assert_eq!(document.runway_count(), 3);
    assert_eq!(report.unidentified().collect::<Vec<_>>(), vec!["PASTO NATURAL", "XYZ"]);

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(size, written.len() as u64);

    let expected = json!({
        "00AK": [{"l": 1500, "w": 70, "le": {"id": "N"}, "he": {"id": "S"}}],
        "KJFK": [{"l": 12000, "s": "PG", "lit": 1, "le": {"id": "04L"}, "he": {"id": "22R"}}],
        "SAAV": [{
            "l": 6890, "w": 98, "s": "PG", "lit": 1,
            "le": {"id": "02", "lat": -31.72, "lon": -60.82, "elev": 53, "hdg": 20.0},
            "he": {"id": "20", "lat": -31.7, "lon": -60.8, "elev": 58, "hdg": 200.0, "dt": 492}
        }]
    });
    assert_eq!(serde_json::from_str::<Value>(&written).unwrap(), expected);
    assert!(written.starts_with(r#"{"00AK":[{"l":1500,"w":70,"le":{"id":"N"},"he":{"id":"S"}}],"KJFK":"#));
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("runways.json");

    let result = convert_runways_file(dir.path().join("runways.csv"), &output);
    assert!(matches!(result, Err(Error::MissingInput(_))));
    assert!(!output.exists());

    let result = convert_airports_file(dir.path().join("airports.csv"), &output, ElevationPolicy::Strict);
    assert!(matches!(result, Err(Error::MissingInput(_))));
}

struct FlatEarth;

impl ElevationSource for FlatEarth {
    fn lookup(&self, locations: &[(f64, f64)]) -> aerocompact::Result<Vec<Option<f64>>> {
        Ok(vec![Some(100.0); locations.len()])
    }
}

#[test]
fn test_enrich_file_in_place() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("argentina.json");
    fs::write(
        &path,
        r#"{"data": [{"name": "Aeródromo Sauce Viejo", "lat": -31.7, "lon": -60.8}, {"name": "sin posición"}]}"#,
    )
    .unwrap();

    let config = EnricherConfig {
        batch_size: 1,
        delay: std::time::Duration::ZERO,
    };
    let stats = enrich_file(&path, &FlatEarth, &config).unwrap();
    assert_eq!(stats.records, 2);
    assert_eq!(stats.with_elevation, 1);

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("Aeródromo"));
    let document: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        document,
        json!({"data": [
            {"name": "Aeródromo Sauce Viejo", "lat": -31.7, "lon": -60.8, "elevation": 328},
            {"name": "sin posición", "elevation": null}
        ]})
    );

    let missing = enrich_file(dir.path().join("missing.json"), &FlatEarth, &config);
    assert!(matches!(missing, Err(Error::MissingInput(_))));
}
