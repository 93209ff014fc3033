//! Browser bindings for the aerocompact normalizers.
//!
//! The CSV text is passed in as a string and the compact JSON document is
//! returned as a string, ready to be cached or parsed client side.

use aerocompact::data::ourairports::airport::{normalize_airports, AirportFormat, ElevationPolicy};
use aerocompact::data::ourairports::runway::normalize_runways;
use aerocompact::data::ourairports::surface::categorize_surface;
use aerocompact::data::ourairports::RecordReader;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Normalize the content of an airports CSV export into the compact airport list.
#[wasm_bindgen(js_name = normalizeAirports)]
pub fn normalize_airports_csv(csv: &str) -> Result<String, JsError> {
    let reader = RecordReader::from_reader(csv.as_bytes()).map_err(js_error)?;
    let format = AirportFormat::from_columns(reader.has_column("elevation_ft"));
    let document = normalize_airports(reader, ElevationPolicy::default(), format);
    serde_json::to_string(&document).map_err(js_error)
}

/// Normalize the content of a runways CSV export into the runway document.
#[wasm_bindgen(js_name = normalizeRunways)]
pub fn normalize_runways_csv(csv: &str) -> Result<String, JsError> {
    let reader = RecordReader::from_reader(csv.as_bytes()).map_err(js_error)?;
    let (document, _) = normalize_runways(reader);
    serde_json::to_string(&document).map_err(js_error)
}

/// Two-letter surface category of a raw surface description, if known.
#[wasm_bindgen(js_name = categorizeSurface)]
pub fn categorize_surface_code(surface: &str) -> Option<String> {
    categorize_surface(surface).map(|category| category.code().to_string())
}
