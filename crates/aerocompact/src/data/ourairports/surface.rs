//! Runway surface categories.
//!
//! Surface descriptions in OurAirports are crowd-sourced: mixed case, English
//! and Spanish, abbreviated in many ways and full of typos. They are reduced
//! to eight categories through a fixed lookup table, first on the whole
//! string then on its first three, two and one characters.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

/**
 * A canonical surface category.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SurfaceCategory {
    /// Asphalt, concrete and other pavement in good condition
    #[serde(rename = "PG")]
    PavementGood,
    /// Pierced steel planking, deteriorated pavement, decks
    #[serde(rename = "PP")]
    PavementPoor,
    /// Well-maintained turf
    #[serde(rename = "GG")]
    GrassGood,
    /// Irregular turf, sod
    #[serde(rename = "GF")]
    GrassFair,
    #[serde(rename = "GV")]
    Gravel,
    /// Dirt, earth, clay, soil
    #[serde(rename = "DT")]
    Dirt,
    #[serde(rename = "SD")]
    Sand,
    /// Water and ice
    #[serde(rename = "WT")]
    Water,
}

impl SurfaceCategory {
    /// Two-letter code used in the output documents.
    pub fn code(&self) -> &'static str {
        match self {
            SurfaceCategory::PavementGood => "PG",
            SurfaceCategory::PavementPoor => "PP",
            SurfaceCategory::GrassGood => "GG",
            SurfaceCategory::GrassFair => "GF",
            SurfaceCategory::Gravel => "GV",
            SurfaceCategory::Dirt => "DT",
            SurfaceCategory::Sand => "SD",
            SurfaceCategory::Water => "WT",
        }
    }
}

impl fmt::Display for SurfaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

use SurfaceCategory::{Dirt, GrassFair, GrassGood, Gravel, PavementGood, PavementPoor, Sand, Water};

#[rustfmt::skip]
static SURFACE_CATEGORIES: Lazy<HashMap<&'static str, SurfaceCategory>> = Lazy::new(|| {
    HashMap::from([
        // asphalt, concrete, bitumen
        ("A", PavementGood), ("ASP", PavementGood), ("ASF", PavementGood), ("ASPH", PavementGood),
        ("ASPH-G", PavementGood), ("C", PavementGood), ("CON", PavementGood), ("CONC", PavementGood),
        ("CONC-G", PavementGood), ("CG", PavementGood), ("TAR", PavementGood), ("BIT", PavementGood),
        ("MAC", PavementGood), ("PAV", PavementGood), ("AG", PavementGood), ("CCN", PavementGood),
        ("PFC", PavementGood), ("PEM", PavementGood), ("APS", PavementGood), ("ASB", PavementGood),
        ("C0N", PavementGood), ("OON", PavementGood),
        // brick, limestone
        ("BRI", PavementGood), ("LIM", PavementGood), ("B", PavementGood),
        // helipads
        ("PAD", PavementGood), ("PAD/CON", PavementGood),
        ("ASPHALT", PavementGood), ("CONCRETE", PavementGood), ("BLACKTOP", PavementGood),
        ("BLA", PavementGood),
        // quoted and truncated quoted variants
        ("'ASPHALT'", PavementGood), ("'CONCRETE'", PavementGood), ("'AS", PavementGood),
        ("'CO", PavementGood),

        // mats, metal, rooftops, decks
        ("RAI", PavementPoor), ("PSP", PavementPoor), ("M", PavementPoor), ("MAT", PavementPoor),
        ("MET", PavementPoor), ("ALU", PavementPoor), ("OIL", PavementPoor), ("STE", PavementPoor),
        ("PER", PavementPoor), ("ROO", PavementPoor), ("DEC", PavementPoor), ("NEO", PavementPoor),
        ("OLD", PavementPoor), ("ROU", PavementPoor), ("?ST", PavementPoor), ("PCN", PavementPoor),

        ("T", GrassGood), ("TUR", GrassGood), ("TG", GrassGood), ("TURF", GrassGood),
        ("TURF-G", GrassGood), ("GR", GrassGood), ("GRS", GrassGood), ("GRA", GrassGood),
        ("GRASS", GrassGood), ("G", GrassGood), ("TRT", GrassGood), ("ERB", GrassGood),
        ("HER", GrassGood), ("PAD/GRASS", GrassGood),

        ("TF", GrassFair), ("TURF-F", GrassFair), ("SOD", GrassFair), ("SOF", GrassFair),

        ("GRE", Gravel), ("GRV", Gravel), ("GRR", Gravel), ("GRVL", Gravel), ("GVL", Gravel),
        ("STO", Gravel), ("ROC", Gravel), ("COR", Gravel), ("PIE", Gravel), ("PIC", Gravel),
        // "PIÇ", also seen mis-decoded from latin-1
        ("PIÇ", Gravel), ("PIÃ‡", Gravel),
        ("CRU", Gravel), ("LOO", Gravel), ("ROL", Gravel), ("ZAH", Gravel), ("OLI", Gravel),
        ("PAC", Gravel), ("YEL", Gravel), ("BRO", Gravel), ("RED", Gravel), ("B/G", Gravel),

        ("D", Dirt), ("DIR", Dirt), ("DIRT", Dirt), ("EAR", Dirt), ("SOI", Dirt), ("CLA", Dirt),
        ("SHA", Dirt), ("VOL", Dirt), ("TER", Dirt), ("NAT", Dirt), ("COM", Dirt), ("UNP", Dirt),
        ("MUR", Dirt), ("LOA", Dirt), ("HAR", Dirt), ("EER", Dirt), ("SIL", Dirt), ("LAT", Dirt),
        ("U", Dirt), ("UNS", Dirt), ("UNSEALED", Dirt), ("NOT", Dirt),

        ("S", Sand), ("SAN", Sand), ("SAND", Sand),

        ("W", Water), ("WAT", Water), ("WATER", Water), ("SEA", Water), ("LAK", Water),
        ("MAR", Water), ("ICE", Water), ("BLU", Water),
    ])
});

/// Categorize a raw surface description.
///
/// Returns `None` when neither the full string nor any of its 3, 2 or
/// 1-character prefixes is a known code.
pub fn categorize_surface(surface: &str) -> Option<SurfaceCategory> {
    let surface = surface.trim().to_uppercase();
    if surface.is_empty() {
        return None;
    }
    if let Some(category) = SURFACE_CATEGORIES.get(surface.as_str()) {
        return Some(*category);
    }
    // prefixes are counted in characters; a string no longer than the prefix
    // was already looked up whole
    (1..=3).rev().find_map(|length| {
        let (end, _) = surface.char_indices().nth(length)?;
        SURFACE_CATEGORIES.get(&surface[..end]).copied()
    })
}

/**
 * Surface descriptions that could not be categorized.
 *
 * Entries are trimmed and uppercased, so `"xyz"` and `" XYZ"` count once.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceReport {
    unidentified: BTreeSet<String>,
}

impl SurfaceReport {
    /// Categorize a description, remembering it if it is non-empty and unknown.
    pub fn categorize(&mut self, surface: &str) -> Option<SurfaceCategory> {
        let category = categorize_surface(surface);
        let trimmed = surface.trim();
        if category.is_none() && !trimmed.is_empty() {
            self.unidentified.insert(trimmed.to_uppercase());
        }
        category
    }

    /// Unidentified descriptions, sorted.
    pub fn unidentified(&self) -> impl Iterator<Item = &str> {
        self.unidentified.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.unidentified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unidentified.is_empty()
    }
}
