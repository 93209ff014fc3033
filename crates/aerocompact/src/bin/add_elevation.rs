use std::path::PathBuf;
use std::process;

use aerocompact::cli::init_tracing;
use aerocompact::data::elevation::open_elevation::OpenElevation;
use aerocompact::data::elevation::{enrich_file, EnricherConfig};
use aerocompact::Error;
use clap::Parser;

/// Add elevations (feet) to the records of a JSON document using Open-Elevation.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON document with a "data" array of {"lat", "lon"} records, rewritten in place
    #[arg(default_value = "data/ad-lads/argentina.json")]
    document: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("warn,aerocompact=info");
    let args = Args::parse();

    let source = OpenElevation::public()?;
    match enrich_file(&args.document, &source, &EnricherConfig::default()) {
        Ok(stats) => {
            println!(
                "Done! {}/{} records have elevation data.",
                stats.with_elevation, stats.records
            );
            Ok(())
        }
        Err(Error::MissingInput(path)) => {
            eprintln!("Error: {} not found", path.display());
            process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
