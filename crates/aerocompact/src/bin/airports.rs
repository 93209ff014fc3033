use std::path::PathBuf;
use std::process;

use aerocompact::cli::init_tracing;
use aerocompact::data::ourairports::airport::{convert_airports_file, ElevationPolicy};
use aerocompact::Error;
use clap::Parser;

/// Convert an OurAirports airports.csv export into a compact JSON list.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Airports CSV file
    #[arg(default_value = "airports.csv")]
    input: PathBuf,
    /// Output JSON file [default: INPUT with a .json extension]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("warn");
    let args = Args::parse();
    let output = args.output.unwrap_or_else(|| args.input.with_extension("json"));

    match convert_airports_file(&args.input, &output, ElevationPolicy::default()) {
        Ok(document) => {
            println!("Wrote {} airports to {}", document.len(), output.display());
            Ok(())
        }
        Err(Error::MissingInput(path)) => {
            eprintln!("Error: {} not found", path.display());
            process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
