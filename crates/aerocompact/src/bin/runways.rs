use std::path::PathBuf;
use std::process;

use aerocompact::cli::init_tracing;
use aerocompact::data::ourairports::runway::convert_runways_file;
use aerocompact::Error;
use clap::Parser;

/// Convert an OurAirports runways.csv export into JSON indexed by airport code.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Runways CSV file
    #[arg(default_value = "runways.csv")]
    input: PathBuf,
    /// Output JSON file
    #[arg(default_value = "data/runways.json")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("warn");
    let args = Args::parse();

    let (document, report, size) = match convert_runways_file(&args.input, &args.output) {
        Ok(result) => result,
        Err(Error::MissingInput(path)) => {
            eprintln!("Error: {} not found", path.display());
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "Done! {} airports, {} runways",
        document.airport_count(),
        document.runway_count()
    );
    println!("Output: {} ({:.1} KB)", args.output.display(), size as f64 / 1024.0);

    if !report.is_empty() {
        println!("\nUnidentified surfaces ({}):", report.len());
        println!("{}", report.unidentified().collect::<Vec<_>>().join(", "));
    }
    Ok(())
}
