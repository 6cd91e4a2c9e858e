use std::path::PathBuf;

use clap::Parser;
use region_data::{extract_region_file, RegionDataError, REGION3_PROVINCES};

#[derive(Parser)]
#[command(name = "region-extract")]
#[command(about = "Extract Region III locations from the nationwide dataset")]
struct Args {
    /// Nationwide province -> municipality -> barangay JSON file
    #[arg(long, default_value = "data/locations/philippines_full_locations.json")]
    input: PathBuf,

    /// Where the region-filtered dataset is written
    #[arg(long, default_value = "data/locations/region3_locations.json")]
    output: PathBuf,
}

/// Library plus this binary; the binary's crate name is `region_extract`.
const LOG_FILTER: &str = "region_data=info,region_extract=info";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter(LOG_FILTER)
        .init();

    let args = Args::parse();

    match extract_region_file(&args.input, &args.output, &REGION3_PROVINCES) {
        Ok(report) => {
            println!("[SUCCESS] Extraction complete!");
            println!("  - Provinces: {}", report.provinces_extracted());
            println!("  - Total Municipalities: {}", report.total_municipalities);
            println!("  - Total Barangays: {}", report.total_barangays);
        }
        Err(RegionDataError::InputMissing { path }) => {
            eprintln!("Error: Input file not found: {}", path.display());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Extraction failed: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LOG_FILTER;

    #[test]
    fn log_filter_names_this_binary() {
        let directive = format!("{}=info", env!("CARGO_CRATE_NAME"));
        assert!(LOG_FILTER.split(',').any(|d| d == directive));
    }
}
