// Converts example.jpg in the working directory to example-c.png.
//
// The paths are fixed; command-line arguments are ignored. RUST_LOG controls
// log verbosity.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use image_convert_lib::{ConversionReport, ConvertError, ConvertSettings, run};

const SOURCE: &str = "example.jpg";
const DESTINATION: &str = "example-c.png";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match convert_example() {
        Ok(report) => {
            info!(
                "Wrote {} ({}×{}, {} bytes)",
                report.destination_path, report.width, report.height, report.destination_size
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            let code = e.downcast_ref::<ConvertError>().map_or(1, ConvertError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn convert_example() -> anyhow::Result<ConversionReport> {
    run(Path::new(SOURCE), Path::new(DESTINATION), &ConvertSettings::default())
        .with_context(|| format!("Could not convert {SOURCE} to {DESTINATION}"))
}
