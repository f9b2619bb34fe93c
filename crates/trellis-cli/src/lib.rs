//! Trellis CLI library
//!
//! This module contains the batch orchestration for the Trellis converter:
//! directory discovery, per-file conversion, and continue-on-failure error
//! accounting. The conversion core never touches the filesystem beyond the
//! file handle it is given; everything path-shaped lives here.

pub mod error_report;

mod args;
mod config;

pub use args::Args;
pub use error_report::ErrorReport;

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use trellis::{Converter, TrellisError};

/// Extension of discovered input files.
const INPUT_EXTENSION: &str = "xmind";

/// Extension given to written output files.
const OUTPUT_EXTENSION: &str = "drawio";

/// Outcome of one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files converted and written successfully
    pub converted: usize,
    /// Files that failed in some pipeline stage and were skipped
    pub failed: usize,
}

/// Run the Trellis batch converter
///
/// Discovers every mind-map file in the input directory and converts each
/// one independently: a file's failure is logged and counted but never stops
/// the batch, and no state is shared between files.
///
/// # Errors
///
/// Returns `TrellisError` only for batch-level failures: unreadable
/// configuration or directories that cannot be created or listed. Per-file
/// failures are reported through the returned [`BatchSummary`].
pub fn run(args: &Args) -> Result<BatchSummary, TrellisError> {
    let app_config = config::load_config(args.config.as_ref())?;

    fs::create_dir_all(&args.input_dir)?;
    fs::create_dir_all(&args.output_dir)?;

    let inputs = discover_inputs(&args.input_dir)?;
    if inputs.is_empty() {
        warn!(
            input_dir = args.input_dir.display().to_string();
            "No mind-map files found; add .xmind files and run again"
        );
        return Ok(BatchSummary::default());
    }

    info!(count = inputs.len(); "Found mind-map files");

    let converter = Converter::new(app_config);
    let mut summary = BatchSummary::default();
    for input in inputs {
        match convert_file(&converter, &input, &args.output_dir) {
            Ok(output) => {
                info!(
                    input = input.display().to_string(),
                    output = output.display().to_string();
                    "Converted"
                );
                summary.converted += 1;
            }
            Err(err) => {
                error!(
                    input = input.display().to_string(),
                    stage = err.stage(),
                    error = err.to_string();
                    "Conversion failed, continuing with remaining files"
                );
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Lists input files in deterministic (sorted) order.
fn discover_inputs(input_dir: &Path) -> Result<Vec<PathBuf>, TrellisError> {
    let mut inputs: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION))
        })
        .collect();
    inputs.sort();
    Ok(inputs)
}

/// Converts one file, writing `<stem>.drawio` into the output directory.
fn convert_file(
    converter: &Converter,
    input: &Path,
    output_dir: &Path,
) -> Result<PathBuf, TrellisError> {
    let file = fs::File::open(input)?;
    let document = converter.convert(file)?;

    let stem = input.file_stem().unwrap_or_default();
    let output = output_dir.join(stem).with_extension(OUTPUT_EXTENSION);
    fs::write(&output, document)?;
    Ok(output)
}
