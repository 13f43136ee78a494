//! CLI logic for the svgraph converter.
//!
//! Reads one SVG file, runs it through the [`svgraph::Converter`] pipeline
//! and writes the JSON document to a file or standard output. Nothing is
//! written unless the whole conversion succeeds.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use log::{debug, info};

use svgraph::{Converter, SvgraphError};

/// Where the JSON document ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Written to this file.
    File(PathBuf),
    /// Written to standard output.
    Stdout,
}

/// Run the svgraph CLI application
///
/// # Errors
///
/// Returns `SvgraphError` for:
/// - Configuration loading errors
/// - Unreadable input or unwritable output
/// - Malformed markup
/// - Invalid form values
pub fn run(args: &Args) -> Result<Destination, SvgraphError> {
    let output_path = args.output_path();
    info!(
        input_path = args.input,
        output_path:? = output_path;
        "Converting diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    // The file handle is released as soon as the bytes are in memory
    let input = fs::read(&args.input)?;
    debug!(bytes = input.len(); "Input read");

    let converter = Converter::new(app_config);
    let output = converter.convert_bytes(&input)?;
    let json = converter.to_json(&output)?;

    let destination = match output_path {
        Some(path) => {
            fs::write(&path, &json)?;
            Destination::File(path)
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
            stdout.flush()?;
            Destination::Stdout
        }
    };

    match &destination {
        Destination::File(path) => {
            info!(output_file = path.display().to_string(); "JSON output written")
        }
        Destination::Stdout => info!("JSON output written to standard output"),
    }

    Ok(destination)
}
