//! Command-line argument definitions for the svgraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, and logging verbosity.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the svgraph converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input SVG file
    #[arg(help = "Path to the input SVG file")]
    pub input: String,

    /// Path to the output JSON file [default: <INPUT>.json]
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<String>,

    /// Write the JSON document to standard output instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The file the JSON document is written to, `None` for standard output.
    ///
    /// Defaults to the input path with `.json` appended.
    pub fn output_path(&self) -> Option<PathBuf> {
        if self.stdout {
            return None;
        }
        Some(match &self.output {
            Some(output) => PathBuf::from(output),
            None => PathBuf::from(format!("{}.json", self.input)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cli: &[&str]) -> Args {
        Args::try_parse_from(cli).expect("arguments should parse")
    }

    #[test]
    fn test_default_output_is_derived_from_input() {
        let args = args(&["svgraph", "diagram.svg"]);

        assert_eq!(args.output_path(), Some(PathBuf::from("diagram.svg.json")));
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_explicit_output() {
        let args = args(&["svgraph", "diagram.svg", "-o", "graph.json"]);

        assert_eq!(args.output_path(), Some(PathBuf::from("graph.json")));
    }

    #[test]
    fn test_stdout_has_no_output_path() {
        let args = args(&["svgraph", "diagram.svg", "--stdout"]);

        assert_eq!(args.output_path(), None);
    }

    #[test]
    fn test_output_conflicts_with_stdout() {
        assert!(Args::try_parse_from(["svgraph", "a.svg", "--stdout", "-o", "b.json"]).is_err());
    }

    #[test]
    fn test_exactly_one_input_required() {
        assert!(Args::try_parse_from(["svgraph"]).is_err());
        assert!(Args::try_parse_from(["svgraph", "a.svg", "b.svg"]).is_err());
    }
}
