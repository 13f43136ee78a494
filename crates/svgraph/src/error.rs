//! Error types for svgraph operations.
//!
//! This module provides the main error type [`SvgraphError`] which wraps
//! the error conditions that can occur while converting a diagram.

use std::io;

use thiserror::Error;

use svgraph_parser::ParseError;

/// The main error type for svgraph operations.
///
/// # Diagnostic Variants
///
/// `Parse` and `Validation` carry structured diagnostics with byte spans
/// together with the source they point into, so callers can render
/// snippets. An unresolved reference is never an error.
#[derive(Debug, Error)]
pub enum SvgraphError {
    /// Input could not be read or output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The markup is not well-formed.
    #[error("{err}")]
    Parse { err: ParseError, src: String },

    /// The markup is well-formed but a value used in the output is invalid.
    #[error("{err}")]
    Validation { err: ParseError, src: String },

    /// The output document could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SvgraphError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Create a new `Validation` error with the associated source code.
    pub fn new_validation_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Validation {
            err,
            src: src.into(),
        }
    }
}
