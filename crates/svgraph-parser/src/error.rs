//! Error and diagnostic system for the svgraph parser.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the markup source
//! - Severity levels
//! - A collector for accumulating multiple diagnostics
//!
//! A [`Diagnostic`] describes a single problem. One or more diagnostics are
//! wrapped in a [`ParseError`] when returned from parsing or validation.
//!
//! # Example
//!
//! ```
//! # use svgraph_parser::error::{Diagnostic, ErrorCode};
//! # use svgraph_parser::Span;
//!
//! let diag = Diagnostic::error("expected `</g>`, found `</text>`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(40..47), "mismatched closing tag")
//!     .with_secondary_label(Span::new(0..3), "element opened here")
//!     .with_help("close elements in the reverse order they were opened");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
