//! # svgraph Parser
//!
//! Structural parser for SVG diagram markup. Turns raw markup into a
//! [`Document`]: an ordered arena of [`Element`]s carrying their tag,
//! verbatim attributes, direct character data and source span.
//!
//! No SVG semantics are applied here; unknown tags are kept as opaque
//! elements. Cross-references between elements are resolved later, on top of
//! the finished arena.
//!
//! ## Usage
//!
//! ```
//! # use svgraph_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let document = parse(r#"<svg><text x="10" y="20">Hello</text></svg>"#)?;
//!     assert_eq!(document.len(), 2);
//!     assert_eq!(document.elements()[1].text(), "Hello");
//!     Ok(())
//! }
//! ```

pub mod element;
pub mod error;

mod parser;
#[cfg(test)]
mod parser_tests;
mod span;

pub use element::{Attributes, Document, Element, ElementId, Link};
pub use error::ParseError;
pub use parser::{parse, parse_bytes};
pub use span::Span;
