//! svgraph - Convert SVG diagrams into a JSON graph.
//!
//! Text elements become labeled nodes, paths become directional connectors,
//! and `xlink:href`-style references between elements are resolved into
//! links whose metadata is carried on the referencing node or connector.
//!
//! The conversion runs in three strictly sequential phases:
//!
//! 1. **Parse** - markup → ordered element arena ([`svgraph_parser`])
//! 2. **Resolve** - reference attributes → links ([`resolve`])
//! 3. **Project** - elements → [`OutputDocument`] ([`project`])

pub mod config;
pub mod output;
pub mod project;
pub mod resolve;

mod error;

pub use svgraph_parser::{Document, Element, ElementId, Link};

pub use error::SvgraphError;
pub use output::{Form, OutputDocument, OutputEdge, OutputNode};

use log::{debug, info, trace, warn};

use config::AppConfig;
use project::Projector;
use resolve::{ResolvedDocument, Resolver};

/// Runs markup through the parse, resolve and project phases.
///
/// # Examples
///
/// ```rust
/// use svgraph::{Converter, config::AppConfig};
///
/// let source = r#"<svg><text x="10" y="20" font-size="12">Hello</text></svg>"#;
///
/// let converter = Converter::new(AppConfig::default());
/// let output = converter.convert(source).expect("Failed to convert");
/// assert_eq!(output.texts[0].id, "text0");
///
/// let json = converter.to_json(&output).expect("Failed to serialize");
/// assert!(json.contains("\"arrows\": []"));
/// ```
#[derive(Debug, Default)]
pub struct Converter {
    config: AppConfig,
}

impl Converter {
    /// Create a new converter with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse markup text into a document.
    ///
    /// # Errors
    ///
    /// Returns [`SvgraphError::Parse`] if the markup is not well-formed.
    pub fn parse(&self, source: &str) -> Result<Document, SvgraphError> {
        info!(bytes = source.len(); "Parsing markup");

        let document = svgraph_parser::parse(source)
            .map_err(|err| SvgraphError::new_parse_error(err, source))?;

        debug!(elements = document.len(); "Markup parsed successfully");
        trace!(document:?; "Parsed document");

        Ok(document)
    }

    /// Parse raw markup bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns [`SvgraphError::Parse`] if the bytes are not UTF-8 or the
    /// markup is not well-formed.
    pub fn parse_bytes(&self, input: &[u8]) -> Result<Document, SvgraphError> {
        info!(bytes = input.len(); "Parsing markup");

        svgraph_parser::parse_bytes(input).map_err(|err| {
            SvgraphError::new_parse_error(err, String::from_utf8_lossy(input).into_owned())
        })
    }

    /// Resolve the references of a parsed document.
    ///
    /// Unresolvable references are left without a link; this never fails.
    /// Duplicate ids and self-references are logged as warnings.
    pub fn resolve(&self, document: Document) -> ResolvedDocument {
        let resolved = Resolver::new(self.config.links()).resolve(document);
        for warning in resolved.warnings() {
            warn!("{warning}");
        }
        resolved
    }

    /// Project a resolved document into the output schema.
    ///
    /// # Errors
    ///
    /// Returns [`SvgraphError::Validation`] if a position or size value is
    /// not a number.
    pub fn project(&self, resolved: &ResolvedDocument) -> Result<OutputDocument, SvgraphError> {
        Projector::new(self.config.projection())
            .project(resolved)
            .map_err(|err| SvgraphError::new_validation_error(err, resolved.document().source()))
    }

    /// Convert markup text into an output document.
    ///
    /// # Errors
    ///
    /// Returns [`SvgraphError::Parse`] or [`SvgraphError::Validation`].
    pub fn convert(&self, source: &str) -> Result<OutputDocument, SvgraphError> {
        let document = self.parse(source)?;
        let resolved = self.resolve(document);
        self.project(&resolved)
    }

    /// Convert raw markup bytes into an output document.
    ///
    /// # Errors
    ///
    /// Returns [`SvgraphError::Parse`] or [`SvgraphError::Validation`].
    pub fn convert_bytes(&self, input: &[u8]) -> Result<OutputDocument, SvgraphError> {
        let document = self.parse_bytes(input)?;
        let resolved = self.resolve(document);
        self.project(&resolved)
    }

    /// Encode an output document as JSON according to the output settings.
    ///
    /// # Errors
    ///
    /// Returns [`SvgraphError::Serialization`] if encoding fails.
    pub fn to_json(&self, output: &OutputDocument) -> Result<String, SvgraphError> {
        Ok(output.to_json(self.config.output().pretty())?)
    }
}
