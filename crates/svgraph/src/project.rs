//! Projection of resolved elements into the output schema.
//!
//! Each element is classified by tag. Text-like elements become
//! [`OutputNode`]s, connector-like elements become [`OutputEdge`]s, and every
//! other element is dropped; its attributes only reach the output through the
//! link fields of elements that reference it.

use log::{debug, info};

use svgraph_parser::{
    Element, ElementId,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
};

use crate::{
    config::ProjectionConfig,
    output::{Form, OutputDocument, OutputEdge, OutputNode},
    resolve::ResolvedDocument,
};

/// Where an element ends up in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// Projected into `texts`.
    Text,
    /// Projected into `arrows`.
    Connector,
    /// Not projected.
    Other,
}

/// Link fields shared by nodes and edges.
#[derive(Debug, Default)]
struct LinkFields {
    linked_to: Option<String>,
    link_style: Option<String>,
    arrow_type: Option<String>,
}

/// Maps a [`ResolvedDocument`] onto an [`OutputDocument`].
#[derive(Debug)]
pub struct Projector<'a> {
    config: &'a ProjectionConfig,
}

impl<'a> Projector<'a> {
    /// Creates a projector using the tag lists in `config`.
    pub fn new(config: &'a ProjectionConfig) -> Self {
        Self { config }
    }

    /// Classify an element by its tag.
    pub fn classify(&self, element: &Element) -> TagClass {
        let tag = element.tag();
        if self.config.text_tags().iter().any(|t| t == tag) {
            TagClass::Text
        } else if self.config.connector_tags().iter().any(|t| t == tag) {
            TagClass::Connector
        } else {
            TagClass::Other
        }
    }

    /// Project every element of `resolved`.
    ///
    /// Output order follows document order within `texts` and `arrows`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] with one `E200` diagnostic per form value that
    /// is not a number.
    pub fn project(&self, resolved: &ResolvedDocument) -> Result<OutputDocument, ParseError> {
        let mut output = OutputDocument::default();
        let mut collector = DiagnosticCollector::new();
        let mut dropped = 0usize;

        for (id, element) in resolved.document().iter() {
            match self.classify(element) {
                TagClass::Text => {
                    let node = self.node(resolved, id, element, output.texts.len(), &mut collector);
                    output.texts.push(node);
                }
                TagClass::Connector => output.arrows.push(edge(resolved, id, element)),
                TagClass::Other => dropped += 1,
            }
        }
        collector.finish()?;

        debug!(dropped; "Elements without a projection dropped");
        info!(texts = output.texts.len(), arrows = output.arrows.len(); "Document projected");

        Ok(output)
    }

    fn node(
        &self,
        resolved: &ResolvedDocument,
        id: ElementId,
        element: &Element,
        index: usize,
        collector: &mut DiagnosticCollector,
    ) -> OutputNode {
        let content = if self.config.trim_content() {
            element.text().trim()
        } else {
            element.text()
        };

        // `font-size` may stand in for both width and height; report it once
        let mut rejected: Vec<&str> = Vec::new();
        let mut numeric = |names: &[&str]| match form_value(element, names) {
            Some((name, value)) => {
                if !is_numeric(value) && !rejected.contains(&name) {
                    rejected.push(name);
                    collector.emit(invalid_number(element, name, value));
                }
                value.to_string()
            }
            None => String::new(),
        };

        let form = Form {
            id: format!("form{index}"),
            x: numeric(&["x"]),
            y: numeric(&["y"]),
            width: numeric(&["width", "font-size"]),
            height: numeric(&["height", "font-size"]),
        };
        let link = link_fields(resolved, id, element);

        OutputNode {
            id: format!("text{index}"),
            content: content.to_string(),
            form,
            linked_to: link.linked_to,
            link_style: link.link_style,
            arrow_type: link.arrow_type,
        }
    }
}

fn edge(resolved: &ResolvedDocument, id: ElementId, element: &Element) -> OutputEdge {
    let link = link_fields(resolved, id, element);

    OutputEdge {
        start: element.attribute("d").unwrap_or_default().to_string(),
        end: element.attribute("marker-end").unwrap_or_default().to_string(),
        linked_to: link.linked_to,
        link_style: link.link_style,
        arrow_type: link.arrow_type,
    }
}

fn link_fields(resolved: &ResolvedDocument, id: ElementId, element: &Element) -> LinkFields {
    let Some(link) = element.link() else {
        return LinkFields::default();
    };

    LinkFields {
        linked_to: resolved
            .link_target(id)
            .and_then(Element::id)
            .map(str::to_string),
        link_style: link.style().map(str::to_string),
        arrow_type: link.arrow_kind().map(str::to_string),
    }
}

/// The first attribute in `names` present on `element`, with its name.
fn form_value<'e>(element: &'e Element, names: &[&str]) -> Option<(&'e str, &'e str)> {
    names.iter().find_map(|name| {
        element
            .attributes()
            .get_key_value(*name)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    })
}

/// A finite number, optionally followed by a `px` unit.
fn is_numeric(value: &str) -> bool {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim_end();
    number.parse::<f64>().is_ok_and(f64::is_finite)
}

fn invalid_number(element: &Element, name: &str, value: &str) -> Diagnostic {
    Diagnostic::error(format!(
        "`{name}` of `<{}>` is not a number: `{value}`",
        element.tag()
    ))
    .with_code(ErrorCode::E200)
    .with_label(element.span(), "in this element")
    .with_help("position and size attributes must be numbers, optionally suffixed with `px`")
}
