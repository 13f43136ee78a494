//! Structural markup parser.
//!
//! Drives a [`quick_xml::Reader`] over the whole input and builds the
//! element arena in document order. Well-formedness of the element structure
//! (matching and closed tags) is checked here with an explicit stack of open
//! elements, so every failure carries a precise span.

use log::{debug, trace};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    element::{Attributes, Document, Element, ElementId},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// An element whose closing tag has not been seen yet.
#[derive(Debug)]
struct OpenElement {
    id: ElementId,
    name: String,
    span: Span,
}

/// Parser state threaded through a single parse call.
#[derive(Debug, Default)]
struct TreeBuilder {
    elements: Vec<Element>,
    open: Vec<OpenElement>,
}

impl TreeBuilder {
    fn open(&mut self, tag: &BytesStart<'_>, span: Span, self_closing: bool) -> Result<(), Diagnostic> {
        let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
        if let Some(root) = self.closed_root() {
            return Err(Diagnostic::error(format!(
                "element `<{name}>` appears after the root element"
            ))
            .with_code(ErrorCode::E104)
            .with_label(span, "second top-level element")
            .with_secondary_label(root.span(), "root element")
            .with_help("a document has exactly one root element"));
        }
        let attributes = read_attributes(tag, &name, span)?;

        let id = ElementId::new(self.elements.len());
        let parent = self.open.last().map(|open| open.id);
        let depth = self.open.len();

        trace!(tag = name, index = id.index(), depth; "Element opened");
        self.elements
            .push(Element::new(name.clone(), attributes, span, parent, depth));

        if !self_closing {
            self.open.push(OpenElement { id, name, span });
        }
        Ok(())
    }

    fn close(&mut self, name: &str, span: Span) -> Result<(), Diagnostic> {
        match self.open.pop() {
            None => Err(Diagnostic::error(format!(
                "closing tag `</{name}>` has no matching open element"
            ))
            .with_code(ErrorCode::E102)
            .with_label(span, "unexpected closing tag")),
            Some(open) if open.name != name => Err(Diagnostic::error(format!(
                "expected `</{}>`, found `</{name}>`",
                open.name
            ))
            .with_code(ErrorCode::E100)
            .with_label(span, "mismatched closing tag")
            .with_secondary_label(open.span, format!("`<{}>` opened here", open.name))
            .with_help("close elements in the reverse order they were opened")),
            Some(_) => Ok(()),
        }
    }

    fn text(&mut self, text: &str, span: Span) -> Result<(), Diagnostic> {
        match self.open.last() {
            Some(open) => self.elements[open.id.index()].push_text(text),
            None if is_blank(text) => {
                trace!(len = text.len(); "Ignoring whitespace outside the root element")
            }
            None => {
                return Err(Diagnostic::error("character data outside the root element")
                    .with_code(ErrorCode::E104)
                    .with_label(span, "not inside any element")
                    .with_help("move the text into an element or remove it"));
            }
        }
        Ok(())
    }

    /// The root element, once its closing tag has been seen.
    fn closed_root(&self) -> Option<&Element> {
        if self.open.is_empty() {
            self.elements.first()
        } else {
            None
        }
    }

    fn finish(self, source: &str) -> Result<Document, ParseError> {
        if !self.open.is_empty() {
            let mut collector = DiagnosticCollector::new();
            for open in self.open.iter().rev() {
                collector.emit(
                    Diagnostic::error(format!("element `{}` is never closed", open.name))
                        .with_code(ErrorCode::E101)
                        .with_label(open.span, "opened here")
                        .with_help(format!("add a matching `</{}>` tag", open.name)),
                );
            }
            collector.finish()?;
        }

        if self.elements.is_empty() {
            return Err(Diagnostic::error("document contains no elements")
                .with_code(ErrorCode::E103)
                .with_label(Span::at(source.len()), "end of input")
                .into());
        }

        Ok(Document::new(self.elements, source))
    }
}

/// Whitespace, or a byte order mark, is allowed around the root element.
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{feff}')
}

/// Rejects a tag the reader returned without its closing `>`.
fn check_terminated(source: &str, span: Span) -> Result<(), Diagnostic> {
    let tag = source.get(span.start()..span.end()).unwrap_or_default();
    if tag.ends_with('>') {
        return Ok(());
    }
    Err(Diagnostic::error("unterminated tag at end of input")
        .with_code(ErrorCode::E002)
        .with_label(span, "input ends inside this tag")
        .with_help("close the tag with `>`"))
}

fn read_attributes(tag: &BytesStart<'_>, name: &str, span: Span) -> Result<Attributes, Diagnostic> {
    let mut attributes = Attributes::new();

    for attr in tag.attributes() {
        let attr = attr.map_err(|err| {
            Diagnostic::error(format!("invalid attribute in `<{name}>`: {err}"))
                .with_code(ErrorCode::E003)
                .with_label(span, "in this tag")
        })?;

        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|err| {
            Diagnostic::error(format!("invalid value for attribute `{key}`: {err}"))
                .with_code(ErrorCode::E004)
                .with_label(span, "in this tag")
        })?;

        if attributes.contains_key(&key) {
            return Err(Diagnostic::error(format!("attribute `{key}` is repeated in `<{name}>`"))
                .with_code(ErrorCode::E003)
                .with_label(span, "in this tag")
                .with_help("attribute names must be unique within an element"));
        }
        attributes.insert(key, value.into_owned());
    }

    Ok(attributes)
}

/// Parse markup bytes into a [`Document`].
///
/// The input must be UTF-8.
///
/// # Errors
///
/// Returns a [`ParseError`] with an `E001` diagnostic for invalid UTF-8, or
/// any error [`parse`] reports.
pub fn parse_bytes(input: &[u8]) -> Result<Document, ParseError> {
    let source = std::str::from_utf8(input).map_err(|err| {
        Diagnostic::error("input is not valid UTF-8")
            .with_code(ErrorCode::E001)
            .with_label(Span::at(err.valid_up_to()), "invalid byte sequence starts here")
            .with_help("save the file with UTF-8 encoding")
    })?;

    parse(source)
}

/// Parse markup text into a [`Document`].
///
/// Elements are stored in document order with their attributes verbatim and
/// the character data that appears directly inside them. Comments,
/// processing instructions, the XML declaration and DOCTYPE are skipped.
///
/// # Errors
///
/// Returns a [`ParseError`] if the markup is not well-formed: reader errors
/// such as unterminated tags (`E002`), bad attributes (`E003`), bad entities
/// (`E004`), mismatched or stray closing tags (`E100`, `E102`), elements left
/// open at end of input (`E101`), an input without elements (`E103`), or
/// content outside the single root element (`E104`).
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(false);
    // Closing tags are matched by the builder to report both spans.
    reader.check_end_names(false);

    let mut builder = TreeBuilder::default();

    loop {
        let start = reader.buffer_position();
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                let span = Span::new(start..reader.buffer_position());
                return Err(Diagnostic::error(format!("malformed markup: {err}"))
                    .with_code(ErrorCode::E002)
                    .with_label(span, "error occurred here")
                    .into());
            }
        };
        let span = Span::new(start..reader.buffer_position());

        match event {
            Event::Start(tag) => {
                check_terminated(source, span)?;
                builder.open(&tag, span, false)?;
            }
            Event::Empty(tag) => {
                check_terminated(source, span)?;
                builder.open(&tag, span, true)?;
            }
            Event::End(tag) => {
                check_terminated(source, span)?;
                let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
                builder.close(&name, span)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|err| {
                    Diagnostic::error(format!("invalid character data: {err}"))
                        .with_code(ErrorCode::E004)
                        .with_label(span, "in this text")
                })?;
                builder.text(&text, span)?;
            }
            Event::CData(data) => {
                builder.text(&String::from_utf8_lossy(&data.into_inner()), span)?;
            }
            Event::Eof => {
                // The reader drops a trailing partial tag such as a lone `<`
                let rest = source.get(start..).unwrap_or_default();
                if !is_blank(rest) {
                    return Err(Diagnostic::error("unexpected end of input")
                        .with_code(ErrorCode::E002)
                        .with_label(Span::new(start..source.len()), "incomplete markup")
                        .into());
                }
                break;
            }
            _ => {}
        }
    }

    let document = builder.finish(source)?;
    debug!(elements = document.len(); "Markup parsed");

    Ok(document)
}
