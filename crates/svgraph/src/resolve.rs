//! Reference resolution.
//!
//! Turns reference attributes (`xlink:href="#node"` and friends) into
//! [`Link`]s between elements of the same [`Document`]. Resolution runs in two
//! passes: the `id` index is built over the complete document first, then
//! every reference is looked up, so forward references resolve like backward
//! ones.

use std::collections::{HashMap, HashSet};

use log::{debug, info};

use svgraph_parser::{Document, Element, ElementId, Link, error::Diagnostic};

use crate::config::LinkConfig;

/// Attribute copied into a link's style.
const STYLE_ATTRIBUTE: &str = "style";
/// Attribute copied into a link's arrow kind.
const MARKER_ATTRIBUTE: &str = "marker-end";

/// A document whose references have been resolved.
///
/// Only read access is available: the document cannot be annotated again.
#[derive(Debug, Clone)]
pub struct ResolvedDocument {
    document: Document,
    warnings: Vec<Diagnostic>,
}

impl ResolvedDocument {
    /// The underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The element `id` links to, if its reference was resolved.
    pub fn link_target(&self, id: ElementId) -> Option<&Element> {
        let link = self.document.get(id)?.link()?;
        self.document.get(link.target())
    }

    /// Number of elements carrying a resolved link.
    pub fn link_count(&self) -> usize {
        self.document
            .elements()
            .iter()
            .filter(|element| element.link().is_some())
            .count()
    }

    /// Non-fatal problems found while resolving: duplicate ids and
    /// self-references.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// Resolves reference attributes into links.
#[derive(Debug)]
pub struct Resolver<'a> {
    config: &'a LinkConfig,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver recognising the reference attributes in `config`.
    pub fn new(config: &'a LinkConfig) -> Self {
        Self { config }
    }

    /// Resolve every reference in `document`.
    ///
    /// References to a missing `id`, empty references and references of an
    /// element to itself are left unresolved; none of them is an error.
    pub fn resolve(&self, mut document: Document) -> ResolvedDocument {
        let mut warnings = Vec::new();
        let links = {
            let index = build_index(&document, &mut warnings);
            let targets = self.targets(&document, &index, &mut warnings);

            document
                .iter()
                .zip(&targets)
                .filter_map(|((source, _), target)| {
                    let target = (*target)?;
                    let style = chain_attribute(&document, &targets, source, target, STYLE_ATTRIBUTE);
                    let arrow_kind =
                        chain_attribute(&document, &targets, source, target, MARKER_ATTRIBUTE);
                    Some((source, Link::new(target, style, arrow_kind)))
                })
                .collect::<Vec<_>>()
        };

        let mut attached = 0;
        for (source, link) in links {
            if document.attach_link(source, link) {
                attached += 1;
            }
        }

        info!(
            elements = document.len(),
            links = attached,
            warnings = warnings.len();
            "References resolved"
        );
        ResolvedDocument { document, warnings }
    }

    /// First-hop target of every element, indexed by document order.
    fn targets(
        &self,
        document: &Document,
        index: &HashMap<&str, ElementId>,
        warnings: &mut Vec<Diagnostic>,
    ) -> Vec<Option<ElementId>> {
        document
            .iter()
            .map(|(id, element)| {
                let (attribute, value) = self.reference(element)?;
                let key = reference_key(value);
                if key.is_empty() {
                    debug!(element = id.index(), attribute; "Empty reference ignored");
                    return None;
                }

                match index.get(key) {
                    Some(&target) if target == id => {
                        debug!(element = id.index(), target = key; "Self-reference ignored");
                        warnings.push(
                            Diagnostic::warning(format!("element `{key}` references itself"))
                                .with_label(element.span(), "reference ignored"),
                        );
                        None
                    }
                    Some(&target) => {
                        debug!(element = id.index(), target = key; "Reference resolved");
                        Some(target)
                    }
                    None => {
                        debug!(element = id.index(), target = key; "Reference left unresolved");
                        None
                    }
                }
            })
            .collect()
    }

    /// The first configured reference attribute present on `element`.
    fn reference<'e>(&self, element: &'e Element) -> Option<(&'a str, &'e str)> {
        self.config.attributes().iter().find_map(|name| {
            element
                .attribute(name)
                .map(|value| (name.as_str(), value))
        })
    }
}

/// Build the `id` → element index. A repeated `id` maps to its last element.
fn build_index<'d>(
    document: &'d Document,
    warnings: &mut Vec<Diagnostic>,
) -> HashMap<&'d str, ElementId> {
    let mut index = HashMap::with_capacity(document.len());
    for (id, element) in document.iter() {
        let Some(key) = element.id() else {
            continue;
        };
        let Some(previous) = index.insert(key, id) else {
            continue;
        };
        debug!(id = key, first = previous.index(), second = id.index(); "Duplicate id");

        let mut warning = Diagnostic::warning(format!("duplicate id `{key}`"))
            .with_label(element.span(), "references resolve to this element")
            .with_help("give every element a unique `id`");
        if let Some(earlier) = document.get(previous) {
            warning = warning.with_secondary_label(earlier.span(), "earlier element with this id");
        }
        warnings.push(warning);
    }
    index
}

/// Strip whitespace and a single leading `#` from a reference value.
fn reference_key(value: &str) -> &str {
    let value = value.trim();
    value.strip_prefix('#').unwrap_or(value)
}

/// Find `attribute` along the resolution chain starting at `target`.
///
/// Walks `target`, its own target and so on until an element carries the
/// attribute, falling back to `source` itself. Every element is visited at
/// most once, so reference cycles terminate.
fn chain_attribute(
    document: &Document,
    targets: &[Option<ElementId>],
    source: ElementId,
    target: ElementId,
    attribute: &str,
) -> Option<String> {
    let mut visited = HashSet::from([source]);
    let mut current = Some(target);

    while let Some(id) = current {
        if !visited.insert(id) {
            break;
        }
        if let Some(value) = document.get(id).and_then(|element| element.attribute(attribute)) {
            return Some(value.to_string());
        }
        current = targets.get(id.index()).copied().flatten();
    }

    document
        .get(source)
        .and_then(|element| element.attribute(attribute))
        .map(str::to_string)
}
