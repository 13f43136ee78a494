//! The element arena produced by the parser.
//!
//! Elements are owned by a single [`Document`] in document order. Any relation
//! between elements (parent, resolved link) is stored as an [`ElementId`]
//! into that arena, never as a second owner.

use std::{fmt, slice};

use indexmap::IndexMap;

use crate::span::Span;

/// Attribute map of an element: qualified name → verbatim value.
pub type Attributes = IndexMap<String, String>;

/// Position of an element in its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the document-order index of the element.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A resolved, non-owning relation from one element to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    target: ElementId,
    style: Option<String>,
    arrow_kind: Option<String>,
}

impl Link {
    /// Creates a link to `target` carrying the given style and marker metadata.
    pub fn new(target: ElementId, style: Option<String>, arrow_kind: Option<String>) -> Self {
        Self {
            target,
            style,
            arrow_kind,
        }
    }

    /// The referenced element.
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Style copied when the link was resolved.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Marker (arrow head) copied when the link was resolved.
    pub fn arrow_kind(&self) -> Option<&str> {
        self.arrow_kind.as_deref()
    }
}

/// One markup node.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attributes: Attributes,
    text: String,
    span: Span,
    parent: Option<ElementId>,
    depth: usize,
    link: Option<Link>,
}

impl Element {
    pub(crate) fn new(
        tag: String,
        attributes: Attributes,
        span: Span,
        parent: Option<ElementId>,
        depth: usize,
    ) -> Self {
        Self {
            tag,
            attributes,
            text: String::new(),
            span,
            parent,
            depth,
            link: None,
        }
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Qualified tag name, verbatim (`text`, `path`, `svg:g`, ...).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// All attributes of the element.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Value of a single attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Value of the `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Character data found directly inside the element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte span of the element's start tag.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Enclosing element, `None` for the root.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Nesting depth; the root element has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Resolved link, if any.
    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }
}

/// All elements of a markup document in document order, plus the source text.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    source: String,
}

impl Document {
    pub(crate) fn new(elements: Vec<Element>, source: impl Into<String>) -> Self {
        Self {
            elements,
            source: source.into(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Looks up an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// The root element.
    pub fn root(&self) -> Option<&Element> {
        self.elements.first()
    }

    /// Elements in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Iterates over `(id, element)` pairs in document order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.elements.iter().enumerate(),
        }
    }

    /// The markup this document was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Attaches a resolved link to the element `id`.
    ///
    /// Returns `false`, leaving the element untouched, when either end does
    /// not exist or the link would point at the element itself.
    ///
    /// Reserved for reference resolution, which wraps the document so it
    /// cannot be annotated again afterwards.
    #[doc(hidden)]
    pub fn attach_link(&mut self, id: ElementId, link: Link) -> bool {
        if id == link.target || link.target.0 >= self.elements.len() {
            return false;
        }
        match self.elements.get_mut(id.0) {
            Some(element) => {
                element.link = Some(link);
                true
            }
            None => false,
        }
    }
}

/// Iterator returned by [`Document::iter`].
pub struct Iter<'a> {
    inner: std::iter::Enumerate<slice::Iter<'a, Element>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ElementId, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(index, element)| (ElementId(index), element))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
