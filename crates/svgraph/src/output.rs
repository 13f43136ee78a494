//! The JSON output schema.
//!
//! Field names and nesting are consumed by external tools and must stay
//! stable. The link fields are omitted when no link was resolved, so a
//! document without references serializes to the base schema.

use serde::Serialize;

/// The converted diagram: nodes and connectors in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputDocument {
    /// Nodes derived from text-like elements.
    pub texts: Vec<OutputNode>,
    /// Edges derived from connector-like elements.
    pub arrows: Vec<OutputEdge>,
}

impl OutputDocument {
    /// Encode the document as JSON, indented with two spaces when `pretty`.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] raised by the encoder.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// A labeled node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputNode {
    /// Synthetic id, `text0`, `text1`, ...
    pub id: String,
    pub content: String,
    pub form: Form,
    /// `id` of the referenced element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow_type: Option<String>,
}

/// Position and size of a node, as written in the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Form {
    /// Synthetic id, `form0`, `form1`, ...
    pub id: String,
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
}

/// A directional connector.
///
/// `start` and `end` are opaque descriptors taken verbatim from the path data
/// and the end marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputEdge {
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> OutputNode {
        OutputNode {
            id: "text0".to_string(),
            content: "Hello".to_string(),
            form: Form {
                id: "form0".to_string(),
                x: "10".to_string(),
                y: "20".to_string(),
                width: "12".to_string(),
                height: "12".to_string(),
            },
            linked_to: None,
            link_style: None,
            arrow_type: None,
        }
    }

    #[test]
    fn test_empty_document_has_both_arrays() {
        let json = OutputDocument::default().to_json(false).unwrap();
        assert_eq!(json, r#"{"texts":[],"arrows":[]}"#);
    }

    #[test]
    fn test_node_field_order_and_names() {
        let doc = OutputDocument {
            texts: vec![node()],
            arrows: Vec::new(),
        };

        assert_eq!(
            doc.to_json(false).unwrap(),
            r#"{"texts":[{"id":"text0","content":"Hello","form":{"id":"form0","x":"10","y":"20","width":"12","height":"12"}}],"arrows":[]}"#
        );
    }

    #[test]
    fn test_link_fields_serialized_when_present() {
        let edge = OutputEdge {
            start: "M0 0".to_string(),
            end: String::new(),
            linked_to: Some("a".to_string()),
            link_style: Some("dashed".to_string()),
            arrow_type: None,
        };

        assert_eq!(
            serde_json::to_string(&edge).unwrap(),
            r#"{"start":"M0 0","end":"","linked_to":"a","link_style":"dashed"}"#
        );
    }

    #[test]
    fn test_pretty_uses_two_space_indent() {
        let json = OutputDocument::default().to_json(true).unwrap();
        assert_eq!(json, "{\n  \"texts\": [],\n  \"arrows\": []\n}");
    }
}
