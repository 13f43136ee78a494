//! Error codes for the svgraph diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Markup reader errors
//! - `E1xx` - Element structure errors
//! - `E2xx` - Validation errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Markup Reader Errors (E0xx)
    // =========================================================================
    /// Invalid encoding.
    ///
    /// The input bytes are not valid UTF-8.
    E001,

    /// Malformed markup.
    ///
    /// The XML reader rejected the input, e.g. an unterminated tag or comment.
    E002,

    /// Invalid attribute.
    ///
    /// An attribute is duplicated, unquoted, or otherwise malformed.
    E003,

    /// Invalid character data.
    ///
    /// Text content or an attribute value contains an unknown or malformed
    /// entity reference.
    E004,

    // =========================================================================
    // Element Structure Errors (E1xx)
    // =========================================================================
    /// Mismatched closing tag.
    ///
    /// A closing tag does not match the innermost open element.
    E100,

    /// Unclosed element.
    ///
    /// The input ended while an element was still open.
    E101,

    /// Unexpected closing tag.
    ///
    /// A closing tag appeared with no element open.
    E102,

    /// Empty document.
    ///
    /// The input contains no elements at all.
    E103,

    /// Content outside the root element.
    ///
    /// A second top-level element, or non-whitespace character data, appears
    /// before or after the root element.
    E104,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Invalid numeric value.
    ///
    /// A position or size attribute used for a node's form is not a number.
    E200,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid encoding",
            ErrorCode::E002 => "malformed markup",
            ErrorCode::E003 => "invalid attribute",
            ErrorCode::E004 => "invalid character data",
            ErrorCode::E100 => "mismatched closing tag",
            ErrorCode::E101 => "unclosed element",
            ErrorCode::E102 => "unexpected closing tag",
            ErrorCode::E103 => "empty document",
            ErrorCode::E104 => "content outside the root element",
            ErrorCode::E200 => "invalid numeric value",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
