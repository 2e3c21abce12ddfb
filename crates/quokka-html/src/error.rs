//! HTML parse errors.
//!
//! Every variant is fatal: the parser never returns a partial tree.

use quokka_common::{Found, SyntaxError};
use thiserror::Error;

/// A structural problem in the HTML source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HtmlParseError {
    /// A required delimiter (`<`, `>`, `/`, `=`, closing quote) was missing.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// `<` was not followed by a tag name.
    #[error("expected a tag name at position {position}")]
    EmptyTagName {
        /// Code-point offset of the missing name.
        position: usize,
    },

    /// An attribute list contained something other than a name.
    #[error("expected an attribute name, found {found} at position {position}")]
    EmptyAttributeName {
        /// What was there instead.
        found: Found,
        /// Code-point offset of the missing name.
        position: usize,
    },

    /// Attribute values must open with `'` or `"`.
    #[error("expected a quoted attribute value, found {found} at position {position}")]
    UnquotedAttributeValue {
        /// What was there instead of a quote.
        found: Found,
        /// Code-point offset of the value.
        position: usize,
    },

    /// The closing tag names a different element than the open one.
    #[error("closing tag </{found}> does not match <{expected}> at position {position}")]
    MismatchedClosingTag {
        /// Tag name of the element being closed.
        expected: String,
        /// Tag name found in the closing tag.
        found: String,
        /// Code-point offset of the closing tag name.
        position: usize,
    },

    /// A closing tag appeared at the top level with no open element.
    #[error("closing tag without a matching open tag at position {position}")]
    UnexpectedClosingTag {
        /// Code-point offset of the `</`.
        position: usize,
    },
}
