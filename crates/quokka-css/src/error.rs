//! CSS parse errors and layout-tree construction errors.

use quokka_common::{Found, SyntaxError};
use thiserror::Error;

/// A structural problem in CSS source. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssParseError {
    /// A required delimiter (`{`, `}`, `:`, `;`, `#`) was missing.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Something other than `,` or `{` followed a selector.
    #[error("unexpected {found} in selector list at position {position}")]
    UnexpectedSelectorCharacter {
        /// What followed the selector.
        found: Found,
        /// Code-point offset of the offending character.
        position: usize,
    },

    /// A declaration did not start with a property name.
    #[error("expected a property name, found {found} at position {position}")]
    ExpectedPropertyName {
        /// What was there instead.
        found: Found,
        /// Code-point offset of the missing name.
        position: usize,
    },

    /// A declaration had nothing after its colon.
    #[error("expected a value, found {found} at position {position}")]
    ExpectedValue {
        /// What was there instead.
        found: Found,
        /// Code-point offset of the missing value.
        position: usize,
    },

    /// The numeric part of a length could not be parsed.
    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber {
        /// The digits and dots that were consumed.
        text: String,
        /// Code-point offset of the number.
        position: usize,
    },

    /// A length used a unit other than `px`, `em` or `rem`.
    #[error("unknown unit '{unit}' at position {position}")]
    UnknownUnit {
        /// The unit as written (empty if the number had no unit).
        unit: String,
        /// Code-point offset of the unit.
        position: usize,
    },

    /// `#` was not followed by exactly six hex digits.
    #[error("invalid color '#{text}' at position {position}")]
    InvalidColor {
        /// The hex digits that were consumed.
        text: String,
        /// Code-point offset of the digits.
        position: usize,
    },
}

/// Misuse of the layout-tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The root of a layout tree must generate a box, but this node has
    /// `display: none`.
    #[error("cannot build a layout tree for {node}: it has display: none")]
    DisplayNone {
        /// Short description of the node, e.g. `<div>` or `#text`.
        node: String,
    },
}
