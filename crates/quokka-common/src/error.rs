//! Syntax errors shared by the HTML and CSS parsers.
//!
//! Both parsers are strict: the first structural problem aborts the parse.
//! [`SyntaxError`] is the low-level "expected X, found Y" failure raised by
//! [`Cursor::expect`](crate::Cursor::expect); each parser wraps it in its own
//! error enum alongside the failures that only it can produce.

use std::fmt;

use thiserror::Error;

/// What the cursor actually saw where something else was required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    /// A concrete character.
    Char(char),
    /// The source text ran out.
    EndOfInput,
}

impl From<Option<char>> for Found {
    fn from(c: Option<char>) -> Self {
        c.map_or(Self::EndOfInput, Self::Char)
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c:?}"),
            Self::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// A required delimiter or token was missing.
///
/// `position` is a code-point offset into the source, matching
/// [`Cursor::position`](crate::Cursor::position).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found} at position {position}")]
pub struct SyntaxError {
    /// Human-readable description of what was required, e.g. `'>'`.
    pub expected: String,
    /// What was there instead.
    pub found: Found,
    /// Code-point offset where the failure was detected.
    pub position: usize,
}

impl SyntaxError {
    /// Build an error for `expected` at `position`.
    pub fn new(expected: impl Into<String>, found: impl Into<Found>, position: usize) -> Self {
        Self {
            expected: expected.into(),
            found: found.into(),
            position,
        }
    }
}
