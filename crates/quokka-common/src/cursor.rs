//! Position-tracked reader over source text.
//!
//! Both the HTML parser and the CSS parser embed a [`Cursor`] and drive it
//! with the same handful of primitives: look at the next character, consume
//! it, or consume a run of characters matching a predicate.
//!
//! Positions are counted in Unicode scalar values (code points), not bytes,
//! so a multi-byte character such as `あ` advances the position by exactly one.

use crate::error::SyntaxError;

/// A forward-only reader over a borrowed source string.
///
/// Invariant: `0 <= position <= source.chars().count()`. The position never
/// moves backwards. A cursor belongs to exactly one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<'a> {
    source: &'a str,
    /// Byte offset of the next unread character; always on a char boundary.
    offset: usize,
    /// Number of code points consumed so far.
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            position: 0,
        }
    }

    /// Create a cursor that has already consumed `position` code points.
    ///
    /// A position past the end of `source` is clamped to the end.
    #[must_use]
    pub fn at(source: &'a str, position: usize) -> Self {
        let mut cursor = Self::new(source);
        for _ in 0..position {
            if cursor.advance().is_none() {
                break;
            }
        }
        cursor
    }

    /// Code-point offset of the next unread character.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The unread remainder of the source.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Has all input been consumed?
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// The next character, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consume and return the next character.
    ///
    /// Returns `None` at end of input, in which case the position is unchanged.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        self.position += 1;
        Some(c)
    }

    /// Do the next characters start with `s`? Never consumes input.
    #[must_use]
    pub fn starts_with(&self, s: &str) -> bool {
        self.remaining().starts_with(s)
    }

    /// Consume characters while `test` holds, returning them.
    ///
    /// Stops at the first character failing `test` or at end of input. An
    /// empty result is not an error.
    pub fn consume_while(&mut self, mut test: impl FnMut(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(c) = self.peek() {
            if !test(c) {
                break;
            }
            self.offset += c.len_utf8();
            self.position += 1;
            result.push(c);
        }
        result
    }

    /// Skip over any whitespace.
    pub fn consume_whitespace(&mut self) {
        let _ = self.consume_while(char::is_whitespace);
    }

    /// Consume exactly `expected`, or fail without consuming anything.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] describing what was found instead.
    pub fn expect(&mut self, expected: char) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(c) if c == expected => {
                let _ = self.advance();
                Ok(())
            }
            found => Err(SyntaxError::new(
                format!("{expected:?}"),
                found,
                self.position,
            )),
        }
    }
}
