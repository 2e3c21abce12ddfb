//! Common utilities for the Quokka pipeline.
//!
//! This crate provides shared infrastructure used by the HTML and CSS parsers
//! and by the later pipeline stages:
//! - **Cursor** - position-tracked, code-point-wise reader over source text
//! - **Syntax errors** - the "expected X, found Y" failure both parsers share
//! - **Warning System** - colored, deduplicated terminal output for accepted quirks

pub mod cursor;
pub mod error;
pub mod warning;

pub use cursor::Cursor;
pub use error::{Found, SyntaxError};
