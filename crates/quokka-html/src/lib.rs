//! HTML parser for the Quokka pipeline.
//!
//! # Scope
//!
//! This crate implements a small, strict recursive-descent parser:
//! - Elements with quoted `name="value"` attributes
//! - Text runs
//! - Matching closing tags (`</tag>`)
//!
//! Documents with more than one top-level node are wrapped in a synthesized
//! `<html>` element so callers always receive a single root.
//!
//! # Not Implemented
//!
//! Malformed markup is rejected rather than repaired. There is no WHATWG
//! tokenizer state machine, no implied end tags, no comments, doctypes,
//! void elements, or character references.

/// Errors produced while parsing HTML.
pub mod error;
/// Recursive-descent HTML parser and tree dumping.
pub mod parser;

pub use error::HtmlParseError;
pub use parser::{HTMLParser, format_tree, parse, print_tree};
