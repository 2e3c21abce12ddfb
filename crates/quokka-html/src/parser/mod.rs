//! Recursive-descent HTML parser.
//!
//! The grammar accepted here is deliberately small:
//!
//! ```text
//! nodes     := (whitespace* node)*            -- stops at EOF or "</"
//! node      := element | text
//! element   := "<" name attribute* ">" nodes "</" name ">"
//! attribute := whitespace* name "=" quoted
//! quoted    := '"' [^"]* '"' | "'" [^']* "'"
//! text      := [^<]*
//! ```

use std::fmt::Write as _;

use quokka_common::Cursor;
use quokka_common::warning::warn_once;
use quokka_dom::{AttributesMap, DomNode, ElementData, NodeType};

use crate::error::HtmlParseError;

/// Parse an HTML document and return its root node.
///
/// If the source contains exactly one top-level node it is returned as-is.
/// Otherwise (zero or several top-level nodes) they are wrapped in a
/// synthesized `<html>` element with no attributes.
///
/// # Errors
///
/// Returns the first structural problem found; no partial tree is produced.
pub fn parse(source: &str) -> Result<DomNode, HtmlParseError> {
    HTMLParser::new(source).run()
}

/// HTML parser. Owns the cursor for a single parse.
#[derive(Debug, Clone)]
pub struct HTMLParser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> HTMLParser<'a> {
    /// Create a parser at the start of `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Code-point offset of the next unread character.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Parse the whole source into a single root node.
    ///
    /// # Errors
    ///
    /// See [`parse`].
    pub fn run(mut self) -> Result<DomNode, HtmlParseError> {
        let mut nodes = self.parse_nodes()?;

        // parse_nodes also stops at "</"; at the top level there is nothing
        // for it to close.
        if !self.cursor.is_at_end() {
            return Err(HtmlParseError::UnexpectedClosingTag {
                position: self.cursor.position(),
            });
        }

        if nodes.len() == 1
            && let Some(root) = nodes.pop()
        {
            return Ok(root);
        }
        Ok(DomNode::element("html", AttributesMap::new(), nodes))
    }

    /// Parse a sequence of sibling nodes.
    ///
    /// Whitespace before each node is skipped. Stops at end of input or at
    /// the start of a closing tag (`</`), which is left unconsumed.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::parse_node`].
    pub fn parse_nodes(&mut self) -> Result<Vec<DomNode>, HtmlParseError> {
        let mut nodes = Vec::new();
        loop {
            self.cursor.consume_whitespace();
            if self.cursor.is_at_end() || self.cursor.starts_with("</") {
                break;
            }
            nodes.push(self.parse_node()?);
        }
        Ok(nodes)
    }

    /// Parse a single node: an element if the next character is `<`,
    /// otherwise a text run.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::parse_element`].
    pub fn parse_node(&mut self) -> Result<DomNode, HtmlParseError> {
        match self.cursor.peek() {
            Some('<') => self.parse_element(),
            _ => Ok(self.parse_text()),
        }
    }

    /// Parse a text run up to the next `<` or end of input.
    ///
    /// An empty run is accepted and yields an empty text node.
    pub fn parse_text(&mut self) -> DomNode {
        let text = self.cursor.consume_while(|c| c != '<');
        if text.is_empty() {
            let _ = warn_once("HTML", "empty text run produced an empty text node");
        }
        DomNode::text(text)
    }

    /// Parse a single element, including its open tag, contents, and closing tag.
    ///
    /// Children are parsed recursively, so stack use grows with nesting depth.
    ///
    /// # Errors
    ///
    /// Fails on a missing delimiter, an empty tag name, bad attributes, or a
    /// closing tag whose name differs from the opening tag's.
    pub fn parse_element(&mut self) -> Result<DomNode, HtmlParseError> {
        // Opening tag.
        self.cursor.expect('<')?;
        let tag_name = self.parse_tag_name()?;
        let attrs = self.parse_attributes()?;
        self.cursor.expect('>')?;

        // Contents.
        let children = self.parse_nodes()?;

        // Closing tag.
        self.cursor.expect('<')?;
        self.cursor.expect('/')?;
        let position = self.cursor.position();
        let closing = self.cursor.consume_while(is_name_char);
        if closing != tag_name {
            return Err(HtmlParseError::MismatchedClosingTag {
                expected: tag_name,
                found: closing,
                position,
            });
        }
        self.cursor.expect('>')?;

        Ok(DomNode {
            children,
            node_type: NodeType::Element(ElementData::new(tag_name, attrs)),
        })
    }

    /// Parse a list of `name="value"` pairs separated by whitespace, stopping
    /// before the `>` that ends the opening tag.
    ///
    /// A repeated attribute name keeps the last value.
    ///
    /// # Errors
    ///
    /// Fails on a missing name, a missing `=`, or a badly quoted value.
    pub fn parse_attributes(&mut self) -> Result<AttributesMap, HtmlParseError> {
        let mut attributes = AttributesMap::new();
        loop {
            self.cursor.consume_whitespace();
            if self.cursor.peek() == Some('>') {
                break;
            }
            let (name, value) = self.parse_attr()?;
            let _ = attributes.insert(name, value);
        }
        Ok(attributes)
    }

    /// Parse a single `name="value"` pair.
    fn parse_attr(&mut self) -> Result<(String, String), HtmlParseError> {
        let position = self.cursor.position();
        let name = self.cursor.consume_while(is_attr_name_char);
        if name.is_empty() {
            return Err(HtmlParseError::EmptyAttributeName {
                found: self.cursor.peek().into(),
                position,
            });
        }
        self.cursor.expect('=')?;
        let value = self.parse_attr_value()?;
        Ok((name, value))
    }

    /// Parse a value wrapped in matching single or double quotes.
    fn parse_attr_value(&mut self) -> Result<String, HtmlParseError> {
        let position = self.cursor.position();
        let open_quote = match self.cursor.peek() {
            Some(quote @ ('"' | '\'')) => quote,
            found => {
                return Err(HtmlParseError::UnquotedAttributeValue {
                    found: found.into(),
                    position,
                });
            }
        };
        let _ = self.cursor.advance();
        let value = self.cursor.consume_while(|c| c != open_quote);
        self.cursor.expect(open_quote)?;
        Ok(value)
    }

    fn parse_tag_name(&mut self) -> Result<String, HtmlParseError> {
        let position = self.cursor.position();
        let name = self.cursor.consume_while(is_name_char);
        if name.is_empty() {
            return Err(HtmlParseError::EmptyTagName { position });
        }
        Ok(name)
    }
}

/// Tag names are ASCII alphanumeric.
const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Attribute names additionally allow `-` and `_` (`data-id`, `aria-label`).
const fn is_attr_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Render a DOM tree as indented text, one node per line.
///
/// Attributes are sorted by name so the output is stable.
#[must_use]
pub fn format_tree(node: &DomNode) -> String {
    let mut out = String::new();
    write_tree(&mut out, node, 0);
    out
}

/// Print a DOM tree to stdout (debugging aid).
pub fn print_tree(node: &DomNode) {
    print!("{}", format_tree(node));
}

fn write_tree(out: &mut String, node: &DomNode, indent: usize) {
    let prefix = "  ".repeat(indent);
    match &node.node_type {
        NodeType::Element(data) => {
            if data.attrs.is_empty() {
                let _ = writeln!(out, "{prefix}<{}>", data.tag_name);
            } else {
                let mut attrs: Vec<_> = data.attrs.iter().collect();
                attrs.sort();
                let attrs: Vec<String> = attrs
                    .into_iter()
                    .map(|(k, v)| format!("{k}=\"{v}\""))
                    .collect();
                let _ = writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "));
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            let _ = writeln!(out, "{prefix}\"{display}\"");
        }
    }
    for child in &node.children {
        write_tree(out, child, indent + 1);
    }
}
