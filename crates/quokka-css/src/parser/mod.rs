//! CSS parser.
//!
//! A strict recursive-descent parser that reads directly from source text
//! (there is no separate tokenizer pass):
//!
//! ```text
//! stylesheet  := (whitespace* rule)*
//! rule        := selectors "{" declaration* "}"
//! selectors   := simple ("," simple)*
//! simple      := ("#" ident | "." ident | "*" | ident)*
//! declaration := ident ":" value ";"
//! value       := number unit | "#" hex{6} | ident
//! ```
//!
//! Whitespace is allowed between all tokens of a rule.

use std::str::FromStr;

use serde::Serialize;

use quokka_common::Cursor;
use quokka_common::warning::warn_once;

use crate::error::CssParseError;
use crate::selector::{Selector, SimpleSelector, sort_by_specificity};
use crate::values::{ColorValue, CssValue, Unit};

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-a-declaration)
///
/// A CSS declaration (e.g., `margin: 10px`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    /// The property name.
    pub name: String,
    /// The property value.
    pub value: CssValue,
}

impl Declaration {
    /// Create a declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, value: CssValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-a-qualified-rule)
///
/// A CSS style rule (selectors + declarations).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    /// The selector list, highest specificity first.
    pub selectors: Vec<Selector>,
    /// The declarations in this rule block, in source order.
    pub declarations: Vec<Declaration>,
}

/// [§ 5.3.2 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed CSS stylesheet. Rules keep their source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Stylesheet {
    /// The list of rules in the stylesheet.
    pub rules: Vec<Rule>,
}

/// Parse a whole stylesheet.
///
/// # Errors
///
/// Returns the first structural problem found; no partial stylesheet is produced.
pub fn parse(source: &str) -> Result<Stylesheet, CssParseError> {
    CSSParser::new(source).parse_stylesheet()
}

/// Is `c` allowed in an identifier (`[0-9A-Za-z_-]`)?
#[must_use]
pub const fn valid_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// CSS parser. Owns the cursor for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSSParser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> CSSParser<'a> {
    /// Create a parser at the start of `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Create a parser that resumes `position` code points into `source`.
    #[must_use]
    pub fn at(source: &'a str, position: usize) -> Self {
        Self {
            cursor: Cursor::at(source, position),
        }
    }

    /// Code-point offset of the next unread character.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Parse rules until end of input.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::parse_rule`].
    pub fn parse_stylesheet(&mut self) -> Result<Stylesheet, CssParseError> {
        let mut rules = Vec::new();
        loop {
            self.cursor.consume_whitespace();
            if self.cursor.is_at_end() {
                break;
            }
            rules.push(self.parse_rule()?);
        }
        Ok(Stylesheet { rules })
    }

    /// Parse a rule set: `<selectors> { <declarations> }`.
    ///
    /// # Errors
    ///
    /// Fails if either the selector list or the declaration block is malformed.
    pub fn parse_rule(&mut self) -> Result<Rule, CssParseError> {
        Ok(Rule {
            selectors: self.parse_selectors()?,
            declarations: self.parse_declaration_block()?,
        })
    }

    /// Parse a comma-separated list of selectors, stopping before `{`.
    ///
    /// The list is returned sorted by specificity, highest first.
    ///
    /// # Errors
    ///
    /// Fails if a selector is empty (as in `p, {` or a bare `{`), or is
    /// followed by anything other than `,` or `{`.
    pub fn parse_selectors(&mut self) -> Result<Vec<Selector>, CssParseError> {
        let mut selectors = Vec::new();
        loop {
            let start = self.cursor.position();
            let selector = self.parse_simple_selector();
            if self.cursor.position() == start {
                return Err(CssParseError::UnexpectedSelectorCharacter {
                    found: self.cursor.peek().into(),
                    position: start,
                });
            }
            selectors.push(Selector::Simple(selector));
            self.cursor.consume_whitespace();
            match self.cursor.peek() {
                Some(',') => {
                    let _ = self.cursor.advance();
                    self.cursor.consume_whitespace();
                }
                Some('{') => break,
                found => {
                    return Err(CssParseError::UnexpectedSelectorCharacter {
                        found: found.into(),
                        position: self.cursor.position(),
                    });
                }
            }
        }
        sort_by_specificity(&mut selectors);
        Ok(selectors)
    }

    /// Parse one simple selector, e.g. `type#id.class1.class2`.
    ///
    /// Stops at the first character that cannot continue the selector. If the
    /// selector names a tag or an id twice, the later one wins.
    pub fn parse_simple_selector(&mut self) -> SimpleSelector {
        let mut selector = SimpleSelector::default();
        while let Some(c) = self.cursor.peek() {
            match c {
                '#' => {
                    let _ = self.cursor.advance();
                    let id = self.parse_identifier();
                    if let Some(previous) = selector.id.replace(id) {
                        let _ = warn_once(
                            "CSS",
                            &format!("selector names more than one id; '#{previous}' is ignored"),
                        );
                    }
                }
                '.' => {
                    let _ = self.cursor.advance();
                    selector.class.push(self.parse_identifier());
                }
                '*' => {
                    // Universal selector; contributes nothing.
                    let _ = self.cursor.advance();
                }
                c if valid_identifier_char(c) => {
                    let tag_name = self.parse_identifier();
                    if let Some(previous) = selector.tag_name.replace(tag_name) {
                        let _ = warn_once(
                            "CSS",
                            &format!("selector names more than one type; '{previous}' is ignored"),
                        );
                    }
                }
                _ => break,
            }
        }
        selector
    }

    /// Parse a `{ ... }` block of declarations.
    ///
    /// # Errors
    ///
    /// Fails on a missing brace or a malformed declaration.
    pub fn parse_declaration_block(&mut self) -> Result<Vec<Declaration>, CssParseError> {
        self.cursor.expect('{')?;
        let mut declarations = Vec::new();
        loop {
            self.cursor.consume_whitespace();
            if self.cursor.peek() == Some('}') {
                let _ = self.cursor.advance();
                break;
            }
            declarations.push(self.parse_declaration()?);
        }
        Ok(declarations)
    }

    /// Parse one `<property>: <value>;` declaration.
    ///
    /// # Errors
    ///
    /// Fails on a missing name, colon, value, or terminating semicolon.
    pub fn parse_declaration(&mut self) -> Result<Declaration, CssParseError> {
        let position = self.cursor.position();
        let name = self.parse_identifier();
        if name.is_empty() {
            return Err(CssParseError::ExpectedPropertyName {
                found: self.cursor.peek().into(),
                position,
            });
        }
        self.cursor.consume_whitespace();
        self.cursor.expect(':')?;
        self.cursor.consume_whitespace();
        let value = self.parse_value()?;
        self.cursor.consume_whitespace();
        self.cursor.expect(';')?;
        Ok(Declaration { name, value })
    }

    /// Parse a value: a length if it starts with a digit, a color if it
    /// starts with `#`, otherwise a keyword.
    ///
    /// # Errors
    ///
    /// Fails on a bad number, unit or color, or if there is no value at all.
    pub fn parse_value(&mut self) -> Result<CssValue, CssParseError> {
        match self.cursor.peek() {
            Some('0'..='9') => self.parse_length(),
            Some('#') => self.parse_color(),
            _ => {
                let position = self.cursor.position();
                let keyword = self.parse_identifier();
                if keyword.is_empty() {
                    return Err(CssParseError::ExpectedValue {
                        found: self.cursor.peek().into(),
                        position,
                    });
                }
                Ok(CssValue::Keyword(keyword))
            }
        }
    }

    /// Parse a number immediately followed by a unit.
    fn parse_length(&mut self) -> Result<CssValue, CssParseError> {
        Ok(CssValue::Length(self.parse_float()?, self.parse_unit()?))
    }

    /// Parse digits and dots as an `f32`.
    fn parse_float(&mut self) -> Result<f32, CssParseError> {
        let position = self.cursor.position();
        let text = self
            .cursor
            .consume_while(|c| c.is_ascii_digit() || c == '.');
        text.parse()
            .map_err(|_| CssParseError::InvalidNumber { text, position })
    }

    /// Parse a unit name, matched case-insensitively.
    fn parse_unit(&mut self) -> Result<Unit, CssParseError> {
        let position = self.cursor.position();
        let unit = self.parse_identifier();
        Unit::from_str(&unit).map_err(|_| CssParseError::UnknownUnit { unit, position })
    }

    /// Parse `#` followed by exactly six hex digits.
    fn parse_color(&mut self) -> Result<CssValue, CssParseError> {
        self.cursor.expect('#')?;
        let position = self.cursor.position();
        let mut taken = 0;
        let text = self.cursor.consume_while(|c| {
            let accept = taken < 6 && c.is_ascii_hexdigit();
            if accept {
                taken += 1;
            }
            accept
        });
        ColorValue::from_hex(&text)
            .map(CssValue::Color)
            .ok_or(CssParseError::InvalidColor { text, position })
    }

    /// Parse an identifier (possibly empty).
    pub fn parse_identifier(&mut self) -> String {
        self.cursor.consume_while(valid_identifier_char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quokka_common::Found;

    #[test]
    fn test_valid_identifier_char() {
        assert!(valid_identifier_char('a'));
        assert!(valid_identifier_char('Z'));
        assert!(valid_identifier_char('7'));
        assert!(valid_identifier_char('_'));
        assert!(valid_identifier_char('-'));
        assert!(!valid_identifier_char(' '));
        assert!(!valid_identifier_char('#'));
    }

    #[test]
    fn test_parse_identifier() {
        let mut parser = CSSParser::at("bananas apples", 2);
        assert_eq!(parser.parse_identifier(), "nanas");
        assert_eq!(parser, CSSParser::at("bananas apples", 7));
    }

    #[test]
    fn test_parse_simple_selector_at_end() {
        let mut parser = CSSParser::at("bananas apples", 14);
        assert_eq!(parser.parse_simple_selector(), SimpleSelector::default());
        assert_eq!(parser.position(), 14);
    }

    #[test]
    fn test_parse_simple_selector_at_whitespace() {
        let mut parser = CSSParser::at("bananas apples", 7);
        assert_eq!(parser.parse_simple_selector(), SimpleSelector::default());
        assert_eq!(parser.position(), 7);
    }

    #[test]
    fn test_parse_simple_selector_tag() {
        let mut parser = CSSParser::at("bananas apples", 2);
        assert_eq!(
            parser.parse_simple_selector(),
            SimpleSelector::new(Some("nanas"), None, &[])
        );
        assert_eq!(parser.position(), 7);
    }

    #[test]
    fn test_parse_simple_selector_universal() {
        let mut parser = CSSParser::new("* apples");
        assert_eq!(parser.parse_simple_selector(), SimpleSelector::default());
        assert_eq!(parser.position(), 1);
    }

    #[test]
    fn test_parse_simple_selector_classes() {
        let mut parser = CSSParser::at("bana .nas apples", 5);
        assert_eq!(
            parser.parse_simple_selector(),
            SimpleSelector::new(None, None, &["nas"])
        );
        assert_eq!(parser.position(), 9);

        let mut parser = CSSParser::at("bana .na.s apples", 5);
        assert_eq!(
            parser.parse_simple_selector(),
            SimpleSelector::new(None, None, &["na", "s"])
        );
        assert_eq!(parser.position(), 10);
    }

    #[test]
    fn test_parse_simple_selector_id() {
        let mut parser = CSSParser::at("bana #nas apples", 5);
        assert_eq!(
            parser.parse_simple_selector(),
            SimpleSelector::new(None, Some("nas"), &[])
        );
        assert_eq!(parser.position(), 9);
    }

    #[test]
    fn test_parse_simple_selector_compound() {
        let source = "bana type#id.class1.class2.class3 apples";
        let mut parser = CSSParser::at(source, 5);
        assert_eq!(
            parser.parse_simple_selector(),
            SimpleSelector::new(Some("type"), Some("id"), &["class1", "class2", "class3"])
        );
        assert_eq!(parser.position(), 5 + "type#id.class1.class2.class3".len());
    }

    #[test]
    fn test_parse_simple_selector_duplicate_id_keeps_last() {
        let mut parser = CSSParser::new("#a#b");
        assert_eq!(
            parser.parse_simple_selector(),
            SimpleSelector::new(None, Some("b"), &[])
        );
    }

    #[test]
    fn test_parse_simple_selector_duplicate_tag_keeps_last() {
        let mut parser = CSSParser::new("div*span");
        assert_eq!(
            parser.parse_simple_selector(),
            SimpleSelector::new(Some("span"), None, &[])
        );
    }

    #[test]
    fn test_parse_selectors_single() {
        let mut parser = CSSParser::at("bananas { apples", 2);
        assert_eq!(
            parser.parse_selectors().unwrap(),
            vec![Selector::Simple(SimpleSelector::new(Some("nanas"), None, &[]))]
        );
        assert_eq!(parser.position(), 8);
    }

    #[test]
    fn test_parse_selectors_rejects_descendant_combinator() {
        let mut parser = CSSParser::at("bana nas { apples", 2);
        assert!(matches!(
            parser.parse_selectors(),
            Err(CssParseError::UnexpectedSelectorCharacter { position: 5, .. })
        ));
    }

    #[test]
    fn test_parse_selectors_list() {
        let mut parser = CSSParser::at("bana, nas { apples", 2);
        assert_eq!(
            parser.parse_selectors().unwrap(),
            vec![
                Selector::Simple(SimpleSelector::new(Some("na"), None, &[])),
                Selector::Simple(SimpleSelector::new(Some("nas"), None, &[])),
            ]
        );
        assert_eq!(parser.position(), 10);
    }

    #[test]
    fn test_parse_selectors_rejects_trailing_comma() {
        let mut parser = CSSParser::new("p, { color: red; }");
        assert_eq!(
            parser.parse_selectors(),
            Err(CssParseError::UnexpectedSelectorCharacter {
                found: Found::Char('{'),
                position: 3,
            })
        );
    }

    #[test]
    fn test_parse_selectors_rejects_missing_selector() {
        let mut parser = CSSParser::new("{ display: block; }");
        assert_eq!(
            parser.parse_selectors(),
            Err(CssParseError::UnexpectedSelectorCharacter {
                found: Found::Char('{'),
                position: 0,
            })
        );
        assert!(parse("p { color: red; } { display: block; }").is_err());
    }

    #[test]
    fn test_parse_selectors_accepts_universal() {
        let mut parser = CSSParser::new("* {");
        assert_eq!(
            parser.parse_selectors().unwrap(),
            vec![Selector::Simple(SimpleSelector::default())]
        );
    }

    #[test]
    fn test_parse_selectors_sorted_descending() {
        let mut parser = CSSParser::new("p, .c, #i, p.c {");
        let selectors = parser.parse_selectors().unwrap();
        let specificities: Vec<_> = selectors.iter().map(Selector::specificity).collect();
        let mut sorted = specificities.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(specificities, sorted);
        assert_eq!(selectors[0], Selector::Simple(SimpleSelector::new(None, Some("i"), &[])));
    }

    #[test]
    fn test_parse_declaration() {
        let mut parser = CSSParser::new("margin: 10px;");
        assert_eq!(
            parser.parse_declaration().unwrap(),
            Declaration::new("margin", CssValue::Length(10.0, Unit::Px))
        );
        assert_eq!(parser.position(), 13);
    }

    #[test]
    fn test_parse_declaration_missing_semicolon() {
        let mut parser = CSSParser::new("margin: 10px");
        assert!(matches!(
            parser.parse_declaration(),
            Err(CssParseError::Syntax(_))
        ));
    }

    #[test]
    fn test_parse_declaration_missing_colon() {
        let mut parser = CSSParser::new("margin 10px;");
        assert!(matches!(
            parser.parse_declaration(),
            Err(CssParseError::Syntax(_))
        ));
    }

    #[test]
    fn test_parse_value_length_units() {
        assert_eq!(
            CSSParser::new("1.5em").parse_value().unwrap(),
            CssValue::Length(1.5, Unit::Em)
        );
        assert_eq!(
            CSSParser::new("2REM").parse_value().unwrap(),
            CssValue::Length(2.0, Unit::Rem)
        );
    }

    #[test]
    fn test_parse_value_unknown_unit() {
        assert_eq!(
            CSSParser::new("10vh").parse_value(),
            Err(CssParseError::UnknownUnit {
                unit: "vh".to_string(),
                position: 2
            })
        );
        assert!(matches!(
            CSSParser::new("0;").parse_value(),
            Err(CssParseError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn test_parse_value_invalid_number() {
        assert!(matches!(
            CSSParser::new("1.2.3px").parse_value(),
            Err(CssParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_parse_value_color() {
        assert_eq!(
            CSSParser::new("#cc0011").parse_value().unwrap(),
            CssValue::Color(ColorValue::new(0xcc, 0x00, 0x11, 255))
        );
    }

    #[test]
    fn test_parse_value_short_color() {
        assert_eq!(
            CSSParser::new("#fff;").parse_value(),
            Err(CssParseError::InvalidColor {
                text: "fff".to_string(),
                position: 1
            })
        );
    }

    #[test]
    fn test_parse_value_keyword() {
        assert_eq!(
            CSSParser::new("inline-block;").parse_value().unwrap(),
            CssValue::Keyword("inline-block".to_string())
        );
        assert!(matches!(
            CSSParser::new(";").parse_value(),
            Err(CssParseError::ExpectedValue { .. })
        ));
    }

    #[test]
    fn test_parse_declaration_block() {
        let mut parser = CSSParser::new("{ display: block; color: #000000; }");
        let declarations = parser.parse_declaration_block().unwrap();
        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].name, "display");
        assert_eq!(declarations[1].value, CssValue::Color(ColorValue::BLACK));
        assert_eq!(parser.position(), 35);
    }

    #[test]
    fn test_parse_declaration_block_unterminated() {
        let mut parser = CSSParser::new("{ display: block;");
        assert!(matches!(
            parser.parse_declaration_block(),
            Err(CssParseError::ExpectedPropertyName { .. })
        ));
    }
}
