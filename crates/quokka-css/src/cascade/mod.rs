//! CSS Cascading and style resolution
//!
//! This module builds the styled tree per a reduced form of
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/):
//! selector matching, then specificity ordering, then "last declaration wins".
//! There is no inheritance and no initial-value defaulting; a property is
//! either specified for a node or absent.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use quokka_common::warning::warn_once;
use quokka_dom::{DomNode, ElementData, NodeType};

use crate::parser::{Rule, Stylesheet};
use crate::selector::{Selector, Specificity};
use crate::values::CssValue;

/// Map from CSS property names to values.
pub type PropertyMap = HashMap<String, CssValue>;

/// A DOM node paired with the values specified for it.
///
/// The styled tree mirrors the DOM tree node for node. Text nodes always have
/// an empty property map.
///
/// Serialized, `node` is only the node's own [`NodeType`]; its subtree is
/// already covered by `children`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledNode<'a> {
    /// The DOM node this entry styles.
    #[serde(serialize_with = "serialize_node_type")]
    pub node: &'a DomNode,
    /// Winning declaration for each property.
    pub specified_values: PropertyMap,
    /// Styled children, in DOM order.
    pub children: Vec<StyledNode<'a>>,
}

/// [§ 2 Box Layout Modes](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// The subset of `display` the layout-tree builder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayValue {
    /// `display: inline`, and the fallback for anything unrecognised.
    Inline,
    /// `display: block`
    Block,
    /// `display: none`: the node and its subtree generate no boxes.
    None,
}

impl<'a> StyledNode<'a> {
    /// Build a styled node by hand.
    #[must_use]
    pub const fn new(
        node: &'a DomNode,
        specified_values: PropertyMap,
        children: Vec<Self>,
    ) -> Self {
        Self {
            node,
            specified_values,
            children,
        }
    }

    /// The specified value of `name`, if any.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&CssValue> {
        self.specified_values.get(name)
    }

    /// The value of `name`, falling back to `fallback_name`, then to `default`.
    ///
    /// Useful for shorthand/longhand pairs such as `margin-left` / `margin`.
    #[must_use]
    pub fn lookup<'s>(
        &'s self,
        name: &str,
        fallback_name: &str,
        default: &'s CssValue,
    ) -> &'s CssValue {
        self.value(name)
            .or_else(|| self.value(fallback_name))
            .unwrap_or(default)
    }

    /// Classify the `display` property. Absent means inline.
    #[must_use]
    pub fn display(&self) -> DisplayValue {
        match self.value("display") {
            Some(CssValue::Keyword(keyword)) => match keyword.as_str() {
                "block" => DisplayValue::Block,
                "none" => DisplayValue::None,
                "inline" => DisplayValue::Inline,
                other => {
                    let _ = warn_once(
                        "Style",
                        &format!("unsupported display value '{other}', treating as inline"),
                    );
                    DisplayValue::Inline
                }
            },
            Some(other @ (CssValue::Length(..) | CssValue::Color(_))) => {
                let _ = warn_once(
                    "Style",
                    &format!("display cannot be '{other}', treating as inline"),
                );
                DisplayValue::Inline
            }
            None => DisplayValue::Inline,
        }
    }
}

/// Serialize a DOM node without its children.
#[allow(clippy::trivially_copy_pass_by_ref)] // signature fixed by serde
fn serialize_node_type<S: Serializer>(
    node: &&DomNode,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    node.node_type.serialize(serializer)
}

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
///
/// A matched rule with the specificity it matched at.
struct MatchedRule<'a> {
    specificity: Specificity,
    rule: &'a Rule,
}

/// Resolve `stylesheet` against the tree rooted at `root`.
///
/// Produces one [`StyledNode`] per DOM node, in the same shape. Recurses
/// once per nesting level, so stack use grows with document depth.
#[must_use]
pub fn style_tree<'a>(root: &'a DomNode, stylesheet: &Stylesheet) -> StyledNode<'a> {
    StyledNode {
        node: root,
        specified_values: match &root.node_type {
            NodeType::Element(element) => specified_values(element, stylesheet),
            NodeType::Text(_) => PropertyMap::new(),
        },
        children: root
            .children
            .iter()
            .map(|child| style_tree(child, stylesheet))
            .collect(),
    }
}

/// [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
///
/// Apply every matching rule's declarations in ascending specificity, so
/// that more specific rules overwrite less specific ones. Equal
/// specificities keep source order: the later rule wins.
#[must_use]
pub fn specified_values(element: &ElementData, stylesheet: &Stylesheet) -> PropertyMap {
    let mut values = PropertyMap::new();
    let mut rules = matching_rules(element, stylesheet);

    // Stable sort: ties stay in source order.
    rules.sort_by_key(|m| m.specificity);

    for m in rules {
        for declaration in &m.rule.declarations {
            let _ = values.insert(declaration.name.clone(), declaration.value.clone());
        }
    }
    values
}

fn matching_rules<'a>(element: &ElementData, stylesheet: &'a Stylesheet) -> Vec<MatchedRule<'a>> {
    stylesheet
        .rules
        .iter()
        .filter_map(|rule| match_rule(element, rule))
        .collect()
}

/// A rule matches if any of its selectors does. It is ranked by the most
/// specific selector that matched.
fn match_rule<'a>(element: &ElementData, rule: &'a Rule) -> Option<MatchedRule<'a>> {
    rule.selectors
        .iter()
        .filter(|selector| selector.matches(element))
        .map(Selector::specificity)
        .max()
        .map(|specificity| MatchedRule { specificity, rule })
}
