//! DOM tree implementation for the Quokka pipeline.
//!
//! The tree follows the shape of the [DOM Living Standard](https://dom.spec.whatwg.org/)
//! but only models the two node types the pipeline needs: elements and text.
//!
//! # Design
//!
//! Each [`DomNode`] owns its children directly. A tree is built once by the
//! HTML parser and never mutated afterwards, so later stages (style
//! resolution, layout) simply borrow nodes out of it.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// Map of attribute names to values for an element.
///
/// Attribute order is not significant.
pub type AttributesMap = HashMap<String, String>;

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomNode {
    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<DomNode>,
    /// "Each node has an associated node type"
    pub node_type: NodeType,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeType {
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    Text(String),
}

/// Element-specific data.
///
/// NOTE: We only store `tag_name` (local name) and attrs. Namespaces and
/// custom element state are out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data from a tag name and attribute map.
    pub fn new(tag_name: impl Into<String>, attrs: AttributesMap) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs,
        }
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Returns the set of class names from the class attribute.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        match self.attrs.get("class") {
            Some(classlist) => classlist.split_whitespace().collect(),
            None => HashSet::new(),
        }
    }
}

impl DomNode {
    /// Create a text node.
    pub fn text(data: impl Into<String>) -> Self {
        Self {
            children: Vec::new(),
            node_type: NodeType::Text(data.into()),
        }
    }

    /// Create an element node with the given attributes and children.
    pub fn element(tag_name: impl Into<String>, attrs: AttributesMap, children: Vec<Self>) -> Self {
        Self {
            children,
            node_type: NodeType::Element(ElementData::new(tag_name, attrs)),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementData> {
        match &self.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Text(_) => None,
        }
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            NodeType::Element(_) => None,
        }
    }

    /// Iterate over this node and all of its descendants in document order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First element in document order (including `self`) with the given tag name.
    #[must_use]
    pub fn find_element(&self, tag_name: &str) -> Option<&Self> {
        self.descendants()
            .find(|node| node.as_element().is_some_and(|e| e.tag_name == tag_name))
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.descendants().filter_map(Self::as_text).collect()
    }
}

/// Pre-order iterator over a node and its descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a DomNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a DomNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push in reverse so the first child is visited next.
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
