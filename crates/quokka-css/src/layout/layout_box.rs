//! Layout box types and layout-tree construction.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)

#[cfg(feature = "layout-trace")]
use std::cell::Cell;

use serde::{Serialize, Serializer};

use quokka_dom::NodeType;

use crate::cascade::{DisplayValue, StyledNode};
use crate::error::LayoutError;

use super::box_model::BoxDimensions;

#[cfg(feature = "layout-trace")]
thread_local! {
    static LAYOUT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Decrements the trace depth counter on every return path.
#[cfg(feature = "layout-trace")]
struct DepthGuard;

#[cfg(feature = "layout-trace")]
impl Drop for DepthGuard {
    fn drop(&mut self) {
        LAYOUT_DEPTH.with(|d| d.set(d.get() - 1));
    }
}

/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// "The following sections describe the types of boxes that may be
/// generated in CSS 2.1."
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BoxType<'a> {
    /// [§ 9.2.1 Block-level elements and block boxes](https://www.w3.org/TR/CSS2/visuren.html#block-boxes)
    ///
    /// The principal box of an element with `display: block`.
    BlockNode(
        #[serde(serialize_with = "serialize_generating_node")]
        &'a StyledNode<'a>,
    ),

    /// [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
    ///
    /// The box of a text node or of an element that is not `display: block`.
    InlineNode(
        #[serde(serialize_with = "serialize_generating_node")]
        &'a StyledNode<'a>,
    ),

    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// "In a document like this: <div>Some text<p>More text</p></div>
    /// ...the 'Some text' part generates an anonymous block box."
    AnonymousBlock,
}

/// Serialize the box's styled node as the DOM node type it came from. The
/// styled subtree and its values are left to the styled tree's own dump.
#[allow(clippy::trivially_copy_pass_by_ref)] // signature fixed by serde
fn serialize_generating_node<S: Serializer>(
    node: &&StyledNode<'_>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    node.node.node_type.serialize(serializer)
}

/// A node in the layout tree.
///
/// Dimensions are all zero after construction; solving widths, heights and
/// positions is a later stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBox<'a> {
    /// The computed dimensions of this box.
    pub dimensions: BoxDimensions,
    /// The type of box.
    pub box_type: BoxType<'a>,
    /// Child boxes in the layout tree.
    pub children: Vec<LayoutBox<'a>>,
}

impl<'a> LayoutBox<'a> {
    /// A childless box with zeroed dimensions.
    #[must_use]
    pub fn new(box_type: BoxType<'a>) -> Self {
        Self {
            dimensions: BoxDimensions::default(),
            box_type,
            children: Vec::new(),
        }
    }

    /// The styled node this box was generated for. `None` for anonymous boxes.
    #[must_use]
    pub const fn styled_node(&self) -> Option<&'a StyledNode<'a>> {
        match self.box_type {
            BoxType::BlockNode(node) | BoxType::InlineNode(node) => Some(node),
            BoxType::AnonymousBlock => None,
        }
    }

    /// Where a new inline child of this box should go.
    ///
    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// "if a block container box has a block-level box inside it, then we
    /// force it to have only block-level boxes inside it."
    ///
    /// Inline and anonymous boxes hold inline content themselves. A block
    /// box wraps inline runs in an anonymous block: the trailing child if it
    /// is already one, otherwise a fresh one appended at the end.
    pub fn get_inline_container(&mut self) -> &mut Self {
        match self.box_type {
            BoxType::InlineNode(_) | BoxType::AnonymousBlock => self,
            BoxType::BlockNode(_) => {
                let reuse = matches!(
                    self.children.last(),
                    Some(LayoutBox {
                        box_type: BoxType::AnonymousBlock,
                        ..
                    })
                );
                if !reuse {
                    self.children.push(LayoutBox::new(BoxType::AnonymousBlock));
                }
                let last = self.children.len() - 1;
                &mut self.children[last]
            }
        }
    }
}

/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// "The display property, determines the type of box or boxes that
/// are generated for an element."
///
/// Build the layout tree for `style_node` and its descendants. Recurses once
/// per nesting level, so stack use grows with document depth.
///
/// # Errors
///
/// Returns [`LayoutError::DisplayNone`] if `style_node` itself has
/// `display: none`. Descendants with `display: none` are skipped.
pub fn build_layout_tree<'a>(
    style_node: &'a StyledNode<'a>,
) -> Result<LayoutBox<'a>, LayoutError> {
    #[cfg(feature = "layout-trace")]
    let _depth = {
        let depth = LAYOUT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });
        eprintln!(
            "[LAYOUT TREE] {:indent$}{} display={:?} children={}",
            "",
            describe(style_node),
            style_node.display(),
            style_node.children.len(),
            indent = depth * 2
        );
        DepthGuard
    };

    // [§ 2.6 display: none](https://www.w3.org/TR/css-display-3/#valdef-display-none)
    //
    // "The element and its descendants generate no boxes or text runs."
    let mut root = LayoutBox::new(match style_node.display() {
        DisplayValue::Block => BoxType::BlockNode(style_node),
        DisplayValue::Inline => BoxType::InlineNode(style_node),
        DisplayValue::None => {
            return Err(LayoutError::DisplayNone {
                node: describe(style_node),
            });
        }
    });

    for child in &style_node.children {
        match child.display() {
            DisplayValue::Block => root.children.push(build_layout_tree(child)?),
            DisplayValue::Inline => root
                .get_inline_container()
                .children
                .push(build_layout_tree(child)?),
            DisplayValue::None => {}
        }
    }

    Ok(root)
}

/// `<tag>` for elements, `#text` for text nodes.
fn describe(style_node: &StyledNode<'_>) -> String {
    match &style_node.node.node_type {
        NodeType::Element(element) => format!("<{}>", element.tag_name),
        NodeType::Text(_) => "#text".to_string(),
    }
}
