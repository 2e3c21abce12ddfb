//! High-level document API for the Quokka pipeline.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Parsing** - HTML and CSS source text into a DOM and a stylesheet
//! - **Style Resolution** - the styled tree for a parsed document
//! - **Layout Tree** - box tree with zeroed dimensions
//! - **Inspection** - indented text dumps and a JSON snapshot of every stage
//!
//! # Not Yet Implemented
//!
//! - Loading documents from files or URLs
//! - Extracting `<style>` elements from the HTML
//! - Geometry solving and painting

pub use quokka_common as common;
pub use quokka_css as css;
pub use quokka_dom as dom;
pub use quokka_html as html;

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use quokka_css::{
    BoxType, CssParseError, LayoutBox, LayoutError, StyledNode, Stylesheet, build_layout_tree,
    style_tree,
};
use quokka_dom::{DomNode, NodeType};
use quokka_html::HtmlParseError;

/// The raw inputs of a document: HTML markup and the CSS that styles it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSource {
    /// HTML source text.
    pub html: String,
    /// CSS source text.
    pub css: String,
}

impl DocumentSource {
    /// Bundle HTML and CSS source text.
    #[must_use]
    pub fn new(html: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
        }
    }
}

/// Any failure along the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The HTML was malformed.
    #[error("HTML parse error: {0}")]
    Html(#[from] HtmlParseError),
    /// The CSS was malformed.
    #[error("CSS parse error: {0}")]
    Css(#[from] CssParseError),
    /// The document root generates no box.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
    /// A snapshot could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A parsed document.
///
/// Owns the DOM and the stylesheet. The styled tree and the layout tree
/// borrow from these, so they are built on demand rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Parsed DOM tree. Always a single root.
    pub dom: DomNode,
    /// Parsed stylesheet.
    pub stylesheet: Stylesheet,
}

/// Every stage of a document, for [`Document::to_json`].
#[derive(Serialize)]
struct Snapshot<'a> {
    dom: &'a DomNode,
    stylesheet: &'a Stylesheet,
    styled: &'a StyledNode<'a>,
    layout: &'a LayoutBox<'a>,
}

impl Document {
    /// Parse HTML and CSS source text.
    ///
    /// # Errors
    ///
    /// Returns the first parse error. The HTML is parsed before the CSS.
    pub fn parse(html: &str, css: &str) -> Result<Self, PipelineError> {
        let dom = quokka_html::parse(html)?;
        let stylesheet = quokka_css::parse(css)?;
        Ok(Self { dom, stylesheet })
    }

    /// Parse a [`DocumentSource`].
    ///
    /// # Errors
    ///
    /// See [`Document::parse`].
    pub fn from_source(source: &DocumentSource) -> Result<Self, PipelineError> {
        Self::parse(&source.html, &source.css)
    }

    /// Resolve the stylesheet against the DOM.
    #[must_use]
    pub fn style_tree(&self) -> StyledNode<'_> {
        style_tree(&self.dom, &self.stylesheet)
    }

    /// Build the styled tree and the layout tree, then hand the layout tree
    /// to `f`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Layout`] if the root has `display: none`.
    pub fn with_layout<R>(&self, f: impl FnOnce(&LayoutBox<'_>) -> R) -> Result<R, PipelineError> {
        let styled = self.style_tree();
        let layout = build_layout_tree(&styled)?;
        Ok(f(&layout))
    }

    /// Indented dump of the layout tree, one box per line.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Layout`] if the root has `display: none`.
    pub fn layout_summary(&self) -> Result<String, PipelineError> {
        self.with_layout(format_layout_tree)
    }

    /// Pretty-printed JSON of the DOM, stylesheet, styled tree and layout tree.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Layout`] if the root has `display: none`, or
    /// [`PipelineError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, PipelineError> {
        let styled = self.style_tree();
        let layout = build_layout_tree(&styled)?;
        let snapshot = Snapshot {
            dom: &self.dom,
            stylesheet: &self.stylesheet,
            styled: &styled,
            layout: &layout,
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Write [`Document::to_json`] to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be built or the file cannot
    /// be written.
    pub fn save_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| {
            anyhow::anyhow!("failed to save snapshot to '{}': {e}", path.display())
        })?;
        Ok(())
    }
}

/// Render a layout tree as indented text.
///
/// ```text
/// block <div>
///   anonymous
///     inline #text "hi"
/// ```
#[must_use]
pub fn format_layout_tree(root: &LayoutBox<'_>) -> String {
    let mut out = String::new();
    write_box(&mut out, root, 0);
    out
}

fn write_box(out: &mut String, layout_box: &LayoutBox<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    let kind = match layout_box.box_type {
        BoxType::BlockNode(_) => "block",
        BoxType::InlineNode(_) => "inline",
        BoxType::AnonymousBlock => "anonymous",
    };
    let _ = match layout_box.styled_node().map(|styled| &styled.node.node_type) {
        Some(NodeType::Element(element)) => writeln!(out, "{indent}{kind} <{}>", element.tag_name),
        Some(NodeType::Text(text)) => writeln!(out, "{indent}{kind} #text {text:?}"),
        None => writeln!(out, "{indent}{kind}"),
    };
    for child in &layout_box.children {
        write_box(out, child, depth + 1);
    }
}
