//! Layout tree construction.
//!
//! This module turns a styled tree into a tree of boxes per the box
//! generation rules of the CSS Visual Formatting Model. Boxes carry zeroed
//! [`BoxDimensions`]; solving sizes and positions is left to a later stage.
//!
//! # Relevant Specifications
//!
//! - [CSS Display Module Level 3](https://www.w3.org/TR/css-display-3/)
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//!
//! # Module Structure
//!
//! - [`box_model`] - Box dimensions, rectangles, and edge sizes
//! - [`layout_box`] - Layout box types and tree construction

pub mod box_model;
pub mod layout_box;

// Re-exports for convenience
pub use box_model::{BoxDimensions, EdgeSizes, Rect};
pub use layout_box::{BoxType, LayoutBox, build_layout_tree};
