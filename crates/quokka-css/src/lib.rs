//! CSS parser, selector matching, cascade, and layout-tree construction for
//! the Quokka document pipeline.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Parser** (a strict subset of [CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/))
//!   - Rules of the form `selector, selector { name: value; ... }`
//!   - Keyword, length (`px`, `em`, `rem`) and `#rrggbb` color values
//!
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID, and universal selectors, combined into one compound selector
//!   - Specificity calculation
//!
//! - **CSS Cascade** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Selector matching
//!   - Specificity-based ordering, source order on ties
//!
//! - **Layout tree** ([CSS Display Level 3](https://www.w3.org/TR/css-display-3/))
//!   - Block, inline and anonymous block boxes
//!   - Box model structures
//!
//! # Not Yet Implemented
//!
//! - Comments, at-rules and escapes
//! - Combinators, attribute selectors, pseudo-classes and pseudo-elements
//! - Property inheritance and initial values
//! - Resolving `em`/`rem` lengths
//! - Width, height and position solving

/// CSS cascade per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// Parse and layout errors.
pub mod error;
/// Box model and layout tree per [CSS Display Level 3](https://www.w3.org/TR/css-display-3/).
pub mod layout;
/// CSS stylesheet parser.
pub mod parser;
/// CSS selector matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Declaration values per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod values;

// Re-exports for convenience
pub use cascade::{DisplayValue, PropertyMap, StyledNode, style_tree};
pub use error::{CssParseError, LayoutError};
pub use layout::{BoxDimensions, BoxType, EdgeSizes, LayoutBox, Rect, build_layout_tree};
pub use parser::{CSSParser, Declaration, Rule, Stylesheet, parse};
pub use selector::{Selector, SimpleSelector, Specificity};
pub use values::{ColorValue, CssValue, Unit};
