//! CSS Box Model types.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

use serde::Serialize;

/// [§ 3. The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// "Each box has a content area and optional surrounding padding, border,
/// and margin areas."
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoxDimensions {
    /// Content area dimensions
    pub content: Rect,
    /// Padding widths around the content area.
    pub padding: EdgeSizes,
    /// Border widths around the padding area.
    pub border: EdgeSizes,
    /// Margin widths around the border area.
    pub margin: EdgeSizes,
}

/// A rectangle positioned in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

/// Edge sizes for padding, border, or margin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow the rectangle outward by `edge` on every side.
    ///
    /// ```text
    /// x      = x - edge.left
    /// y      = y - edge.top
    /// width  = width + edge.left + edge.right
    /// height = height + edge.top + edge.bottom
    /// ```
    #[must_use]
    pub fn expanded_by(self, edge: EdgeSizes) -> Self {
        Self {
            x: self.x - edge.left,
            y: self.y - edge.top,
            width: self.width + edge.left + edge.right,
            height: self.height + edge.top + edge.bottom,
        }
    }
}

impl EdgeSizes {
    /// Create edge sizes in CSS shorthand order: top, right, bottom, left.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl BoxDimensions {
    // [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
    //
    // The boxes from innermost to outermost:
    //   1. Content box  - the actual content (text, images, etc.)
    //   2. Padding box  - content + padding
    //   3. Border box   - content + padding + border
    //   4. Margin box   - content + padding + border + margin (outermost)
    //
    // Each is the previous one expanded by one layer of edges.

    /// [§ 3.2 Padding](https://www.w3.org/TR/css-box-3/#paddings)
    ///
    /// "The padding box contains both the content and padding areas."
    #[must_use]
    pub fn padding_box(&self) -> Rect {
        self.content.expanded_by(self.padding)
    }

    /// [§ 3.3 Borders](https://www.w3.org/TR/css-box-3/#borders)
    ///
    /// "The border box contains content, padding, and border areas."
    #[must_use]
    pub fn border_box(&self) -> Rect {
        self.padding_box().expanded_by(self.border)
    }

    /// [§ 3.1 Margins](https://www.w3.org/TR/css-box-3/#margins)
    ///
    /// "The margin box is the outermost box, and contains all four areas."
    #[must_use]
    pub fn margin_box(&self) -> Rect {
        self.border_box().expanded_by(self.margin)
    }
}
