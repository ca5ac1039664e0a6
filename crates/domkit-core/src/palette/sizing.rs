//! Sizing constants measured once from the rendered palette elements.

use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::geometry::Edge;

/// Raw pixel values read from the connector, border and padding styles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizingMeasurements {
    /// Border width of the connector element on the side facing away from
    /// the palette, which is the thickness of the drawn triangle.
    pub anchor_height: f64,
    /// Border width of the menu container.
    pub border_width: f64,
    /// Padding of the menu container.
    pub menu_container_padding: f64,
}

/// Derived sizing, immutable for one layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingCache {
    pub anchor_height: f64,
    pub border_width: f64,
    /// Extra inset of the filled connector so the border triangle does not
    /// show through the rounded corner of the body.
    pub inner_anchor_offset: f64,
    pub menu_container_padding: f64,
    /// Outer size of the whole palette box, connector included.
    pub palette_dimensions: Size,
}

impl SizingCache {
    /// Derive the cache for `content` anchored on `popup_edge`.
    pub fn measure(measurements: SizingMeasurements, content: Size, popup_edge: Edge) -> Self {
        let SizingMeasurements {
            anchor_height,
            border_width,
            menu_container_padding,
        } = measurements;

        let chrome = 2.0 * menu_container_padding + 2.0 * border_width;
        let mut palette_dimensions = Size::new(content.width + chrome, content.height + chrome);
        if popup_edge.is_horizontal() {
            palette_dimensions.height += anchor_height;
        } else {
            palette_dimensions.width += anchor_height;
        }

        Self {
            anchor_height,
            border_width,
            inner_anchor_offset: (border_width * std::f64::consts::SQRT_2).floor() + 1.0,
            menu_container_padding,
            palette_dimensions,
        }
    }
}
