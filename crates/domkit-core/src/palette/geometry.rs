//! Palette anchoring geometry.
//!
//! Pure functions computing where a palette body, its connector triangle and
//! the connector's border triangle are drawn so that the connector tip
//! touches the midpoint of one edge of a sibling element.
//!
//! Along the *constrained axis* (x for palettes anchored on their top or
//! bottom edge, y otherwise) the body is centred on the anchor and then
//! shifted into the caller's bounding range. The connector must always stay
//! attached to the body, so the bounding range is intersected with the
//! *connection-preserving range* first, and in the tolerant policy the
//! connection wins whenever the two conflict.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use super::sizing::SizingCache;
use crate::error::{PaletteError, PaletteResult};
use crate::geometry::{Edge, Range};

/// Pixels between the sibling's edge and the connector tip.
pub const EDGE_OFFSET: f64 = 1.0;

/// What to do when the palette cannot fit inside the caller's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Overrun the bounds as needed to keep the connector attached.
    #[default]
    Tolerant,
    /// Fail with [`PaletteError::LayoutImpossible`].
    Strict,
}

/// Midpoint of `sibling_edge` of the sibling box, pushed outward by [`EDGE_OFFSET`].
pub fn anchor_position(sibling: Rect, sibling_edge: Edge) -> Point {
    let mid_x = sibling.x0 + (sibling.width() / 2.0).floor();
    let mid_y = sibling.y0 + (sibling.height() / 2.0).floor();
    match sibling_edge {
        Edge::Top => Point::new(mid_x, sibling.y0 - EDGE_OFFSET),
        Edge::Bottom => Point::new(mid_x, sibling.y1 + EDGE_OFFSET),
        Edge::Left => Point::new(sibling.x0 - EDGE_OFFSET, mid_y),
        Edge::Right => Point::new(sibling.x1 + EDGE_OFFSET, mid_y),
    }
}

/// Top-left corners of the filled connector and of its border triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorOffsets {
    pub anchor: Point,
    pub anchor_border: Point,
}

/// Place the connector so its tip sits on `anchor_position` and its base is
/// flush with the side `popup_edge` of the body.
pub fn anchor_offsets(anchor_position: Point, popup_edge: Edge, sizing: &SizingCache) -> AnchorOffsets {
    let Point { x, y } = anchor_position;
    let half = (sizing.anchor_height / 2.0).floor();
    let height = sizing.anchor_height;
    let inset = sizing.inner_anchor_offset;

    let (anchor, anchor_border) = match popup_edge {
        Edge::Top => (Point::new(x - half, y + inset), Point::new(x - half, y)),
        Edge::Bottom => (
            Point::new(x - half, y - height - inset),
            Point::new(x - half, y - height),
        ),
        Edge::Left => (Point::new(x + inset, y - half), Point::new(x, y - half)),
        Edge::Right => (
            Point::new(x - height - inset, y - half),
            Point::new(x - height, y - half),
        ),
    };

    AnchorOffsets {
        anchor,
        anchor_border,
    }
}

/// The ranges involved in placing the body along the constrained axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstrainedRanges {
    /// Body centred on the anchor.
    pub ideal: Range,
    /// Widest placement that keeps the connector tip inside the body.
    pub connection: Range,
    /// Final placement.
    pub resolved: Range,
}

/// Resolve the body's placement along the constrained axis.
pub fn constrained_ranges(
    anchor_position: Point,
    popup_edge: Edge,
    sizing: &SizingCache,
    bounds: Range,
    policy: BoundsPolicy,
) -> PaletteResult<ConstrainedRanges> {
    let axis = popup_edge.axis();
    let anchor = axis.of_point(anchor_position);
    let extent = axis.of_size(sizing.palette_dimensions);
    let half_anchor = sizing.anchor_height / 2.0;

    let ideal = Range {
        min: anchor - (extent / 2.0).floor(),
        max: anchor + (extent / 2.0).ceil(),
    };
    let connection = Range {
        min: anchor - extent + half_anchor.floor(),
        max: anchor + extent - half_anchor.ceil(),
    };
    // May come out inverted when the caller's bounds miss the connection
    // range entirely; the corrections below still behave.
    let effective_min = connection.min.max(bounds.min);
    let effective_max = connection.max.min(bounds.max);

    let mut resolved = ideal;
    if resolved.min < effective_min {
        resolved = resolved.shift(effective_min - resolved.min);
    }
    if resolved.max > effective_max {
        resolved = resolved.shift(effective_max - resolved.max);
    }

    match policy {
        BoundsPolicy::Strict => {
            if resolved.min < effective_min || resolved.max > effective_max {
                return Err(PaletteError::LayoutImpossible {
                    required: extent,
                    available: (effective_max - effective_min).max(0.0),
                });
            }
        }
        BoundsPolicy::Tolerant => {
            if resolved.max > connection.max {
                resolved = resolved.shift(connection.max - resolved.max);
            }
            if resolved.min < connection.min {
                resolved = Range::from_min(connection.min, resolved.span());
            }
            if !bounds.contains_range(&resolved) {
                log::warn!(
                    "palette extent {} overruns bounds {}..{} to stay attached at {}",
                    extent,
                    bounds.min,
                    bounds.max,
                    anchor
                );
            }
        }
    }

    Ok(ConstrainedRanges {
        ideal,
        connection,
        resolved,
    })
}

/// Top-left corner of the whole palette box.
pub fn palette_offset(
    anchor_position: Point,
    popup_edge: Edge,
    sizing: &SizingCache,
    bounds: Range,
    policy: BoundsPolicy,
) -> PaletteResult<Point> {
    let ranges = constrained_ranges(anchor_position, popup_edge, sizing, bounds, policy)?;

    let axis = popup_edge.axis();
    let free = axis.cross();
    let mut across = free.of_point(anchor_position);
    if popup_edge.is_far() {
        across -= free.of_size(sizing.palette_dimensions) - sizing.border_width;
    } else {
        across -= sizing.border_width;
    }

    Ok(axis.point(ranges.resolved.min, across))
}

/// Everything the view needs to position a visible palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteLayout {
    /// Edge of the palette body that faces the sibling.
    pub popup_edge: Edge,
    pub anchor_position: Point,
    pub anchor_offset: Point,
    pub anchor_border_offset: Point,
    pub palette_offset: Point,
    /// Size of the menu content, without border, padding or connector.
    pub content: Size,
    pub sizing: SizingCache,
}

impl PaletteLayout {
    /// Compute the full layout for a palette attached to `sibling_edge` of `sibling`.
    pub fn compute(
        sibling: Rect,
        sibling_edge: Edge,
        content: Size,
        sizing: SizingCache,
        bounds: Range,
        policy: BoundsPolicy,
    ) -> PaletteResult<Self> {
        let popup_edge = sibling_edge.opposite();
        let anchor_position = anchor_position(sibling, sibling_edge);
        let offsets = anchor_offsets(anchor_position, popup_edge, &sizing);
        let palette_offset = palette_offset(anchor_position, popup_edge, &sizing, bounds, policy)?;

        log::debug!(
            "palette layout: edge {} anchor ({}, {}) offset ({}, {})",
            popup_edge,
            anchor_position.x,
            anchor_position.y,
            palette_offset.x,
            palette_offset.y
        );

        Ok(Self {
            popup_edge,
            anchor_position,
            anchor_offset: offsets.anchor,
            anchor_border_offset: offsets.anchor_border,
            palette_offset,
            content,
            sizing,
        })
    }

    /// Outer size of the palette box.
    pub fn palette_dimensions(&self) -> Size {
        self.sizing.palette_dimensions
    }

    /// Palette box in document coordinates.
    pub fn palette_rect(&self) -> Rect {
        Rect::from_origin_size(self.palette_offset, self.sizing.palette_dimensions)
    }

    /// Connector position relative to the palette box.
    pub fn relative_anchor_offset(&self) -> Point {
        (self.anchor_offset - self.palette_offset).to_point()
    }

    /// Connector border position relative to the palette box.
    pub fn relative_anchor_border_offset(&self) -> Point {
        (self.anchor_border_offset - self.palette_offset).to_point()
    }

    /// Menu container position relative to the palette box; the connector
    /// occupies the leading strip when anchored on the top or left edge.
    pub fn menu_container_offset(&self) -> Point {
        match self.popup_edge {
            Edge::Top => Point::new(0.0, self.sizing.anchor_height),
            Edge::Left => Point::new(self.sizing.anchor_height, 0.0),
            Edge::Bottom | Edge::Right => Point::ZERO,
        }
    }
}
