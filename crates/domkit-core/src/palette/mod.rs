//! Anchored popup menus.
//!
//! [`geometry`] computes where a palette and its connector are drawn,
//! [`sizing`] derives the dimensions that computation needs and
//! [`visibility`] drives the show/hide state machine on top of both.

pub mod geometry;
pub mod sizing;
pub mod visibility;

pub use geometry::{
    AnchorOffsets, BoundsPolicy, ConstrainedRanges, EDGE_OFFSET, PaletteLayout, anchor_offsets,
    anchor_position, constrained_ranges, palette_offset,
};
pub use sizing::{SizingCache, SizingMeasurements};
pub use visibility::{Palette, PaletteSurface};
