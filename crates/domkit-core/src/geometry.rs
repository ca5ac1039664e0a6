//! Geometry primitives shared by the palette engine and the widgets.
//!
//! Points, sizes and boxes come from `kurbo`; this module adds the pieces
//! kurbo has no notion of: cardinal edges, axes and one-dimensional ranges.

use std::fmt;
use std::str::FromStr;

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, PaletteResult};

/// One of the four cardinal edges of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// All edges, in declaration order.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// The edge on the other side of the box.
    pub fn opposite(self) -> Self {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        }
    }

    /// Whether this edge runs horizontally (top or bottom).
    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }

    /// Whether this edge sits on the far side of its axis (right or bottom).
    pub fn is_far(self) -> bool {
        matches!(self, Edge::Right | Edge::Bottom)
    }

    /// The axis along which an edge of this orientation extends.
    pub fn axis(self) -> Axis {
        if self.is_horizontal() { Axis::X } else { Axis::Y }
    }

    /// CSS name of the edge, as used in class names and properties.
    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edge {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Edge::Top),
            "bottom" => Ok(Edge::Bottom),
            "left" => Ok(Edge::Left),
            "right" => Ok(Edge::Right),
            other => Err(PaletteError::InvalidEdge(other.to_string())),
        }
    }
}

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The other axis.
    pub fn cross(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Component of a point along this axis.
    pub fn of_point(self, point: Point) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }

    /// Extent of a size along this axis (width for X, height for Y).
    pub fn of_size(self, size: Size) -> f64 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    /// Build a point from a value on this axis and one on the cross axis.
    pub fn point(self, along: f64, across: f64) -> Point {
        match self {
            Axis::X => Point::new(along, across),
            Axis::Y => Point::new(across, along),
        }
    }
}

/// A closed interval along one axis.
///
/// `min <= max` holds for ranges built with [`Range::new`] or deserialized;
/// APIs taking a caller range re-check it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

#[derive(Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawRange> for Range {
    type Error = PaletteError;

    fn try_from(bounds: RawRange) -> PaletteResult<Self> {
        Range::new(bounds.min, bounds.max)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl Range {
    /// The unconstrained range, -inf..+inf.
    pub const UNBOUNDED: Range = Range {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Create a range, rejecting inverted or NaN bounds.
    pub fn new(min: f64, max: f64) -> PaletteResult<Self> {
        if min <= max {
            Ok(Self { min, max })
        } else {
            Err(PaletteError::InvalidBounds { min, max })
        }
    }

    /// Check a range assembled from its public fields.
    pub fn validated(self) -> PaletteResult<Self> {
        Range::new(self.min, self.max)
    }

    /// Range of `length` starting at `min`.
    pub(crate) fn from_min(min: f64, length: f64) -> Self {
        Self {
            min,
            max: min + length,
        }
    }

    /// Length of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies inside the closed range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether `other` lies entirely inside this range.
    pub fn contains_range(&self, other: &Range) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    /// Translate both endpoints by `delta`.
    pub fn shift(&self, delta: f64) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Whether the range has a finite bound on either side.
    pub fn is_bounded(&self) -> bool {
        self.min.is_finite() || self.max.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_edges() {
        for edge in Edge::ALL {
            assert_ne!(edge, edge.opposite());
            assert_eq!(edge, edge.opposite().opposite());
        }
        assert_eq!(Edge::Top.opposite(), Edge::Bottom);
        assert_eq!(Edge::Left.opposite(), Edge::Right);
    }

    #[test]
    fn test_edge_parse() {
        assert_eq!("left".parse::<Edge>().unwrap(), Edge::Left);
        assert_eq!("bottom".parse::<Edge>().unwrap(), Edge::Bottom);
        let err = "middle".parse::<Edge>().unwrap_err();
        assert!(matches!(err, PaletteError::InvalidEdge(ref s) if s == "middle"));
    }

    #[test]
    fn test_edge_serde_names() {
        let json = serde_json::to_string(&Edge::Right).unwrap();
        assert_eq!(json, "\"right\"");
        let edge: Edge = serde_json::from_str("\"top\"").unwrap();
        assert_eq!(edge, Edge::Top);
    }

    #[test]
    fn test_axis_helpers() {
        let p = Point::new(3.0, 7.0);
        assert_eq!(Axis::X.of_point(p), 3.0);
        assert_eq!(Axis::Y.of_point(p), 7.0);
        assert_eq!(Axis::Y.point(1.0, 2.0), Point::new(2.0, 1.0));
        assert_eq!(Edge::Top.axis(), Axis::X);
        assert_eq!(Edge::Left.axis(), Axis::Y);
    }

    #[test]
    fn test_range_rejects_inverted() {
        assert!(Range::new(0.0, 10.0).is_ok());
        assert!(Range::new(5.0, 5.0).is_ok());
        assert!(matches!(
            Range::new(10.0, 0.0),
            Err(PaletteError::InvalidBounds { .. })
        ));
        assert!(Range::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_range_deserialize_rejects_inverted() {
        let range: Range = serde_json::from_str(r#"{"min": 1, "max": 2}"#).unwrap();
        assert_eq!(range, Range::new(1.0, 2.0).unwrap());
        assert!(serde_json::from_str::<Range>(r#"{"min": 2, "max": 1}"#).is_err());
        assert!(Range { min: 2.0, max: 1.0 }.validated().is_err());
    }

    #[test]
    fn test_range_default_is_unbounded() {
        let range = Range::default();
        assert!(!range.is_bounded());
        assert!(range.contains(1e12));
        assert!(range.contains(-1e12));
    }

    #[test]
    fn test_range_shift_and_contains() {
        let range = Range::new(10.0, 20.0).unwrap().shift(-5.0);
        assert_eq!(range, Range { min: 5.0, max: 15.0 });
        assert_eq!(range.span(), 10.0);
        assert!(range.contains_range(&Range { min: 6.0, max: 15.0 }));
        assert!(!range.contains_range(&Range { min: 4.0, max: 15.0 }));
    }
}
