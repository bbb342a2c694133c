//! Geometry primitives shared by the tracker and the router
//!
//! Points live in diagram-local space (the SVG user coordinate system) unless
//! noted otherwise. [`Metrics`] carries the fixed node size and routing margins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A position in diagram-local space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Difference between two points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub<Offset> for Point {
    type Output = Point;

    fn sub(self, rhs: Offset) -> Point {
        Point::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

/// Screen-to-user transform of the rendering surface
///
/// Holds the 2×3 affine matrix `[a c e; b d f]` reported by the SVG element's
/// screen CTM. It must be re-read for every event because zooming or resizing
/// the view changes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for ScreenTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ScreenTransform {
    pub const IDENTITY: ScreenTransform = ScreenTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Uniform scale followed by a translation
    pub const fn scale_translate(scale: f64, tx: f64, ty: f64) -> Self {
        Self::new(scale, 0.0, 0.0, scale, tx, ty)
    }

    fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Map a client (screen) position into diagram-local space
    ///
    /// Returns `None` when the matrix is singular.
    pub fn to_local(&self, client_x: f64, client_y: f64) -> Option<Point> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let (px, py) = (client_x - self.e, client_y - self.f);
        Some(Point::new(
            (self.d * px - self.c * py) / det,
            (self.a * py - self.b * px) / det,
        ))
    }
}

/// Node size and routing margins
///
/// Nodes do not store their own size; every node shares these constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Node width (`W`)
    pub width: f64,
    /// Node height (`H`)
    pub height: f64,
    /// Gap between a routing waypoint and the target edge (`M`)
    pub margin: f64,
    /// Distance from the arrow glyph anchor to its tip along the approach axis
    pub arrow_tip: f64,
    /// Distance from the arrow glyph anchor to its centre line
    pub arrow_half_width: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 100.0,
            margin: 30.0,
            arrow_tip: 21.0,
            arrow_half_width: 12.0,
        }
    }
}

impl Metrics {
    /// Half the node width
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Vertical centre offset (`C`)
    pub fn center_offset(&self) -> f64 {
        self.height / 2.0
    }
}

/// Format a coordinate the way it is written back into SVG attributes
///
/// Whole numbers are written without a fractional part (`350`, not `350.0`).
pub fn format_coord(value: f64) -> String {
    if value == 0.0 {
        // Collapse negative zero
        return "0".to_string();
    }
    format!("{}", value)
}

/// Parse an SVG coordinate attribute
///
/// Accepts a trailing `px` unit, which some authoring tools emit.
pub fn parse_coord(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}
