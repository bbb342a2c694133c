//! Fixed routing policy for two-segment connectors
//!
//! A route is a pure function of the source and target top-left corners and
//! the shared [`Metrics`]:
//!
//! ```text
//!  source            waypoint        target
//! ┌───────┐ SegmentA    ●  SegmentB ┌───────┐
//! │       ├─────────────┴──────────▶│       │
//! └───────┘                         └───────┘
//! ```
//!
//! Targets to the right are approached from the left. Targets whose centre is
//! within the source's horizontal span are approached from above or below.

use std::fmt;

use crate::core::{Metrics, Point};

/// Edge of the source shape where SegmentA starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartEdge {
    Right,
    Top,
    Bottom,
}

/// Side of the target shape that SegmentB arrives at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    /// From the left, arrow pointing right
    Left,
    /// Onto the top edge
    Top,
    /// Onto the bottom edge
    Bottom,
}

impl Approach {
    /// Arrowhead rotation in degrees
    pub fn rotation(&self) -> u16 {
        match self {
            Approach::Left => 0,
            Approach::Top => 90,
            Approach::Bottom => 270,
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Approach::Left => write!(f, "left"),
            Approach::Top => write!(f, "top"),
            Approach::Bottom => write!(f, "bottom"),
        }
    }
}

/// A straight line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Placement of an arrowhead glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowPlacement {
    /// Glyph `x`/`y`, also the rotation centre
    pub anchor: Point,
    pub rotation: u16,
}

impl ArrowPlacement {
    /// SVG `transform` attribute value
    pub fn transform(&self) -> String {
        format!(
            "rotate({} {} {})",
            self.rotation,
            crate::core::format_coord(self.anchor.x),
            crate::core::format_coord(self.anchor.y)
        )
    }
}

/// Complete geometry of one connector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub start_edge: StartEdge,
    pub approach: Approach,
    pub segment_a: Segment,
    pub segment_b: Segment,
    pub arrow: ArrowPlacement,
}

/// Compute the route from a source at `source` to a target at `target`
pub fn route(source: Point, target: Point, m: &Metrics) -> Route {
    let (w, h, margin) = (m.width, m.height, m.margin);
    let (half_w, center) = (m.half_width(), m.center_offset());
    let below = target.y > source.y;
    let source_far_edge = source.x + w;

    // Waypoint where SegmentA hands over to SegmentB
    let waypoint = if target.x + half_w > source_far_edge {
        Point::new(target.x - margin, target.y + center)
    } else if below {
        Point::new(target.x + half_w, target.y - margin)
    } else {
        Point::new(target.x + half_w, target.y + h + margin)
    };

    // A left approach would end at `target.x - margin`; if that is not past the
    // source's far edge the target is horizontally close
    let x2_candidate = target.x - margin;
    let (start_edge, start) = if x2_candidate <= source_far_edge {
        if below {
            (StartEdge::Bottom, Point::new(source.x + half_w, source.y + h))
        } else {
            (StartEdge::Top, Point::new(source.x + half_w, source.y))
        }
    } else {
        (StartEdge::Right, Point::new(source_far_edge, source.y + center))
    };

    let (approach, end, anchor) = if waypoint.x < target.x {
        (
            Approach::Left,
            Point::new(target.x, target.y + center),
            Point::new(
                target.x - m.arrow_tip,
                target.y + center - m.arrow_half_width,
            ),
        )
    } else if below {
        (
            Approach::Top,
            Point::new(target.x + half_w, target.y),
            Point::new(
                target.x + half_w + m.arrow_half_width,
                target.y - m.arrow_tip,
            ),
        )
    } else {
        (
            Approach::Bottom,
            Point::new(target.x + half_w, target.y + h),
            Point::new(
                target.x + half_w - m.arrow_half_width,
                target.y + h + m.arrow_tip,
            ),
        )
    };

    Route {
        start_edge,
        approach,
        segment_a: Segment {
            start,
            end: waypoint,
        },
        segment_b: Segment {
            start: waypoint,
            end,
        },
        arrow: ArrowPlacement {
            anchor,
            rotation: approach.rotation(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> Metrics {
        Metrics::default()
    }

    #[test]
    fn test_target_to_the_right() {
        let r = route(Point::new(0.0, 0.0), Point::new(400.0, 0.0), &metrics());
        assert_eq!(r.start_edge, StartEdge::Right);
        assert_eq!(r.segment_a.start, Point::new(300.0, 50.0));
        assert_eq!(r.segment_a.end, Point::new(370.0, 50.0));
        assert_eq!(r.segment_b.end, Point::new(400.0, 50.0));
        assert_eq!(r.approach, Approach::Left);
        assert_eq!(r.arrow.anchor, Point::new(379.0, 38.0));
        assert_eq!(r.arrow.transform(), "rotate(0 379 38)");
    }

    #[test]
    fn test_target_close_and_below() {
        let r = route(Point::new(0.0, 0.0), Point::new(100.0, 200.0), &metrics());
        assert_eq!(r.start_edge, StartEdge::Bottom);
        assert_eq!(r.segment_a.start, Point::new(150.0, 100.0));
        assert_eq!(r.segment_a.end, Point::new(250.0, 170.0));
        assert_eq!(r.approach, Approach::Top);
        assert_eq!(r.segment_b.end, Point::new(250.0, 200.0));
        assert_eq!(r.arrow.rotation, 90);
        assert_eq!(r.arrow.anchor, Point::new(262.0, 179.0));
    }

    #[test]
    fn test_target_close_and_above() {
        let r = route(Point::new(0.0, 300.0), Point::new(50.0, 0.0), &metrics());
        assert_eq!(r.start_edge, StartEdge::Top);
        assert_eq!(r.segment_a.start, Point::new(150.0, 300.0));
        assert_eq!(r.segment_a.end, Point::new(200.0, 130.0));
        assert_eq!(r.approach, Approach::Bottom);
        assert_eq!(r.segment_b.end, Point::new(200.0, 100.0));
        assert_eq!(r.arrow.rotation, 270);
        assert_eq!(r.arrow.anchor, Point::new(188.0, 121.0));
    }

    #[test]
    fn test_target_overlapping_far_edge_starts_from_top_or_bottom() {
        // Centre past the far edge but left approach would not clear it
        let r = route(Point::new(0.0, 0.0), Point::new(320.0, 200.0), &metrics());
        assert_eq!(r.start_edge, StartEdge::Bottom);
        assert_eq!(r.approach, Approach::Left);
        assert_eq!(r.segment_a.end, Point::new(290.0, 250.0));
    }

    #[test]
    fn test_same_row_behind_source() {
        let r = route(Point::new(400.0, 0.0), Point::new(0.0, 0.0), &metrics());
        // Equal y counts as "not below"
        assert_eq!(r.start_edge, StartEdge::Top);
        assert_eq!(r.approach, Approach::Bottom);
    }
}
