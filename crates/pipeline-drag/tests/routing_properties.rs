//! Property tests for the routing policy

use pipeline_drag::core::{Metrics, Point};
use pipeline_drag::routing::{route, Approach, StartEdge};
use proptest::prelude::*;

// Whole-unit positions keep the arithmetic exact
fn position() -> impl Strategy<Value = Point> {
    (-2000i32..=2000, -2000i32..=2000).prop_map(|(x, y)| Point::new(x as f64, y as f64))
}

fn metrics() -> impl Strategy<Value = Metrics> {
    (20i32..=400, 20i32..=200, 0i32..=60).prop_map(|(w, h, m)| Metrics {
        width: (w * 2) as f64,
        height: (h * 2) as f64,
        margin: m as f64,
        ..Metrics::default()
    })
}

proptest! {
    #[test]
    fn prop_segments_are_joined(s in position(), t in position(), m in metrics()) {
        let r = route(s, t, &m);
        prop_assert_eq!(r.segment_a.end, r.segment_b.start);
    }

    #[test]
    fn prop_segment_b_ends_on_target_boundary(s in position(), t in position(), m in metrics()) {
        let r = route(s, t, &m);
        let end = r.segment_b.end;
        match r.approach {
            Approach::Left => prop_assert_eq!(end, Point::new(t.x, t.y + m.height / 2.0)),
            Approach::Top => prop_assert_eq!(end, Point::new(t.x + m.width / 2.0, t.y)),
            Approach::Bottom => {
                prop_assert_eq!(end, Point::new(t.x + m.width / 2.0, t.y + m.height))
            }
        }
    }

    #[test]
    fn prop_segment_a_starts_on_source_boundary(s in position(), t in position(), m in metrics()) {
        let r = route(s, t, &m);
        let start = r.segment_a.start;
        match r.start_edge {
            StartEdge::Right => prop_assert_eq!(start, Point::new(s.x + m.width, s.y + m.height / 2.0)),
            StartEdge::Top => prop_assert_eq!(start, Point::new(s.x + m.width / 2.0, s.y)),
            StartEdge::Bottom => {
                prop_assert_eq!(start, Point::new(s.x + m.width / 2.0, s.y + m.height))
            }
        }
    }

    #[test]
    fn prop_arrow_rotation_follows_approach(s in position(), t in position()) {
        let r = route(s, t, &Metrics::default());
        let expected = match r.approach {
            Approach::Left => 0,
            Approach::Top => 90,
            Approach::Bottom => 270,
        };
        prop_assert_eq!(r.arrow.rotation, expected);
    }

    #[test]
    fn prop_route_is_translation_invariant(
        s in position(),
        t in position(),
        dx in -500i32..=500,
        dy in -500i32..=500,
    ) {
        let m = Metrics::default();
        let (dx, dy) = (dx as f64, dy as f64);
        let base = route(s, t, &m);
        let shifted = route(
            Point::new(s.x + dx, s.y + dy),
            Point::new(t.x + dx, t.y + dy),
            &m,
        );
        prop_assert_eq!(base.start_edge, shifted.start_edge);
        prop_assert_eq!(base.approach, shifted.approach);
        prop_assert_eq!(shifted.segment_a.end, Point::new(base.segment_a.end.x + dx, base.segment_a.end.y + dy));
    }

    #[test]
    fn prop_target_far_right_is_entered_from_left(s in position(), gap in 1i32..=1000, dy in -1000i32..=1000) {
        let m = Metrics::default();
        let t = Point::new(s.x + m.width + m.margin + gap as f64, s.y + dy as f64);
        let r = route(s, t, &m);
        prop_assert_eq!(r.start_edge, StartEdge::Right);
        prop_assert_eq!(r.approach, Approach::Left);
    }
}
