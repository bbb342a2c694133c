//! Tests for the routing policy and the connector router

mod common;

use common::{A_TO_B, B_TO_C, CHAIN};
use pipeline_drag::core::{Metrics, Point};
use pipeline_drag::diagram::Diagram;
use pipeline_drag::routing::{route, Approach, ConnectorRouter, StartEdge};

fn metrics() -> Metrics {
    Metrics::default()
}

#[test]
fn test_far_right_and_below_starts_on_right_edge() {
    let r = route(Point::new(0.0, 0.0), Point::new(500.0, 300.0), &metrics());
    assert_eq!(r.start_edge, StartEdge::Right);
    assert_eq!(r.segment_a.start, Point::new(300.0, 50.0));
    // Waypoint left of the target, so the arrow points right
    assert_eq!(r.approach, Approach::Left);
    assert_eq!(r.arrow.rotation, 0);
    assert_eq!(r.segment_b.end, Point::new(500.0, 350.0));
}

#[test]
fn test_close_and_below_starts_on_bottom_edge() {
    let r = route(Point::new(100.0, 0.0), Point::new(150.0, 250.0), &metrics());
    assert_eq!(r.start_edge, StartEdge::Bottom);
    assert_eq!(r.segment_a.start, Point::new(250.0, 100.0));
    assert_eq!(r.segment_a.end, Point::new(300.0, 220.0));
    assert_eq!(r.approach, Approach::Top);
    assert_eq!(r.arrow.rotation, 90);
    assert_eq!(r.arrow.transform(), "rotate(90 312 229)");
}

#[test]
fn test_close_and_above_arrives_from_below() {
    let r = route(Point::new(0.0, 400.0), Point::new(0.0, 0.0), &metrics());
    assert_eq!(r.start_edge, StartEdge::Top);
    assert_eq!(r.segment_a.start, Point::new(150.0, 400.0));
    assert_eq!(r.approach, Approach::Bottom);
    assert_eq!(r.segment_b.end, Point::new(150.0, 100.0));
    assert_eq!(r.arrow.rotation, 270);
    assert_eq!(r.arrow.anchor, Point::new(138.0, 121.0));
}

#[test]
fn test_custom_metrics_shift_attachment_points() {
    let m = Metrics {
        width: 200.0,
        height: 60.0,
        margin: 10.0,
        ..Metrics::default()
    };
    let r = route(Point::new(0.0, 0.0), Point::new(300.0, 0.0), &m);
    assert_eq!(r.segment_a.start, Point::new(200.0, 30.0));
    assert_eq!(r.segment_a.end, Point::new(290.0, 30.0));
    assert_eq!(r.segment_b.end, Point::new(300.0, 30.0));
}

#[test]
fn test_reroute_all_routes_each_connector_once() {
    let mut diagram = Diagram::load(CHAIN, "ci.svg").unwrap();
    let report = ConnectorRouter::new().reroute_all(&mut diagram);

    let expected = vec![
        diagram.connector_by_name(A_TO_B).unwrap(),
        diagram.connector_by_name(B_TO_C).unwrap(),
    ];
    assert_eq!(report.rerouted, expected);
    assert!(report.skipped.is_empty());
}

#[test]
fn test_routing_writes_segments_and_arrow() {
    let mut diagram = Diagram::load(CHAIN, "ci.svg").unwrap();
    ConnectorRouter::new().reroute_all(&mut diagram);

    let doc = diagram.document();
    let seg_b = doc.by_id(&format!("{}-SegmentB", B_TO_C)).unwrap();
    assert_eq!(doc.attribute(seg_b, "x1"), Some("770"));
    assert_eq!(doc.attribute(seg_b, "y1"), Some("50"));
    assert_eq!(doc.attribute(seg_b, "x2"), Some("800"));
    assert_eq!(doc.attribute(seg_b, "y2"), Some("50"));

    let arrow = doc.by_id(&format!("{}-arrow", B_TO_C)).unwrap();
    assert_eq!(doc.attribute(arrow, "x"), Some("779"));
    assert_eq!(doc.attribute(arrow, "y"), Some("38"));
    assert_eq!(doc.attribute(arrow, "transform"), Some("rotate(0 779 38)"));
}

#[test]
fn test_rerouting_unchanged_diagram_records_nothing() {
    let mut diagram = Diagram::load(CHAIN, "ci.svg").unwrap();
    let router = ConnectorRouter::new();
    router.reroute_all(&mut diagram);
    diagram.take_changes();

    router.reroute_all(&mut diagram);
    assert!(diagram.take_changes().is_empty());
}

#[test]
fn test_unresolved_connectors_do_not_block_others() {
    let markup = CHAIN.replace(
        "</svg>",
        r#"<line id="post_rect_0_0_pre_ghost-SegmentA"/>
           <line id="post_rect_0_0_pre_ghost-SegmentB"/>
           <line id="orphan-SegmentA"/>
           </svg>"#,
    );
    let mut diagram = Diagram::load(&markup, "ci.svg").unwrap();
    assert_eq!(diagram.unresolved().len(), 2);
    assert_eq!(diagram.connector_count(), 2);

    let report = ConnectorRouter::new().reroute_all(&mut diagram);
    assert_eq!(report.rerouted.len(), 2);
}

#[test]
fn test_unreadable_source_skips_only_its_connectors() {
    let markup = CHAIN.replace(
        r#"id="rect_0_0" class="draggable" x="0""#,
        r#"id="rect_0_0" class="draggable" x="left""#,
    );
    let mut diagram = Diagram::load(&markup, "ci.svg").unwrap();
    let report = ConnectorRouter::new().reroute_all(&mut diagram);

    assert_eq!(report.rerouted, vec![diagram.connector_by_name(B_TO_C).unwrap()]);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("left"));
}

#[test]
fn test_missing_arrow_glyph_still_routes_segments() {
    let markup = CHAIN.replace(
        r#"<image id="post_rect_0_0_pre_rect_400_0-arrow" xlink:href="arrow.png" width="24" height="24"/>"#,
        "",
    );
    let mut diagram = Diagram::load(&markup, "ci.svg").unwrap();
    let id = diagram.connector_by_name(A_TO_B).unwrap();
    assert!(diagram.connector(id).arrow.is_none());

    let report = ConnectorRouter::new().reroute_all(&mut diagram);
    assert!(report.contains(id));
}
