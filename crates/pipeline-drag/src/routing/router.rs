//! Applies routes to connector elements and runs the reroute cascade

use std::collections::{HashSet, VecDeque};
use tracing::{debug, span, trace, warn, Level};

use super::policy::{route, Route};
use crate::core::Result;
use crate::diagram::{ConnectorId, Diagram, NodeId};

/// A connector left untouched during a reroute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedConnector {
    pub connector: ConnectorId,
    pub reason: String,
}

/// What one reroute pass touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RerouteReport {
    /// Connectors whose geometry was rewritten, in processing order
    pub rerouted: Vec<ConnectorId>,
    /// Connectors that could not be routed
    pub skipped: Vec<SkippedConnector>,
}

impl RerouteReport {
    pub fn is_empty(&self) -> bool {
        self.rerouted.is_empty() && self.skipped.is_empty()
    }

    /// Whether `connector` was rewritten in this pass
    pub fn contains(&self, connector: ConnectorId) -> bool {
        self.rerouted.contains(&connector)
    }
}

/// Connector router
///
/// Each connector's geometry depends only on the positions of its source and
/// target. Moving a node therefore invalidates its incoming connectors and
/// those of its downstream targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectorRouter;

impl ConnectorRouter {
    pub fn new() -> Self {
        Self
    }

    /// Reroute everything that depends on the position of `moved`
    ///
    /// Walks the dependency graph breadth-first from `moved`. Each visited node
    /// has its incoming connectors rerouted once. Only nodes whose position
    /// changed expand to their successors.
    pub fn reroute_from(&self, diagram: &mut Diagram, moved: NodeId) -> RerouteReport {
        let reroute_span = span!(Level::DEBUG, "reroute_from", node = %diagram.node(moved).id);
        let _enter = reroute_span.enter();

        let mut report = RerouteReport::default();
        let mut visited_nodes: HashSet<NodeId> = HashSet::from([moved]);
        let mut visited_connectors: HashSet<ConnectorId> = HashSet::new();
        let mut queue: VecDeque<(NodeId, bool)> = VecDeque::from([(moved, true)]);

        while let Some((node, position_changed)) = queue.pop_front() {
            trace!(node = %diagram.node(node).id, position_changed, "Visiting node");

            let incoming = diagram.incoming(node).to_vec();
            for connector in incoming {
                if visited_connectors.insert(connector) {
                    self.reroute_into(diagram, connector, &mut report);
                }
            }

            if position_changed {
                let successors: Vec<NodeId> = diagram.successors(node).collect();
                for successor in successors {
                    if visited_nodes.insert(successor) {
                        queue.push_back((successor, false));
                    }
                }
            }
        }

        debug!(
            rerouted = report.rerouted.len(),
            skipped = report.skipped.len(),
            "Reroute complete"
        );
        report
    }

    /// Route every resolved connector once, in document order
    pub fn reroute_all(&self, diagram: &mut Diagram) -> RerouteReport {
        let reroute_span = span!(Level::DEBUG, "reroute_all");
        let _enter = reroute_span.enter();

        let mut report = RerouteReport::default();
        let connectors: Vec<ConnectorId> = diagram.connectors().map(|(id, _)| id).collect();
        for connector in connectors {
            self.reroute_into(diagram, connector, &mut report);
        }
        debug!(rerouted = report.rerouted.len(), "Initial routing complete");
        report
    }

    /// Recompute and write one connector's geometry
    pub fn reroute_connector(&self, diagram: &mut Diagram, id: ConnectorId) -> Result<Route> {
        let connector = diagram.connector(id).clone();
        let source = diagram.position(connector.source)?;
        let target = diagram.position(connector.target)?;
        let route = route(source, target, diagram.metrics());

        trace!(
            connector = %connector.id,
            start_edge = ?route.start_edge,
            approach = %route.approach,
            "Routing connector"
        );

        let document = diagram.document_mut();
        for (element, segment) in [
            (connector.segment_a, route.segment_a),
            (connector.segment_b, route.segment_b),
        ] {
            document.set_coord(element, "x1", segment.start.x);
            document.set_coord(element, "y1", segment.start.y);
            document.set_coord(element, "x2", segment.end.x);
            document.set_coord(element, "y2", segment.end.y);
        }

        if let Some(arrow) = connector.arrow {
            document.set_coord(arrow, "x", route.arrow.anchor.x);
            document.set_coord(arrow, "y", route.arrow.anchor.y);
            document.set_attribute(arrow, "transform", route.arrow.transform());
        }

        Ok(route)
    }

    fn reroute_into(&self, diagram: &mut Diagram, id: ConnectorId, report: &mut RerouteReport) {
        match self.reroute_connector(diagram, id) {
            Ok(_) => report.rerouted.push(id),
            Err(e) => {
                warn!(connector = %diagram.connector(id).id, error = %e, "Skipping connector");
                report.skipped.push(SkippedConnector {
                    connector: id,
                    reason: e.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point;

    // a -> b -> c, plus d -> b
    const GRAPH: &str = r#"<svg>
        <rect id="a" class="draggable" x="0" y="0"/>
        <rect id="b" class="draggable" x="400" y="0"/>
        <rect id="c" class="draggable" x="800" y="0"/>
        <rect id="d" class="draggable" x="0" y="300"/>
        <line id="post_a_pre_b-SegmentA"/><line id="post_a_pre_b-SegmentB"/>
        <line id="post_b_pre_c-SegmentA"/><line id="post_b_pre_c-SegmentB"/>
        <line id="post_d_pre_b-SegmentA"/><line id="post_d_pre_b-SegmentB"/>
        <image id="post_a_pre_b-arrow"/>
    </svg>"#;

    fn connector(diagram: &Diagram, name: &str) -> ConnectorId {
        diagram.connector_by_name(name).unwrap()
    }

    #[test]
    fn test_moving_source_reroutes_downstream_incoming() {
        let mut diagram = Diagram::load(GRAPH, "g.svg").unwrap();
        let a = diagram.node_by_name("a").unwrap();
        let report = ConnectorRouter::new().reroute_from(&mut diagram, a);

        // b's incoming connectors, both of them, and nothing else
        assert_eq!(report.rerouted.len(), 2);
        assert!(report.contains(connector(&diagram, "post_a_pre_b")));
        assert!(report.contains(connector(&diagram, "post_d_pre_b")));
        assert!(!report.contains(connector(&diagram, "post_b_pre_c")));
    }

    #[test]
    fn test_moving_middle_node_reroutes_both_sides_once() {
        let mut diagram = Diagram::load(GRAPH, "g.svg").unwrap();
        let b = diagram.node_by_name("b").unwrap();
        let report = ConnectorRouter::new().reroute_from(&mut diagram, b);

        assert_eq!(report.rerouted.len(), 3);
        let unique: HashSet<_> = report.rerouted.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_route_is_written_to_elements() {
        let mut diagram = Diagram::load(GRAPH, "g.svg").unwrap();
        let id = connector(&diagram, "post_a_pre_b");
        ConnectorRouter::new().reroute_connector(&mut diagram, id).unwrap();

        let c = diagram.connector(id).clone();
        let doc = diagram.document();
        assert_eq!(doc.attribute(c.segment_a, "x1"), Some("300"));
        assert_eq!(doc.attribute(c.segment_a, "y1"), Some("50"));
        assert_eq!(doc.attribute(c.segment_a, "x2"), Some("370"));
        assert_eq!(doc.attribute(c.segment_b, "x1"), Some("370"));
        assert_eq!(doc.attribute(c.segment_b, "x2"), Some("400"));
        let arrow = c.arrow.unwrap();
        assert_eq!(doc.attribute(arrow, "transform"), Some("rotate(0 379 38)"));
    }

    #[test]
    fn test_missing_arrow_still_routes_segments() {
        let mut diagram = Diagram::load(GRAPH, "g.svg").unwrap();
        let id = connector(&diagram, "post_b_pre_c");
        let route = ConnectorRouter::new().reroute_connector(&mut diagram, id).unwrap();
        assert_eq!(route.segment_a.start, Point::new(700.0, 50.0));
    }

    #[test]
    fn test_unreadable_position_is_skipped() {
        let markup = GRAPH.replace(r#"id="d" class="draggable" x="0""#, r#"id="d" class="draggable" x="?""#);
        let mut diagram = Diagram::load(&markup, "g.svg").unwrap();
        let report = ConnectorRouter::new().reroute_all(&mut diagram);
        assert_eq!(report.rerouted.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].connector, connector(&diagram, "post_d_pre_b"));
    }
}
