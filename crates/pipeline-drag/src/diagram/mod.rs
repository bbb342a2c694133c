//! Explicit pipeline graph built from an authored diagram
//!
//! Loading scans the document once. It registers every draggable `rect` with
//! an id as a [`Node`] and pairs `SegmentA`/`SegmentB` lines into
//! [`Connector`]s with direct source and target references. Routing never
//! scans the document again.

pub mod naming;

use std::collections::HashMap;
use tracing::{debug, info, span, warn, Level};

use crate::core::{DiagramConfig, DiagramError, Metrics, Point, Result};
use crate::document::{AttributeChange, Document, ElementId};
use naming::SegmentRole;

/// Class token marking elements the user may drag
pub const DRAGGABLE_CLASS: &str = "draggable";

/// Tag name of node shapes
pub const NODE_TAG: &str = "rect";

/// Index of a node within its [`Diagram`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Index of a connector within its [`Diagram`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectorId(usize);

impl ConnectorId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A pipeline stage
#[derive(Debug, Clone)]
pub struct Node {
    /// The shape's `id` attribute
    pub id: String,
    /// The `rect` element
    pub element: ElementId,
    /// Connectors ending at this node
    pub incoming: Vec<ConnectorId>,
    /// Connectors starting at this node
    pub outgoing: Vec<ConnectorId>,
}

/// A dependency between two stages, drawn as two segments and an arrowhead
#[derive(Debug, Clone)]
pub struct Connector {
    /// Shared id prefix of the segment elements
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub segment_a: ElementId,
    pub segment_b: ElementId,
    pub arrow: Option<ElementId>,
}

/// A connector that could not be attached to two nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedConnector {
    pub id: String,
    pub reason: String,
}

impl UnresolvedConnector {
    pub fn to_error(&self) -> DiagramError {
        DiagramError::unresolved_connector(&self.id, self.reason.clone())
    }
}

#[derive(Default)]
struct SegmentPair {
    a: Option<ElementId>,
    b: Option<ElementId>,
}

/// A loaded diagram: its document plus the pipeline graph
#[derive(Debug, Clone)]
pub struct Diagram {
    document: Document,
    config: DiagramConfig,
    location: String,
    nodes: Vec<Node>,
    node_index: HashMap<String, NodeId>,
    element_index: HashMap<ElementId, NodeId>,
    connectors: Vec<Connector>,
    unresolved: Vec<UnresolvedConnector>,
    save_trigger: Option<ElementId>,
}

impl Diagram {
    /// Parse markup and index it with the default configuration
    ///
    /// `location` is where the diagram was loaded from; its last path segment
    /// names exported files.
    pub fn load(markup: &str, location: &str) -> Result<Self> {
        Self::load_with_config(markup, location, DiagramConfig::default())
    }

    /// Parse markup and index it
    pub fn load_with_config(markup: &str, location: &str, config: DiagramConfig) -> Result<Self> {
        config.validate()?;
        let document = Document::parse(markup)?;
        Ok(Self::from_document(document, location, config))
    }

    /// Index an already parsed document
    pub fn from_document(document: Document, location: &str, config: DiagramConfig) -> Self {
        let index_span = span!(Level::INFO, "index_diagram", location = location);
        let _enter = index_span.enter();

        let mut diagram = Self {
            save_trigger: document.by_id(&config.save_trigger_id),
            document,
            config,
            location: location.to_string(),
            nodes: Vec::new(),
            node_index: HashMap::new(),
            element_index: HashMap::new(),
            connectors: Vec::new(),
            unresolved: Vec::new(),
        };
        diagram.index_nodes();
        diagram.index_connectors();

        if diagram.save_trigger.is_none() {
            debug!(
                save_trigger_id = %diagram.config.save_trigger_id,
                "No save trigger element"
            );
        }
        info!(
            node_count = diagram.nodes.len(),
            connector_count = diagram.connectors.len(),
            unresolved_count = diagram.unresolved.len(),
            "Indexed diagram"
        );
        diagram
    }

    fn index_nodes(&mut self) {
        let shapes: Vec<ElementId> = self
            .document
            .elements_named(NODE_TAG)
            .filter(|&el| self.document.has_class(el, DRAGGABLE_CLASS))
            .collect();

        for element in shapes {
            let Some(id) = self.document.id(element).map(str::to_string) else {
                debug!(element = element.index(), "Skipping draggable rect without id");
                continue;
            };
            if self.node_index.contains_key(&id) {
                warn!(node = %id, "Duplicate node id, keeping the first");
                continue;
            }
            let node_id = NodeId(self.nodes.len());
            self.node_index.insert(id.clone(), node_id);
            self.element_index.insert(element, node_id);
            self.nodes.push(Node {
                id,
                element,
                incoming: Vec::new(),
                outgoing: Vec::new(),
            });
        }
    }

    fn index_connectors(&mut self) {
        // Pair segments by connector id, keeping first-seen order
        let mut order: Vec<String> = Vec::new();
        let mut pairs: HashMap<String, SegmentPair> = HashMap::new();
        for line in self.document.elements_named("line") {
            let Some(name) = self.document.id(line).and_then(naming::parse_segment_id) else {
                continue;
            };
            let pair = pairs
                .entry(name.connector_id.to_string())
                .or_insert_with(|| {
                    order.push(name.connector_id.to_string());
                    SegmentPair::default()
                });
            let slot = match name.role {
                SegmentRole::A => &mut pair.a,
                SegmentRole::B => &mut pair.b,
            };
            if slot.is_none() {
                *slot = Some(line);
            }
        }

        for connector_id in order {
            let pair = pairs.remove(&connector_id).unwrap_or_default();
            match self.resolve_connector(&connector_id, pair) {
                Ok(connector) => {
                    let id = ConnectorId(self.connectors.len());
                    self.nodes[connector.source.0].outgoing.push(id);
                    self.nodes[connector.target.0].incoming.push(id);
                    self.connectors.push(connector);
                }
                Err(reason) => {
                    warn!(connector = %connector_id, %reason, "Unresolved connector");
                    self.unresolved.push(UnresolvedConnector {
                        id: connector_id,
                        reason,
                    });
                }
            }
        }
    }

    fn resolve_connector(
        &self,
        connector_id: &str,
        pair: SegmentPair,
    ) -> std::result::Result<Connector, String> {
        let segment_a = pair.a.ok_or("missing SegmentA line")?;
        let segment_b = pair.b.ok_or("missing SegmentB line")?;

        let candidates = naming::endpoint_candidates(connector_id);
        if candidates.is_empty() {
            return Err("id does not follow post_<source>_pre_<target>".to_string());
        }
        let resolved = candidates.iter().find_map(|(source, target)| {
            Some((*self.node_index.get(*source)?, *self.node_index.get(*target)?))
        });
        let Some((source, target)) = resolved else {
            let (source, target) = candidates[0];
            let missing = if self.node_index.contains_key(source) {
                target
            } else {
                source
            };
            return Err(format!("no node with id {}", missing));
        };

        let arrow = self.document.by_id(&naming::arrow_id(connector_id));
        if arrow.is_none() {
            debug!(connector = %connector_id, "Connector has no arrow glyph");
        }

        Ok(Connector {
            id: connector_id.to_string(),
            source,
            target,
            segment_a,
            segment_b,
            arrow,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.config.metrics
    }

    /// Where the diagram was loaded from
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The element that triggers an export, when present
    pub fn save_trigger(&self) -> Option<ElementId> {
        self.save_trigger
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn connectors(&self) -> impl Iterator<Item = (ConnectorId, &Connector)> {
        self.connectors
            .iter()
            .enumerate()
            .map(|(i, c)| (ConnectorId(i), c))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn connector(&self, id: ConnectorId) -> &Connector {
        &self.connectors[id.0]
    }

    /// Look up a node by its element id string
    pub fn node_by_name(&self, id: &str) -> Option<NodeId> {
        self.node_index.get(id).copied()
    }

    /// The node whose shape is `element`
    pub fn node_for_element(&self, element: ElementId) -> Option<NodeId> {
        self.element_index.get(&element).copied()
    }

    /// Look up a connector by its id prefix
    pub fn connector_by_name(&self, id: &str) -> Option<ConnectorId> {
        self.connectors
            .iter()
            .position(|c| c.id == id)
            .map(ConnectorId)
    }

    /// Connectors that could not be attached to two nodes
    pub fn unresolved(&self) -> &[UnresolvedConnector] {
        &self.unresolved
    }

    pub fn incoming(&self, node: NodeId) -> &[ConnectorId] {
        &self.nodes[node.0].incoming
    }

    pub fn outgoing(&self, node: NodeId) -> &[ConnectorId] {
        &self.nodes[node.0].outgoing
    }

    /// Targets of the node's outgoing connectors, in connector order
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing(node)
            .iter()
            .map(move |&c| self.connectors[c.0].target)
    }

    /// Current top-left corner of a node's shape
    pub fn position(&self, node: NodeId) -> Result<Point> {
        let element = self.nodes[node.0].element;
        Ok(Point::new(
            self.document.coord(element, "x")?,
            self.document.coord(element, "y")?,
        ))
    }

    /// Move a node's shape (dependents are not touched)
    pub fn set_position(&mut self, node: NodeId, position: Point) {
        let element = self.nodes[node.0].element;
        self.document.set_coord(element, "x", position.x);
        self.document.set_coord(element, "y", position.y);
    }

    /// Drain the attribute changes recorded by the document
    pub fn take_changes(&mut self) -> Vec<AttributeChange> {
        self.document.take_changes()
    }

    /// See [`Document::set_recording`]
    pub fn set_change_recording(&mut self, enabled: bool) {
        self.document.set_recording(enabled);
    }
}
