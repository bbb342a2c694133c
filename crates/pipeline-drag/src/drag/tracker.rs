//! Node position tracking during a drag
//!
//! On drag-start the tracker records where the pointer grabbed the node and
//! where every dependent visual sits relative to the pointer. On drag-move it
//! replays those offsets against the new pointer position.

use tracing::{debug, trace};

use crate::core::{Offset, Point, Result};
use crate::diagram::{naming, Diagram, NodeId, DRAGGABLE_CLASS};
use crate::document::{Document, ElementId};

/// How a dependent visual exposes its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentKind {
    /// A `circle` marker, positioned by its centre
    Point,
    /// Text wrapped in an `a` hyperlink
    Link,
    /// One field of a `g` sub-group
    Group,
    /// An arrowhead glyph
    Arrow,
    /// Any other element with `x`/`y`
    Positioned,
}

impl DependentKind {
    /// Attribute pair holding the position
    pub fn attributes(&self) -> (&'static str, &'static str) {
        match self {
            DependentKind::Point => ("cx", "cy"),
            _ => ("x", "y"),
        }
    }
}

/// A dependent element and its offset from the pointer at drag-start
#[derive(Debug, Clone, PartialEq)]
pub struct DependentOffset {
    pub element: ElementId,
    pub kind: DependentKind,
    pub offset: Offset,
}

/// Everything captured when a node is grabbed
#[derive(Debug, Clone, PartialEq)]
pub struct Grab {
    pub node: NodeId,
    /// Pointer minus node position
    pub offset: Offset,
    pub dependents: Vec<DependentOffset>,
}

impl Grab {
    /// Node position implied by a pointer position
    pub fn node_position(&self, pointer: Point) -> Point {
        pointer - self.offset
    }
}

/// Capture the grab offset and the dependents' offsets
pub fn capture(diagram: &Diagram, node: NodeId, pointer: Point) -> Result<Grab> {
    let position = diagram.position(node)?;
    let shape = diagram.node(node).element;
    let document = diagram.document();

    let mut dependents = Vec::new();
    if let Some(parent) = document.parent(shape) {
        for &child in document.children(parent) {
            // Other stages sharing the parent move on their own
            if child == shape || diagram.node_for_element(child).is_some() {
                continue;
            }
            if !document.has_class(child, DRAGGABLE_CLASS) {
                continue;
            }
            for (element, kind) in dependent_elements(document, child) {
                match element_position(document, element, kind) {
                    Ok(at) => dependents.push(DependentOffset {
                        element,
                        kind,
                        offset: at - pointer,
                    }),
                    Err(e) => debug!(
                        element = element.index(),
                        error = %e,
                        "Dependent has no usable position"
                    ),
                }
            }
        }
    }

    trace!(
        node = %diagram.node(node).id,
        dependent_count = dependents.len(),
        "Captured grab"
    );
    Ok(Grab {
        node,
        offset: pointer - position,
        dependents,
    })
}

/// Move the grabbed node and its dependents to follow `pointer`
pub fn translate(diagram: &mut Diagram, grab: &Grab, pointer: Point) {
    diagram.set_position(grab.node, grab.node_position(pointer));
    let document = diagram.document_mut();
    for dependent in &grab.dependents {
        let at = pointer + dependent.offset;
        let (x_attr, y_attr) = dependent.kind.attributes();
        document.set_coord(dependent.element, x_attr, at.x);
        document.set_coord(dependent.element, y_attr, at.y);
    }
}

/// Elements that carry the position of a draggable sibling
fn dependent_elements(document: &Document, el: ElementId) -> Vec<(ElementId, DependentKind)> {
    match document.name(el) {
        "circle" => vec![(el, DependentKind::Point)],
        "a" => document
            .children(el)
            .first()
            .map(|&text| vec![(text, DependentKind::Link)])
            .unwrap_or_default(),
        "g" => document
            .children(el)
            .iter()
            .map(|&field| (field, DependentKind::Group))
            .collect(),
        "image" if document.id(el).is_some_and(naming::is_arrow_id) => {
            vec![(el, DependentKind::Arrow)]
        }
        _ => vec![(el, DependentKind::Positioned)],
    }
}

fn element_position(document: &Document, el: ElementId, kind: DependentKind) -> Result<Point> {
    let (x_attr, y_attr) = kind.attributes();
    Ok(Point::new(
        document.coord(el, x_attr)?,
        document.coord(el, y_attr)?,
    ))
}
