//! In-memory model of the diagram's element tree
//!
//! The document mirrors the SVG the user sees. Elements live in an arena in
//! document order and are addressed by [`ElementId`]. Every attribute write is
//! also recorded as an [`AttributeChange`], so a browser host can replay the
//! same edits on the live DOM.

mod parser;

use serde::Serialize;
use std::collections::HashMap;

use crate::core::{format_coord, parse_coord, DiagramError, Result};

/// Handle to an element inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Position of the element in document order
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct ElementData {
    name: String,
    attributes: Vec<(String, String)>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// One attribute write, addressed so it can be replayed elsewhere
///
/// `path` lists element-child indices from the root element, matching the
/// DOM's `children` collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeChange {
    pub path: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub value: String,
}

/// Arena-backed element tree
///
/// Always holds at least the root element once parsed.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<ElementData>,
    ids: HashMap<String, ElementId>,
    changes: Vec<AttributeChange>,
    recording: bool,
}

impl Document {
    /// A document with no elements, filled in by the parser
    pub(crate) fn empty() -> Self {
        Self {
            elements: Vec::new(),
            ids: HashMap::new(),
            changes: Vec::new(),
            recording: true,
        }
    }

    /// Parse SVG markup into a document
    pub fn parse(markup: &str) -> Result<Self> {
        parser::parse_document(markup)
    }

    /// The root element (the outermost `svg`)
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Number of elements in the document
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in document order
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len()).map(ElementId)
    }

    /// All elements with the given local tag name, in document order
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = ElementId> + 'a {
        self.elements().filter(move |&el| self.name(el) == name)
    }

    /// Look up an element by its `id` attribute
    pub fn by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }

    /// Local tag name
    pub fn name(&self, el: ElementId) -> &str {
        &self.data(el).name
    }

    /// The element's `id` attribute, if any
    pub fn id(&self, el: ElementId) -> Option<&str> {
        self.attribute(el, "id")
    }

    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.data(el).parent
    }

    /// Element children in document order
    pub fn children(&self, el: ElementId) -> &[ElementId] {
        &self.data(el).children
    }

    pub fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        self.data(el)
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the element's `class` list contains `token`
    pub fn has_class(&self, el: ElementId, token: &str) -> bool {
        self.attribute(el, "class")
            .unwrap_or_default()
            .split_whitespace()
            .any(|t| t == token)
    }

    /// Read a numeric coordinate attribute
    pub fn coord(&self, el: ElementId, name: &str) -> Result<f64> {
        let raw = self
            .attribute(el, name)
            .ok_or_else(|| DiagramError::missing_attribute(self.name(el), name))?;
        parse_coord(raw).ok_or_else(|| DiagramError::invalid_number(name, raw))
    }

    /// Write an attribute, recording the change
    ///
    /// Writing the value an attribute already holds is not recorded. Nothing
    /// is recorded while recording is off.
    pub fn set_attribute(&mut self, el: ElementId, name: &str, value: impl Into<String>) {
        let value = value.into();
        let data = &mut self.elements[el.0];
        match data.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) if *existing == value => return,
            Some((_, existing)) => *existing = value.clone(),
            None => data.attributes.push((name.to_string(), value.clone())),
        }
        if !self.recording {
            return;
        }
        let change = AttributeChange {
            path: self.path(el),
            id: self.id(el).map(str::to_string),
            name: name.to_string(),
            value,
        };
        self.changes.push(change);
    }

    /// Write a numeric coordinate attribute
    pub fn set_coord(&mut self, el: ElementId, name: &str, value: f64) {
        self.set_attribute(el, name, format_coord(value));
    }

    /// Element-child indices leading from the root to `el`
    pub fn path(&self, el: ElementId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = el;
        while let Some(parent) = self.parent(current) {
            let position = self
                .children(parent)
                .iter()
                .position(|&child| child == current)
                .unwrap_or_default();
            path.push(position);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Resolve a path produced by [`Document::path`]
    pub fn resolve_path(&self, path: &[usize]) -> Option<ElementId> {
        if self.is_empty() {
            return None;
        }
        path.iter()
            .try_fold(self.root(), |el, &i| self.children(el).get(i).copied())
    }

    /// Changes recorded since the last call to [`Document::take_changes`]
    pub fn changes(&self) -> &[AttributeChange] {
        &self.changes
    }

    /// Whether attribute writes are recorded as changes
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Turn change recording on or off
    ///
    /// Hosts that never replay changes should turn it off; the log is
    /// otherwise only emptied by [`Document::take_changes`]. Turning it off
    /// discards changes not yet taken.
    pub fn set_recording(&mut self, enabled: bool) {
        self.recording = enabled;
        if !enabled {
            self.changes.clear();
        }
    }

    /// Drain the recorded changes
    pub fn take_changes(&mut self) -> Vec<AttributeChange> {
        std::mem::take(&mut self.changes)
    }

    /// Apply changes recorded by another document with the same structure
    pub fn apply_changes(&mut self, changes: &[AttributeChange]) -> Result<()> {
        for change in changes {
            let el = self.resolve_path(&change.path).ok_or_else(|| {
                DiagramError::unknown_node(&format!("path {:?}", change.path))
            })?;
            self.set_attribute(el, &change.name, change.value.clone());
        }
        Ok(())
    }

    fn data(&self, el: ElementId) -> &ElementData {
        &self.elements[el.0]
    }

    fn push_element(
        &mut self,
        name: &str,
        attributes: Vec<(String, String)>,
        parent: Option<ElementId>,
    ) -> ElementId {
        let el = ElementId(self.elements.len());
        if let Some((_, id)) = attributes.iter().find(|(key, _)| key == "id") {
            // First element wins, as with getElementById
            self.ids.entry(id.clone()).or_insert(el);
        }
        self.elements.push(ElementData {
            name: name.to_string(),
            attributes,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.elements[parent.0].children.push(el);
        }
        el
    }
}
