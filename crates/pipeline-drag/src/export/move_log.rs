//! Committed end positions of dragged nodes

use serde::{Deserialize, Serialize};

/// Final resting position of one node, truncated to whole units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub id: String,
    pub x: i64,
    pub y: i64,
}

impl MoveEntry {
    /// Build an entry, truncating the coordinates toward zero
    pub fn truncated(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x: x.trunc() as i64,
            y: y.trunc() as i64,
        }
    }
}

/// Ordered set of committed moves, at most one entry per node
///
/// Entries keep the order in which each node was first committed. Committing
/// a node again replaces its coordinates in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveLog {
    entries: Vec<MoveEntry>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update the entry for `entry.id`
    pub fn record(&mut self, entry: MoveEntry) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn entries(&self) -> &[MoveEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&MoveEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
