//! Element naming conventions of authored pipeline diagrams
//!
//! Connector segments are `line` elements named
//! `post_<sourceId>_pre_<targetId>-SegmentA` and `...-SegmentB`. The arrow
//! glyph of a connector is named `<connectorId>-arrow`.

/// Prefix of a connector id, followed by the source node id
pub const SOURCE_PREFIX: &str = "post_";
/// Separator between the source and target node ids
pub const TARGET_MARKER: &str = "_pre_";
/// Suffix of the proximal segment
pub const SEGMENT_A_SUFFIX: &str = "-SegmentA";
/// Suffix of the distal segment
pub const SEGMENT_B_SUFFIX: &str = "-SegmentB";
/// Suffix of an arrow glyph
pub const ARROW_SUFFIX: &str = "-arrow";

/// Which half of a connector a line element draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentRole {
    /// Proximal half, starting at the source
    A,
    /// Distal half, ending at the target
    B,
}

/// A parsed segment element id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentName<'a> {
    pub connector_id: &'a str,
    pub role: SegmentRole,
}

/// Split a line id into its connector id and segment role
pub fn parse_segment_id(id: &str) -> Option<SegmentName<'_>> {
    if let Some(connector_id) = id.strip_suffix(SEGMENT_A_SUFFIX) {
        Some(SegmentName {
            connector_id,
            role: SegmentRole::A,
        })
    } else {
        id.strip_suffix(SEGMENT_B_SUFFIX)
            .map(|connector_id| SegmentName {
                connector_id,
                role: SegmentRole::B,
            })
    }
}

/// Every `(source, target)` split of a connector id
///
/// Node ids may themselves contain `_pre_`, so each occurrence of the marker is
/// a candidate. The caller picks the split whose halves name known nodes.
pub fn endpoint_candidates(connector_id: &str) -> Vec<(&str, &str)> {
    let Some(rest) = connector_id.strip_prefix(SOURCE_PREFIX) else {
        return Vec::new();
    };
    rest.match_indices(TARGET_MARKER)
        .map(|(at, marker)| (&rest[..at], &rest[at + marker.len()..]))
        .filter(|(source, target)| !source.is_empty() && !target.is_empty())
        .collect()
}

/// Id of the arrow glyph belonging to a connector
pub fn arrow_id(connector_id: &str) -> String {
    format!("{}{}", connector_id, ARROW_SUFFIX)
}

/// Whether an element id names an arrow glyph
pub fn is_arrow_id(id: &str) -> bool {
    id == "arrow" || id.ends_with(ARROW_SUFFIX)
}
