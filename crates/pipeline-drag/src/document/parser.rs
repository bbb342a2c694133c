//! SVG markup to [`Document`] conversion using `roxmltree`

use roxmltree::{Node, ParsingOptions};
use tracing::{debug, span, Level};

use super::{Document, ElementId};
use crate::core::Result;

pub(super) fn parse_document(markup: &str) -> Result<Document> {
    let parse_span = span!(Level::DEBUG, "parse_document", input_len = markup.len());
    let _enter = parse_span.enter();

    // Exported SVGs frequently carry an SVG 1.1 DOCTYPE
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(markup, options)?;

    let mut document = Document::empty();
    append_element(&mut document, xml.root_element(), None);

    debug!(element_count = document.len(), "Parsed document");
    Ok(document)
}

fn append_element(document: &mut Document, node: Node<'_, '_>, parent: Option<ElementId>) {
    let attributes = node
        .attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect();
    let el = document.push_element(node.tag_name().name(), attributes, parent);
    for child in node.children().filter(Node::is_element) {
        append_element(document, child, Some(el));
    }
}
