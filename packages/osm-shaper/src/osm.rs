//! Reading raw elements from OSM XML.
//!
//! An OSM extract is a flat `<osm>` root whose children are `<node>`,
//! `<way>`, `<relation>` (and bookkeeping such as `<bounds>`). Key/value
//! data sits in `<tag k v/>` children; ways list their nodes as `<nd ref/>`.

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::config::validate_input_path;
use crate::error::{Result, ShaperError};
use crate::types::{ElementKind, RawElement, Tag};

/// Read and parse an OSM XML file.
///
/// The whole file is held in memory while parsing.
///
/// # Returns
/// Every top-level element of the extract, in document order
pub fn read_elements(path: &Path) -> Result<Vec<RawElement>> {
    validate_input_path(path)?;
    let xml = fs::read_to_string(path)?;
    let elements = parse_str(&xml)?;
    tracing::debug!(
        path = %path.display(),
        count = elements.len(),
        "Read OSM elements"
    );
    Ok(elements)
}

/// Parse OSM XML text into raw elements.
pub fn parse_str(xml: &str) -> Result<Vec<RawElement>> {
    let doc = Document::parse(xml)?;
    parse_elements(&doc)
}

/// Collect raw elements from a parsed OSM document.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use osm_shaper::osm::parse_elements;
/// use osm_shaper::types::ElementKind;
///
/// let xml = r#"<osm><node id="1" lat="44.98" lon="-93.27"><tag k="amenity" v="cafe"/></node></osm>"#;
/// let doc = Document::parse(xml).unwrap();
/// let elements = parse_elements(&doc).unwrap();
/// assert_eq!(elements[0].kind, ElementKind::Point);
/// assert_eq!(elements[0].tags[0].value, "cafe");
/// ```
pub fn parse_elements(doc: &Document<'_>) -> Result<Vec<RawElement>> {
    let root = doc.root_element();
    let root_tag = tag_name(root);
    if root_tag != "osm" {
        return Err(ShaperError::UnexpectedRoot(root_tag.to_string()));
    }

    Ok(root
        .children()
        .filter(Node::is_element)
        .map(read_element)
        .collect())
}

fn read_element(node: Node<'_, '_>) -> RawElement {
    let mut element = RawElement::new(ElementKind::from_tag(tag_name(node)));

    element.attributes = node
        .attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect();

    for child in node.children().filter(Node::is_element) {
        match tag_name(child) {
            "tag" => match (child.attribute("k"), child.attribute("v")) {
                (Some(key), Some(value)) => element.tags.push(Tag::new(key, value)),
                _ => tracing::warn!(
                    element = node.attribute("id").unwrap_or("?"),
                    "Skipping <tag> without k or v"
                ),
            },
            "nd" => match child.attribute("ref") {
                Some(reference) => element.member_refs.push(reference.to_string()),
                None => tracing::warn!(
                    element = node.attribute("id").unwrap_or("?"),
                    "Skipping <nd> without ref"
                ),
            },
            _ => {}
        }
    }

    element
}

/// Tag name without namespace prefix.
fn tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}
