//! Shaping of one raw element into a normalized document.
//!
//! Shaping either returns a complete document or a rejection. Rejections are
//! expected and frequent (most of a regional extract lies outside the city
//! rectangle), so they are ordinary return values rather than errors.

use std::fmt;

use crate::cleaning::{classify, clean_value, Subfield};
use crate::config::{has_problem_chars, COORDINATE_FIELDS, PROVENANCE_FIELDS};
use crate::geofence::in_region;
use crate::types::{DocumentBuilder, DocumentKind, NormalizedDocument, RawElement};

/// Result of shaping one element.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeOutcome {
    Accepted(NormalizedDocument),
    Rejected(ElementRejection),
}

impl ShapeOutcome {
    /// The document, if the element was accepted.
    #[must_use]
    pub fn into_document(self) -> Option<NormalizedDocument> {
        match self {
            Self::Accepted(doc) => Some(doc),
            Self::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Why a whole element was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementRejection {
    /// Not a node or a way.
    UnsupportedType,
    /// Has coordinates outside the region rectangle.
    OutsideRegion,
}

impl ElementRejection {
    /// Stable name for logs and statistics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedType => "unsupported_type",
            Self::OutsideRegion => "outside_region",
        }
    }
}

impl fmt::Display for ElementRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape a raw element into a normalized document.
///
/// Elements without usable coordinates are not geofenced. Elements with
/// coordinates outside the region are rejected.
///
/// # Examples
/// ```
/// use osm_shaper::shaper::{shape, ElementRejection, ShapeOutcome};
/// use osm_shaper::types::{ElementKind, RawElement};
///
/// let cafe = RawElement::new(ElementKind::Point)
///     .with_attribute("lat", "44.98")
///     .with_attribute("lon", "-93.27")
///     .with_tag("amenity", "cafe");
/// let doc = shape(&cafe).into_document().unwrap();
/// assert_eq!(doc.field("amenity"), Some("cafe"));
///
/// let relation = RawElement::new(ElementKind::from_tag("relation"));
/// assert_eq!(shape(&relation), ShapeOutcome::Rejected(ElementRejection::UnsupportedType));
/// ```
pub fn shape(element: &RawElement) -> ShapeOutcome {
    let Some(kind) = DocumentKind::from_element(&element.kind) else {
        return ShapeOutcome::Rejected(ElementRejection::UnsupportedType);
    };

    let mut builder = DocumentBuilder::new(kind);

    if let Some((lat, lon)) = parse_coordinates(element) {
        if !in_region(lat, lon) {
            return ShapeOutcome::Rejected(ElementRejection::OutsideRegion);
        }
        builder.set_position(lat, lon);
    }

    shape_attributes(element, &mut builder);
    shape_tags(element, &mut builder);

    if kind == DocumentKind::Way {
        for reference in &element.member_refs {
            builder.push_member_ref(reference.as_str());
        }
    } else if !element.member_refs.is_empty() {
        tracing::debug!(
            count = element.member_refs.len(),
            "Ignoring member references on a node"
        );
    }

    ShapeOutcome::Accepted(builder.build())
}

/// Parse `lat`/`lon`. Unless both parse, the element has no coordinates.
fn parse_coordinates(element: &RawElement) -> Option<(f64, f64)> {
    let raw_lat = element.attribute("lat");
    let raw_lon = element.attribute("lon");

    let lat = raw_lat.and_then(|v| v.trim().parse::<f64>().ok());
    let lon = raw_lon.and_then(|v| v.trim().parse::<f64>().ok());

    match (lat, lon) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        _ => {
            if raw_lat.is_some() || raw_lon.is_some() {
                tracing::debug!(
                    lat = raw_lat.unwrap_or_default(),
                    lon = raw_lon.unwrap_or_default(),
                    "Malformed coordinate, treating element as unlocated"
                );
            }
            None
        }
    }
}

fn shape_attributes(element: &RawElement, builder: &mut DocumentBuilder) {
    for (name, value) in &element.attributes {
        if COORDINATE_FIELDS.contains(&name.as_str()) {
            continue;
        }
        if PROVENANCE_FIELDS.contains(&name.as_str()) {
            builder.set_provenance(name.as_str(), value.as_str());
        } else if !builder.set_field(name.as_str(), value.as_str()) {
            tracing::trace!(attribute = %name, "Dropping attribute with reserved name");
        }
    }
}

fn shape_tags(element: &RawElement, builder: &mut DocumentBuilder) {
    for tag in &element.tags {
        if has_problem_chars(&tag.key) {
            tracing::trace!(key = %tag.key, "Skipping tag with problem characters in key");
            continue;
        }

        if tag.key.contains(':') {
            match classify(&tag.key, &tag.value) {
                Subfield::Address { field, value } => builder.set_address(field, value),
                Subfield::Organization { field, value } => builder.set_organization(field, value),
                Subfield::Rejected(reason) => {
                    tracing::trace!(key = %tag.key, %reason, "Dropping subfield");
                }
            }
            continue;
        }

        match clean_value(&tag.value) {
            Some(value) => {
                if !builder.set_field(tag.key.as_str(), value) {
                    tracing::trace!(key = %tag.key, "Dropping tag with reserved name");
                }
            }
            None => tracing::trace!(key = %tag.key, "Dropping tag with malformed value"),
        }
    }
}
