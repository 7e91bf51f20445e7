//! Core data types: raw OSM elements and the documents built from them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::is_reserved_field;

/// Kind of a raw element, taken from its XML tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// `<node>`: a single point.
    Point,
    /// `<way>`: an ordered list of node references.
    Way,
    /// Anything else (`relation`, `bounds`, ...). Never shaped.
    Other(String),
}

impl ElementKind {
    /// Map an OSM XML tag name to an element kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "node" => Self::Point,
            "way" => Self::Way,
            other => Self::Other(other.to_string()),
        }
    }

    /// OSM tag name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Point => "node",
            Self::Way => "way",
            Self::Other(tag) => tag,
        }
    }
}

/// One `<tag k=".." v=".."/>` child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An element as read from the source, before any cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawElement {
    /// Element kind.
    pub kind: ElementKind,

    /// XML attributes in document order (`id`, `lat`, `user`, ...).
    pub attributes: Vec<(String, String)>,

    /// Child tags in document order.
    pub tags: Vec<Tag>,

    /// Child `<nd ref>` values in document order. Ways only.
    pub member_refs: Vec<String>,
}

impl RawElement {
    /// Create an element with no attributes or children.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            tags: Vec::new(),
            member_refs: Vec::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child tag.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    /// Add a member reference.
    #[must_use]
    pub fn with_member_ref(mut self, reference: impl Into<String>) -> Self {
        self.member_refs.push(reference.into());
        self
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Kind of an emitted document. Only points and ways are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentKind {
    #[serde(rename = "point")]
    Point,
    #[serde(rename = "way")]
    Way,
}

impl DocumentKind {
    /// Document kind for a raw element kind, if it is shaped at all.
    #[must_use]
    pub fn from_element(kind: &ElementKind) -> Option<Self> {
        match kind {
            ElementKind::Point => Some(Self::Point),
            ElementKind::Way => Some(Self::Way),
            ElementKind::Other(_) => None,
        }
    }
}

/// Latitude/longitude pair, serialized as `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl From<Position> for [f64; 2] {
    fn from(position: Position) -> Self {
        [position.lat, position.lon]
    }
}

/// Cleaned, structured representation of one accepted element.
///
/// Optional sub-objects are `None` rather than empty, so they are left out of
/// the serialized record entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedDocument {
    #[serde(rename = "type")]
    pub kind: DocumentKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_data: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_refs: Option<Vec<String>>,

    pub provenance: BTreeMap<String, String>,

    /// Remaining attributes and accepted non-namespaced tags.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl NormalizedDocument {
    /// Look up a flat field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Look up an address subfield.
    #[must_use]
    pub fn address_field(&self, name: &str) -> Option<&str> {
        self.address
            .as_ref()
            .and_then(|address| address.get(name))
            .map(String::as_str)
    }
}

/// Accumulates the parts of a [`NormalizedDocument`].
///
/// Every setter overwrites an earlier value for the same name. `build`
/// consumes the builder and collapses empty sub-objects to `None`.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    kind: DocumentKind,
    position: Option<Position>,
    fields: BTreeMap<String, String>,
    address: BTreeMap<String, String>,
    organization_data: BTreeMap<String, String>,
    member_refs: Vec<String>,
    provenance: BTreeMap<String, String>,
}

impl DocumentBuilder {
    #[must_use]
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            position: None,
            fields: BTreeMap::new(),
            address: BTreeMap::new(),
            organization_data: BTreeMap::new(),
            member_refs: Vec::new(),
            provenance: BTreeMap::new(),
        }
    }

    pub fn set_position(&mut self, lat: f64, lon: f64) {
        self.position = Some(Position { lat, lon });
    }

    /// Set a flat field.
    ///
    /// Returns `false` and stores nothing if `name` is a reserved document
    /// field.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if is_reserved_field(&name) {
            return false;
        }
        self.fields.insert(name, value.into());
        true
    }

    pub fn set_address(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.address.insert(field.into(), value.into());
    }

    pub fn set_organization(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.organization_data.insert(field.into(), value.into());
    }

    pub fn set_provenance(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.provenance.insert(field.into(), value.into());
    }

    pub fn push_member_ref(&mut self, reference: impl Into<String>) {
        self.member_refs.push(reference.into());
    }

    #[must_use]
    pub fn build(self) -> NormalizedDocument {
        NormalizedDocument {
            kind: self.kind,
            position: self.position,
            address: non_empty_map(self.address),
            organization_data: non_empty_map(self.organization_data),
            member_refs: (!self.member_refs.is_empty()).then_some(self.member_refs),
            provenance: self.provenance,
            fields: self.fields,
        }
    }
}

fn non_empty_map(map: BTreeMap<String, String>) -> Option<BTreeMap<String, String>> {
    (!map.is_empty()).then_some(map)
}
