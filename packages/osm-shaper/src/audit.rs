//! Exploratory audit of a raw extract, run before cleaning.
//!
//! The report shows which street endings, tag keys, address values,
//! postcodes and amenity labels actually occur, which is what the cleaning
//! tables in [`crate::config`] were derived from.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{is_region_postcode, FULL_STREET_NAMES};
use crate::types::{ElementKind, RawElement};

/// Last word of a street name, with an optional trailing period.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static STREET_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\S+\.?$").expect("valid regex"));

/// Postcode counts against the in-region set, plus every state seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostcodeTally {
    pub in_region: usize,
    pub out_of_region: usize,
    pub states: BTreeSet<String>,
}

/// Everything the audit collects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// Non-standard street endings of `addr:street` (nodes and ways).
    pub street_types: BTreeMap<String, usize>,
    /// Tag key frequencies over nodes.
    pub node_tag_keys: BTreeMap<String, usize>,
    /// Distinct values, in first-seen order, of node keys containing `addr`.
    pub address_values: BTreeMap<String, Vec<String>>,
    /// Node `addr:postcode` / `addr:state` summary.
    pub postcodes: PostcodeTally,
    /// Value frequencies of node keys containing `amenity`.
    pub amenities: BTreeMap<String, usize>,
}

/// Single-pass collector behind [`audit`].
#[derive(Debug, Default)]
pub struct Auditor {
    report: AuditReport,
}

impl Auditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one element to the report.
    pub fn observe(&mut self, element: &RawElement) {
        let is_node = element.kind == ElementKind::Point;
        if !is_node && element.kind != ElementKind::Way {
            return;
        }

        for tag in &element.tags {
            if tag.key == "addr:street" {
                self.observe_street(&tag.value);
            }

            if !is_node {
                continue;
            }

            *self
                .report
                .node_tag_keys
                .entry(tag.key.clone())
                .or_default() += 1;

            if tag.key.contains("addr") {
                let values = self
                    .report
                    .address_values
                    .entry(tag.key.clone())
                    .or_default();
                if !values.contains(&tag.value) {
                    values.push(tag.value.clone());
                }
            }

            match tag.key.as_str() {
                "addr:postcode" if is_region_postcode(&tag.value) => {
                    self.report.postcodes.in_region += 1;
                }
                "addr:postcode" => self.report.postcodes.out_of_region += 1,
                "addr:state" => {
                    self.report.postcodes.states.insert(tag.value.clone());
                }
                _ => {}
            }

            if tag.key.contains("amenity") {
                *self
                    .report
                    .amenities
                    .entry(tag.value.clone())
                    .or_default() += 1;
            }
        }
    }

    fn observe_street(&mut self, street: &str) {
        if let Some(ending) = STREET_TYPE_RE.find(street) {
            let ending = ending.as_str();
            if !FULL_STREET_NAMES.contains(&ending) {
                *self
                    .report
                    .street_types
                    .entry(ending.to_string())
                    .or_default() += 1;
            }
        }
    }

    #[must_use]
    pub fn finish(self) -> AuditReport {
        self.report
    }
}

/// Audit a sequence of raw elements.
///
/// # Examples
/// ```
/// use osm_shaper::audit::audit;
/// use osm_shaper::types::{ElementKind, RawElement};
///
/// let elements = vec![
///     RawElement::new(ElementKind::Point).with_tag("addr:street", "Lake St"),
///     RawElement::new(ElementKind::Way).with_tag("addr:street", "Nicollet Avenue"),
/// ];
/// let report = audit(&elements);
/// assert_eq!(report.street_types.get("St"), Some(&1));
/// assert!(!report.street_types.contains_key("Avenue"));
/// ```
pub fn audit<'a>(elements: impl IntoIterator<Item = &'a RawElement>) -> AuditReport {
    let mut auditor = Auditor::new();
    for element in elements {
        auditor.observe(element);
    }
    auditor.finish()
}

/// The `n` most frequent entries, most frequent first, ties by name.
#[must_use]
pub fn top_n(counts: &BTreeMap<String, usize>, n: usize) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(n);
    entries
}
