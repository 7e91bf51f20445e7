//! Configuration constants, lookup tables and input validation.
//!
//! All tables are process-wide and read-only. The ones that need hashing are
//! built once on first use through `LazyLock`.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ShaperError};

/// Two-letter code every accepted `addr:state` is rewritten to.
pub const REGION_STATE_CODE: &str = "MN";

/// Namespace prefix of address tags (`addr:street`).
pub const ADDRESS_NAMESPACE: &str = "addr";

/// Namespace prefix of Metropolitan Council tags, stored as `organization_data`.
pub const ORGANIZATION_NAMESPACE: &str = "metcouncil";

/// Element attributes describing who edited an element and when.
pub const PROVENANCE_FIELDS: [&str; 5] = ["version", "changeset", "timestamp", "user", "uid"];

/// Attributes holding the coordinates of a node.
pub const COORDINATE_FIELDS: [&str; 2] = ["lat", "lon"];

/// Field names owned by the document itself. Flat fields may not reuse them.
pub const RESERVED_FIELDS: [&str; 6] = [
    "type",
    "position",
    "address",
    "organization_data",
    "member_refs",
    "provenance",
];

/// Exact-match fixes for known misspelled or miscapitalized tag values.
pub const VALUE_CORRECTIONS: &[(&str, &str)] = &[
    ("CHURCH", "place_of_worship"),
    ("parking_enterance", "parking_entrance"),
];

/// Street-name abbreviations and the word each expands to.
pub const STREET_ABBREVIATIONS: &[(&str, &str)] = &[
    ("n", "North"),
    ("s", "South"),
    ("e", "East"),
    ("w", "West"),
    ("ne", "Northeast"),
    ("nw", "Northwest"),
    ("se", "Southeast"),
    ("sw", "Southwest"),
    ("ave", "Avenue"),
    ("av", "Avenue"),
    ("blvd", "Boulevard"),
    ("ct", "Court"),
    ("dr", "Drive"),
    ("ln", "Lane"),
    ("pkwy", "Parkway"),
    ("pl", "Place"),
    ("rd", "Road"),
    ("st", "Street"),
    ("trl", "Trail"),
    ("ter", "Terrace"),
    ("terr", "Terrace"),
];

/// Street endings that need no auditing.
pub const FULL_STREET_NAMES: [&str; 14] = [
    "Street", "Avenue", "Boulevard", "Drive", "Court", "Place", "Square", "Lane", "Road", "Trail",
    "Parkway", "Commons", "Mall", "Terrace",
];

/// Accepted `addr:city` spellings and the spelling stored for each.
pub const CITY_SPELLINGS: &[(&str, &str)] = &[
    ("Minneapolis", "Minneapolis"),
    ("Minneapolis, MN", "Minneapolis"),
    ("Saint Paul", "Saint Paul"),
    ("St. Paul", "Saint Paul"),
    ("Golden Valley", "Golden Valley"),
    ("Saint Anthony", "Saint Anthony"),
    ("Richfield", "Richfield"),
    ("Edina", "Edina"),
    ("Saint Louis Park", "Saint Louis Park"),
    ("St. Louis Park", "Saint Louis Park"),
    ("Columbia Heights", "Columbia Heights"),
    ("Robbinsdale", "Robbinsdale"),
    ("Fort Snelling", "Fort Snelling"),
];

/// Characters that mark a key or value as malformed.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PROBLEM_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[=+/&<>;'"?%#$@,.{}\t\r\n]"#).expect("valid regex"));

/// In-region five-digit postcodes: 55401-55409 plus 55410-55489.
pub static REGION_POSTCODES: LazyLock<HashSet<String>> = LazyLock::new(|| {
    (1..10)
        .map(|n| format!("5540{n}"))
        .chain((10..=89).map(|n| format!("554{n}")))
        .collect()
});

pub(crate) static STREET_ABBREVIATION_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| STREET_ABBREVIATIONS.iter().copied().collect());

pub(crate) static CITY_SPELLING_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| CITY_SPELLINGS.iter().copied().collect());

/// Check whether a key or value contains any problem character.
///
/// # Examples
/// ```
/// use osm_shaper::config::has_problem_chars;
///
/// assert!(has_problem_chars("fast;food"));
/// assert!(!has_problem_chars("fast_food"));
/// assert!(has_problem_chars("a.b"));
/// ```
pub fn has_problem_chars(text: &str) -> bool {
    PROBLEM_CHARS.is_match(text)
}

/// Check whether a five-digit postcode lies inside the region.
pub fn is_region_postcode(code: &str) -> bool {
    REGION_POSTCODES.contains(code)
}

/// Check whether a field name is reserved for the document structure.
pub fn is_reserved_field(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

/// Validate that an input path names an existing regular file.
///
/// # Returns
/// * `Ok(())` if the path is a file
/// * `Err(ShaperError::InputNotFound)` / `Err(ShaperError::InputNotAFile)` otherwise
pub fn validate_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ShaperError::InputNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ShaperError::InputNotAFile(path.to_path_buf()));
    }
    Ok(())
}

/// Output path used when none is given: the input with a `.json` extension.
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
/// use osm_shaper::config::default_output_path;
///
/// assert_eq!(
///     default_output_path(Path::new("data/minneapolis.osm")),
///     PathBuf::from("data/minneapolis.json")
/// );
/// ```
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("json")
}
