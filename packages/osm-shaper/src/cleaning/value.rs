//! Scalar value cleaning for non-namespaced tags.

use crate::config::{has_problem_chars, VALUE_CORRECTIONS};

/// Clean the value of a non-namespaced tag.
///
/// Values containing a problem character or a colon were most likely entered
/// inconsistently with OSM conventions and are rejected. Known misspellings
/// are corrected; everything else passes through unchanged.
///
/// # Returns
/// * `Some(value)` with the cleaned value
/// * `None` if the value is rejected
///
/// # Examples
/// ```
/// use osm_shaper::cleaning::clean_value;
///
/// assert_eq!(clean_value("CHURCH").as_deref(), Some("place_of_worship"));
/// assert_eq!(clean_value("cafe").as_deref(), Some("cafe"));
/// assert_eq!(clean_value("fast.food"), None);
/// ```
pub fn clean_value(value: &str) -> Option<String> {
    if has_problem_chars(value) || value.contains(':') {
        return None;
    }

    let corrected = VALUE_CORRECTIONS
        .iter()
        .find(|(raw, _)| *raw == value)
        .map_or(value, |(_, fixed)| fixed);

    Some(corrected.to_string())
}
