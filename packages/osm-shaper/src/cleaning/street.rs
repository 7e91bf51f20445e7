//! Street name normalization.

use crate::config::STREET_ABBREVIATION_MAP;

/// Expand directional and street-type abbreviations in a street name.
///
/// The name is split on single spaces. Each token is lowercased and stripped
/// of one trailing period for lookup only; a token with no expansion is kept
/// exactly as written. This is best effort, not validation.
///
/// # Examples
/// ```
/// use osm_shaper::cleaning::normalize_street;
///
/// assert_eq!(normalize_street("123 main st"), "123 main Street");
/// assert_eq!(normalize_street("W Lake St."), "West Lake Street");
/// ```
pub fn normalize_street(value: &str) -> String {
    value
        .split(' ')
        .map(expand_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn expand_token(token: &str) -> &str {
    let lowered = token.to_lowercase();
    let key = lowered.strip_suffix('.').unwrap_or(&lowered);
    match STREET_ABBREVIATION_MAP.get(key) {
        Some(full) => full,
        None => token,
    }
}
