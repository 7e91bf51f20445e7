//! Routing of namespaced tags (`ns:field`) into document sub-objects.

use std::fmt;

use super::street::normalize_street;
use crate::config::{
    is_region_postcode, ADDRESS_NAMESPACE, CITY_SPELLING_MAP, ORGANIZATION_NAMESPACE,
    REGION_STATE_CODE,
};

/// Where a namespaced tag ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subfield {
    /// Goes into the `address` sub-object.
    Address { field: String, value: String },
    /// Goes into the `organization_data` sub-object.
    Organization { field: String, value: String },
    /// Dropped. The rest of the element is unaffected.
    Rejected(SubfieldRejection),
}

/// Why a namespaced tag was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubfieldRejection {
    /// Key has no namespace, or one that is not kept.
    UnsupportedNamespace,
    /// Field name contains another colon (`addr:street:name`).
    NestedField,
    /// Nothing after the namespace colon (`addr:`).
    EmptyField,
    /// `addr:state` value that is skipped rather than rewritten.
    NonCanonicalState,
    /// `addr:postcode` that is malformed or outside the region.
    PostcodeOutOfRegion,
    /// `addr:city` that is not an accepted spelling.
    UnknownCity,
}

impl SubfieldRejection {
    /// Stable name for logs and statistics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedNamespace => "unsupported_namespace",
            Self::NestedField => "nested_field",
            Self::EmptyField => "empty_field",
            Self::NonCanonicalState => "non_canonical_state",
            Self::PostcodeOutOfRegion => "postcode_out_of_region",
            Self::UnknownCity => "unknown_city",
        }
    }
}

impl fmt::Display for SubfieldRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a namespaced tag and clean its value.
///
/// # Arguments
/// * `key` - Full tag key, e.g. `addr:postcode`
/// * `value` - Raw tag value
///
/// # Examples
/// ```
/// use osm_shaper::cleaning::{classify, Subfield, SubfieldRejection};
///
/// assert_eq!(
///     classify("addr:street", "Lake St"),
///     Subfield::Address { field: "street".into(), value: "Lake Street".into() }
/// );
/// assert_eq!(
///     classify("addr:postcode", "90210"),
///     Subfield::Rejected(SubfieldRejection::PostcodeOutOfRegion)
/// );
/// ```
pub fn classify(key: &str, value: &str) -> Subfield {
    let Some((namespace, field)) = key.split_once(':') else {
        return Subfield::Rejected(SubfieldRejection::UnsupportedNamespace);
    };

    match namespace {
        ADDRESS_NAMESPACE => classify_address(field, value),
        ORGANIZATION_NAMESPACE => match check_field_name(field) {
            Ok(()) => Subfield::Organization {
                field: field.to_string(),
                value: value.to_string(),
            },
            Err(reason) => Subfield::Rejected(reason),
        },
        _ => Subfield::Rejected(SubfieldRejection::UnsupportedNamespace),
    }
}

fn classify_address(field: &str, value: &str) -> Subfield {
    let cleaned = match field {
        "state" => clean_state(value),
        "postcode" => clean_postcode(value),
        "street" => Ok(normalize_street(value)),
        "city" => clean_city(value),
        _ => check_field_name(field).map(|()| value.to_string()),
    };

    match cleaned {
        Ok(value) => Subfield::Address {
            field: field.to_string(),
            value,
        },
        Err(reason) => Subfield::Rejected(reason),
    }
}

fn check_field_name(field: &str) -> Result<(), SubfieldRejection> {
    if field.is_empty() {
        Err(SubfieldRejection::EmptyField)
    } else if field.contains(':') {
        Err(SubfieldRejection::NestedField)
    } else {
        Ok(())
    }
}

/// Every state is rewritten to the region code, except values containing a
/// `w` (any case), which are dropped.
fn clean_state(value: &str) -> Result<String, SubfieldRejection> {
    if value.to_lowercase().contains('w') {
        Err(SubfieldRejection::NonCanonicalState)
    } else {
        Ok(REGION_STATE_CODE.to_string())
    }
}

/// Five-digit codes must be in the region set. Ten-digit codes keep their
/// six-digit prefix when that prefix is in the set.
fn clean_postcode(value: &str) -> Result<String, SubfieldRejection> {
    let all_digits = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
    if !all_digits {
        return Err(SubfieldRejection::PostcodeOutOfRegion);
    }

    match value.len() {
        5 if is_region_postcode(value) => Ok(value.to_string()),
        10 if is_region_postcode(&value[..6]) => Ok(value[..6].to_string()),
        _ => Err(SubfieldRejection::PostcodeOutOfRegion),
    }
}

fn clean_city(value: &str) -> Result<String, SubfieldRejection> {
    CITY_SPELLING_MAP
        .get(value)
        .map(|canonical| canonical.to_string())
        .ok_or(SubfieldRejection::UnknownCity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(field: &str, value: &str) -> Subfield {
        Subfield::Address {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    fn rejected(reason: SubfieldRejection) -> Subfield {
        Subfield::Rejected(reason)
    }

    #[test]
    fn test_classify_state_forced_to_region_code() {
        assert_eq!(classify("addr:state", "MN"), address("state", "MN"));
        assert_eq!(classify("addr:state", "Minnesota"), address("state", "MN"));
        assert_eq!(classify("addr:state", "mn."), address("state", "MN"));
    }

    #[test]
    fn test_classify_state_with_w_dropped() {
        assert_eq!(
            classify("addr:state", "West something"),
            rejected(SubfieldRejection::NonCanonicalState)
        );
        assert_eq!(
            classify("addr:state", "WI"),
            rejected(SubfieldRejection::NonCanonicalState)
        );
    }

    #[test]
    fn test_classify_postcode_five_digits() {
        assert_eq!(classify("addr:postcode", "55401"), address("postcode", "55401"));
        assert_eq!(classify("addr:postcode", "55488"), address("postcode", "55488"));
        assert_eq!(classify("addr:postcode", "55489"), address("postcode", "55489"));
        assert_eq!(
            classify("addr:postcode", "55490"),
            rejected(SubfieldRejection::PostcodeOutOfRegion)
        );
        assert_eq!(
            classify("addr:postcode", "55101"),
            rejected(SubfieldRejection::PostcodeOutOfRegion)
        );
    }

    #[test]
    fn test_classify_postcode_malformed() {
        for raw in ["", "5540", "55401-1234", "MN 55401", "554O1", "554011"] {
            assert_eq!(
                classify("addr:postcode", raw),
                rejected(SubfieldRejection::PostcodeOutOfRegion),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn test_classify_postcode_ten_digits_uses_six_digit_prefix() {
        // The region set only holds five-digit codes, so no six-digit prefix matches.
        assert_eq!(
            classify("addr:postcode", "5540112345"),
            rejected(SubfieldRejection::PostcodeOutOfRegion)
        );
    }

    #[test]
    fn test_classify_postcode_acceptance_rule() {
        for n in 0..100_000u32 {
            let code = format!("{n:05}");
            let accepted = !matches!(classify("addr:postcode", &code), Subfield::Rejected(_));
            assert_eq!(accepted, is_region_postcode(&code), "postcode {code}");
        }
    }

    #[test]
    fn test_classify_street_normalized() {
        assert_eq!(
            classify("addr:street", "E Hennepin Ave"),
            address("street", "East Hennepin Avenue")
        );
        assert_eq!(classify("addr:street", "Bob's Way"), address("street", "Bob's Way"));
    }

    #[test]
    fn test_classify_city() {
        assert_eq!(classify("addr:city", "Minneapolis"), address("city", "Minneapolis"));
        assert_eq!(
            classify("addr:city", "Minneapolis, MN"),
            address("city", "Minneapolis")
        );
        assert_eq!(classify("addr:city", "St. Paul"), address("city", "Saint Paul"));
        assert_eq!(classify("addr:city", "Edina"), address("city", "Edina"));
        assert_eq!(
            classify("addr:city", "minneapolis"),
            rejected(SubfieldRejection::UnknownCity)
        );
        assert_eq!(
            classify("addr:city", "Duluth"),
            rejected(SubfieldRejection::UnknownCity)
        );
    }

    #[test]
    fn test_classify_free_address_fields() {
        assert_eq!(
            classify("addr:housenumber", "1500"),
            address("housenumber", "1500")
        );
        assert_eq!(classify("addr:unit", "#4/B"), address("unit", "#4/B"));
    }

    #[test]
    fn test_classify_nested_fields_rejected() {
        assert_eq!(
            classify("addr:street:name", "Lake"),
            rejected(SubfieldRejection::NestedField)
        );
        assert_eq!(
            classify("addr:state:code", "MN"),
            rejected(SubfieldRejection::NestedField)
        );
        assert_eq!(
            classify("metcouncil:stop:id", "12"),
            rejected(SubfieldRejection::NestedField)
        );
        assert_eq!(classify("addr:", "x"), rejected(SubfieldRejection::EmptyField));
    }

    #[test]
    fn test_classify_organization() {
        assert_eq!(
            classify("metcouncil:site_on", "bus"),
            Subfield::Organization {
                field: "site_on".to_string(),
                value: "bus".to_string(),
            }
        );
        assert_eq!(
            classify("organization:site_on", "bus"),
            rejected(SubfieldRejection::UnsupportedNamespace)
        );
    }

    #[test]
    fn test_classify_other_namespaces_rejected() {
        assert_eq!(
            classify("tiger:county", "Hennepin, MN"),
            rejected(SubfieldRejection::UnsupportedNamespace)
        );
        assert_eq!(
            classify("address:street", "Lake St"),
            rejected(SubfieldRejection::UnsupportedNamespace)
        );
        assert_eq!(
            classify("amenity", "cafe"),
            rejected(SubfieldRejection::UnsupportedNamespace)
        );
    }

    #[test]
    fn test_rejection_display() {
        assert_eq!(SubfieldRejection::UnknownCity.to_string(), "unknown_city");
    }
}
