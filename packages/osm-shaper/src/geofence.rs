//! Bounding-rectangle geofence for the accepted region.

/// Axis-aligned latitude/longitude rectangle. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Rectangle around the Minneapolis city limits.
    pub const MINNEAPOLIS: Self = Self {
        min_lat: 44.889787,
        max_lat: 45.05125,
        min_lon: -93.329437,
        max_lon: -93.193794,
    };

    /// Check whether a coordinate lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// Check whether a coordinate lies inside the accepted region.
///
/// # Examples
/// ```
/// use osm_shaper::geofence::in_region;
///
/// assert!(in_region(44.9778, -93.2650));
/// assert!(!in_region(44.9537, -93.0900)); // Saint Paul
/// ```
#[must_use]
pub fn in_region(lat: f64, lon: f64) -> bool {
    BoundingBox::MINNEAPOLIS.contains(lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_region_corners_inclusive() {
        assert!(in_region(45.05125, -93.193794));
        assert!(in_region(44.889787, -93.329437));
        assert!(in_region(45.05125, -93.329437));
        assert!(in_region(44.889787, -93.193794));
    }

    #[test]
    fn test_in_region_just_outside() {
        assert!(!in_region(45.05126, -93.193794));
        assert!(!in_region(44.889786, -93.25));
        assert!(!in_region(45.0, -93.193793));
        assert!(!in_region(45.0, -93.329438));
    }

    #[test]
    fn test_in_region_far_away() {
        assert!(!in_region(44.5, -93.25));
        assert!(!in_region(0.0, 0.0));
        assert!(!in_region(-93.25, 45.0)); // swapped
    }

    #[test]
    fn test_in_region_nan() {
        assert!(!in_region(f64::NAN, -93.25));
        assert!(!in_region(45.0, f64::NAN));
    }

    #[test]
    fn test_custom_bounding_box() {
        let unit = BoundingBox {
            min_lat: 0.0,
            max_lat: 1.0,
            min_lon: 0.0,
            max_lon: 1.0,
        };
        assert!(unit.contains(0.5, 0.5));
        assert!(!unit.contains(1.5, 0.5));
    }
}
