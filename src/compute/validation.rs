//! Validation for polygon vertices and other geographic input.
//!
//! Points follow the `geo` convention: x is longitude, y is latitude.

use crate::error::{GeoTilingError, Result};
use geo::{Coord, Point};

/// Validates a point lies on the globe without wrapping or clipping.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use geotiling::compute::validation::validate_geographic_point;
/// use geo::Point;
///
/// let zurich = Point::new(8.5417, 47.3769);
/// assert!(validate_geographic_point(&zurich).is_ok());
///
/// // Longitude beyond the antimeridian
/// assert!(validate_geographic_point(&Point::new(181.0, 47.0)).is_err());
///
/// // Latitude beyond the pole
/// assert!(validate_geographic_point(&Point::new(8.5, -90.5)).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (lng, lat) = (point.x(), point.y());

    if !lng.is_finite() || !lat.is_finite() {
        return Err(GeoTilingError::InvalidCoordinate(format!(
            "Coordinates must be finite, got: ({}, {})",
            lat, lng
        )));
    }

    if !(-180.0..=180.0).contains(&lng) {
        return Err(GeoTilingError::InvalidCoordinate(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lng
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeoTilingError::InvalidCoordinate(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    Ok(())
}

/// Keeps the coordinates that pass [`validate_geographic_point`], in order.
///
/// ```
/// use geotiling::compute::validation::retain_geographic;
/// use geo::Coord;
///
/// let coords = [
///     Coord { x: 1.0, y: 1.0 },
///     Coord { x: 1.0, y: f64::NAN },
///     Coord { x: 200.0, y: 1.0 },
///     Coord { x: 2.0, y: 2.0 },
/// ];
/// assert_eq!(retain_geographic(coords).len(), 2);
/// ```
pub fn retain_geographic<I>(coords: I) -> Vec<Coord>
where
    I: IntoIterator<Item = Coord>,
{
    coords
        .into_iter()
        .filter(|coord| match validate_geographic_point(&Point::from(*coord)) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Discarding vertex: {}", e);
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_geographic_point() {
        assert!(validate_geographic_point(&Point::new(8.5417, 47.3769)).is_ok());
        assert!(validate_geographic_point(&Point::new(-58.3816, -34.6037)).is_ok());

        // Bounds are inclusive
        assert!(validate_geographic_point(&Point::new(180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(-180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, 90.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, -90.0)).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert!(validate_geographic_point(&Point::new(180.1, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-200.0, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, 90.1)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, -95.0)).is_err());
    }

    #[test]
    fn test_non_finite_coordinates() {
        for point in [
            Point::new(f64::NAN, 40.0),
            Point::new(-74.0, f64::NAN),
            Point::new(f64::INFINITY, 40.0),
            Point::new(-74.0, f64::NEG_INFINITY),
        ] {
            assert!(matches!(
                validate_geographic_point(&point),
                Err(GeoTilingError::InvalidCoordinate(_))
            ));
        }
    }

    #[test]
    fn test_retain_geographic_keeps_order() {
        let kept = retain_geographic([
            Coord { x: 3.0, y: 1.0 },
            Coord { x: f64::INFINITY, y: 1.0 },
            Coord { x: 1.0, y: 3.0 },
        ]);
        assert_eq!(kept, vec![Coord { x: 3.0, y: 1.0 }, Coord { x: 1.0, y: 3.0 }]);
    }
}
