use geo::{Coord, Point, Polygon, Rect};
use serde::{Deserialize, Serialize};

/// The bounding box of a decoded location code, in degrees.
///
/// The lower bounds are inclusive and the upper bounds exclusive, so adjacent
/// code areas never overlap.
///
/// # Examples
///
/// ```
/// use geotiling_types::area::CodeArea;
///
/// let area = CodeArea::new(10.0, 20.0, 11.0, 21.0, 4);
/// assert_eq!(area.center_latitude(), 10.5);
/// assert_eq!(area.center_longitude(), 20.5);
/// assert!(area.contains(10.2, 20.9));
/// assert!(!area.contains(11.0, 20.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CodeArea {
    /// Southern (minimum) latitude
    pub south: f64,
    /// Western (minimum) longitude
    pub west: f64,
    /// Northern (maximum) latitude
    pub north: f64,
    /// Eastern (maximum) longitude
    pub east: f64,
    /// Number of significant digits of the code this area was decoded from
    pub code_length: usize,
}

impl CodeArea {
    pub fn new(south: f64, west: f64, north: f64, east: f64, code_length: usize) -> Self {
        Self {
            south,
            west,
            north,
            east,
            code_length,
        }
    }

    /// Center latitude, never above the north pole.
    pub fn center_latitude(&self) -> f64 {
        (self.south + (self.north - self.south) / 2.0).min(90.0)
    }

    /// Center longitude, never beyond the antimeridian.
    pub fn center_longitude(&self) -> f64 {
        (self.west + (self.east - self.west) / 2.0).min(180.0)
    }

    /// Center as a `geo::Point` (x = longitude, y = latitude).
    pub fn center(&self) -> Point<f64> {
        Point::new(self.center_longitude(), self.center_latitude())
    }

    pub fn latitude_height(&self) -> f64 {
        self.north - self.south
    }

    pub fn longitude_width(&self) -> f64 {
        self.east - self.west
    }

    /// Check whether a location falls inside this area (half-open bounds).
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.south..self.north).contains(&latitude) && (self.west..self.east).contains(&longitude)
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.west,
                y: self.south,
            },
            Coord {
                x: self.east,
                y: self.north,
            },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

impl From<CodeArea> for Rect<f64> {
    fn from(area: CodeArea) -> Self {
        area.to_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_clamped_at_poles() {
        let area = CodeArea::new(89.99, 179.99, 90.01, 180.01, 10);
        assert_eq!(area.center_latitude(), 90.0);
        assert_eq!(area.center_longitude(), 180.0);
    }

    #[test]
    fn test_rect_conversion_keeps_bounds() {
        let area = CodeArea::new(-10.0, 40.0, 10.0, 60.0, 2);
        let rect = area.to_rect();
        assert_eq!(rect.min(), Coord { x: 40.0, y: -10.0 });
        assert_eq!(rect.max(), Coord { x: 60.0, y: 10.0 });
        assert_eq!(area.to_polygon().exterior().0.len(), 5);
    }

    #[test]
    fn test_dimensions() {
        let area = CodeArea::new(1.0, 2.0, 1.05, 2.05, 6);
        assert!((area.latitude_height() - 0.05).abs() < 1e-12);
        assert!((area.longitude_width() - 0.05).abs() < 1e-12);
    }
}
