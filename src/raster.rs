//! Polygon rasterization into tile areas.
//!
//! Polygons are filled with scanlines one tile apart: every scanline is
//! intersected with the polygon edges, crossings are paired up even-odd and
//! the tiles between each pair are added to a [`MergingTileArea`].
//!
//! ```rust
//! use geotiling::{PolygonRasterizer, TileArea, TileSize};
//! use geo::Point;
//!
//! let square = [
//!     Point::new(8.0, 47.0),
//!     Point::new(8.5, 47.0),
//!     Point::new(8.5, 47.5),
//!     Point::new(8.0, 47.5),
//! ];
//!
//! let area = PolygonRasterizer::new()
//!     .precision(TileSize::District)
//!     .rasterize(&square)?;
//!
//! assert!(area.contains_point(47.25, 8.25));
//! assert!(!area.contains_point(47.75, 8.25));
//! # Ok::<(), geotiling::GeoTilingError>(())
//! ```

use crate::area::{MAX_MERGE_THRESHOLD, MergingTileArea, TileArea};
use crate::compute::validation::retain_geographic;
use crate::config::Config;
use crate::error::{GeoTilingError, Result};
use crate::tile::Tile;
use geo::{Coord, Point, Polygon};
use geotiling_types::size::TileSize;

const MIN_RING_VERTICES: usize = 3;

/// Rasterizes polygons into merging tile areas.
///
/// Vertices are `geo` points, so x is longitude and y is latitude. Vertices
/// outside the valid coordinate range are dropped before rasterizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonRasterizer {
    precision: TileSize,
    max_merged_size: Option<TileSize>,
    merge_threshold: usize,
}

impl PolygonRasterizer {
    /// Rasterizer producing district tiles, merged without limit.
    pub fn new() -> Self {
        Self {
            precision: TileSize::District,
            max_merged_size: None,
            merge_threshold: MAX_MERGE_THRESHOLD,
        }
    }

    /// Build a rasterizer from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate().map_err(GeoTilingError::InvalidConfig)?;
        Ok(Self {
            precision: config.precision,
            max_merged_size: config.max_merged_size,
            merge_threshold: config.merge_threshold,
        })
    }

    /// Set the size of the tiles the polygon is filled with.
    pub fn precision(mut self, precision: TileSize) -> Self {
        self.precision = precision;
        self
    }

    /// Stop merging at tiles of this size.
    pub fn max_merged_size(mut self, size: TileSize) -> Self {
        self.max_merged_size = Some(size);
        self
    }

    /// Set the sibling count at which the result merges tiles, see
    /// [`MergingTileArea::with_merge_threshold`].
    pub fn merge_threshold(mut self, threshold: usize) -> Self {
        self.merge_threshold = threshold;
        self
    }

    /// Rasterize the polygon outlined by `vertices`. The ring is closed implicitly.
    pub fn rasterize(&self, vertices: &[Point]) -> Result<MergingTileArea> {
        let ring = usable_ring(vertices.iter().map(|p| p.0));
        if ring.len() < MIN_RING_VERTICES {
            return Err(GeoTilingError::InvalidPolygon(format!(
                "Need at least {} valid vertices, got {} of {}",
                MIN_RING_VERTICES,
                ring.len(),
                vertices.len()
            )));
        }
        Ok(self.fill(&[ring]))
    }

    /// Rasterize a polygon including its holes, which are left uncovered.
    ///
    /// Holes with fewer than three valid vertices are ignored.
    pub fn rasterize_polygon(&self, polygon: &Polygon) -> Result<MergingTileArea> {
        let exterior = usable_ring(polygon.exterior().coords().copied());
        if exterior.len() < MIN_RING_VERTICES {
            return Err(GeoTilingError::InvalidPolygon(format!(
                "Exterior ring needs at least {} valid vertices, got {}",
                MIN_RING_VERTICES,
                exterior.len()
            )));
        }

        let mut rings = vec![exterior];
        for (idx, interior) in polygon.interiors().iter().enumerate() {
            let hole = usable_ring(interior.coords().copied());
            if hole.len() < MIN_RING_VERTICES {
                log::debug!("Ignoring degenerate hole {} ({} vertices)", idx, hole.len());
                continue;
            }
            rings.push(hole);
        }

        Ok(self.fill(&rings))
    }

    fn fill(&self, rings: &[Vec<Coord>]) -> MergingTileArea {
        let mut area = MergingTileArea::with_options(self.merge_threshold, self.max_merged_size);
        let increment = self.precision.grid_increment();

        let edges: Vec<(Coord, Coord)> = rings.iter().flat_map(|ring| ring_edges(ring)).collect();
        let (min, max) = bounding_box(&rings[0]);

        // Snap to tile centers and pad by one tile so border tiles survive rounding.
        let low = Tile::clipped(min.y, min.x, self.precision).bounds();
        let high = Tile::clipped(max.y, max.x, self.precision).bounds();
        let min_lat = low.center_latitude() - increment;
        let max_lat = high.center_latitude() + increment;
        let min_lng = low.center_longitude() - increment;
        let max_lng = high.center_longitude() + increment;

        let mut crossings = Vec::with_capacity(edges.len());
        let mut scanlines = 0usize;
        for latitude in steps(min_lat, max_lat, increment) {
            scanlines += 1;

            crossings.clear();
            crossings.extend(edges.iter().filter_map(|(a, b)| crossing(a, b, latitude)));
            crossings.sort_by(f64::total_cmp);

            for span in crossings.chunks_exact(2) {
                let (left, right) = (span[0], span[1]);
                if left >= max_lng {
                    break;
                }
                if right <= min_lng {
                    continue;
                }

                for longitude in steps(left.max(min_lng), right.min(max_lng), increment) {
                    area.add(Tile::clipped(latitude, longitude, self.precision));
                }
            }
        }

        log::debug!(
            "Rasterized {} rings over {} scanlines at {} precision into {} tiles",
            rings.len(),
            scanlines,
            self.precision,
            area.len()
        );
        area
    }
}

impl Default for PolygonRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rasterize the polygon outlined by `vertices` into tiles of `precision`,
/// merging no further than `max_merged_size` when given.
///
/// ```rust
/// use geotiling::{TileArea, TileSize, rasterize};
/// use geo::Point;
///
/// let triangle = [Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, 2.0)];
/// let area = rasterize(&triangle, TileSize::Region, None)?;
/// assert!(area.contains_point(0.5, 0.5));
/// assert!(!area.contains_point(1.5, 1.5));
///
/// assert!(rasterize(&triangle[..2], TileSize::Region, None).is_err());
/// # Ok::<(), geotiling::GeoTilingError>(())
/// ```
pub fn rasterize(
    vertices: &[Point],
    precision: TileSize,
    max_merged_size: Option<TileSize>,
) -> Result<MergingTileArea> {
    let mut rasterizer = PolygonRasterizer::new().precision(precision);
    rasterizer.max_merged_size = max_merged_size;
    rasterizer.rasterize(vertices)
}

/// Valid vertices of a ring, without the closing duplicate of the first one.
fn usable_ring<I>(coords: I) -> Vec<Coord>
where
    I: IntoIterator<Item = Coord>,
{
    let mut ring = retain_geographic(coords);
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Edges of a ring, including the closing edge from the last vertex to the first.
fn ring_edges(ring: &[Coord]) -> impl Iterator<Item = (Coord, Coord)> + '_ {
    let previous = ring.iter().cycle().skip(ring.len() - 1);
    previous.zip(ring.iter()).map(|(a, b)| (*a, *b))
}

fn bounding_box(ring: &[Coord]) -> (Coord, Coord) {
    ring.iter().fold(
        (
            Coord {
                x: f64::INFINITY,
                y: f64::INFINITY,
            },
            Coord {
                x: f64::NEG_INFINITY,
                y: f64::NEG_INFINITY,
            },
        ),
        |(min, max), c| {
            (
                Coord {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coord {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )
        },
    )
}

/// Longitude where the edge crosses the scanline. Touching is not crossing.
fn crossing(a: &Coord, b: &Coord, latitude: f64) -> Option<f64> {
    let crosses = (a.y < latitude && b.y > latitude) || (a.y > latitude && b.y < latitude);
    crosses.then(|| a.x + (latitude - a.y) / (b.y - a.y) * (b.x - a.x))
}

/// `start`, `start + step`, ... up to but excluding `end`.
fn steps(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    (0u64..)
        .map(move |i| start + i as f64 * step)
        .take_while(move |value| *value < end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(south: f64, west: f64, north: f64, east: f64) -> Vec<Point> {
        vec![
            Point::new(west, south),
            Point::new(east, south),
            Point::new(east, north),
            Point::new(west, north),
        ]
    }

    #[test]
    fn test_steps_excludes_end() {
        let values: Vec<f64> = steps(0.0, 1.0, 0.25).collect();
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(steps(1.0, 1.0, 0.25).count(), 0);
    }

    #[test]
    fn test_crossing_is_strict() {
        let a = Coord { x: 0.0, y: 0.0 };
        let b = Coord { x: 2.0, y: 2.0 };
        assert_eq!(crossing(&a, &b, 1.0), Some(1.0));
        assert_eq!(crossing(&b, &a, 1.0), Some(1.0));
        assert_eq!(crossing(&a, &b, 0.0), None);
        assert_eq!(crossing(&a, &b, 2.0), None);

        let flat = Coord { x: 5.0, y: 0.0 };
        assert_eq!(crossing(&a, &flat, 0.0), None);
    }

    #[test]
    fn test_ring_edges_close_the_ring() {
        let ring = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 0.0, y: 1.0 },
        ];
        let edges: Vec<_> = ring_edges(&ring).collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0], (ring[2], ring[0]));
        assert_eq!(edges[2], (ring[1], ring[2]));
    }

    #[test]
    fn test_usable_ring_drops_closing_vertex() {
        let closed = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 0.0, y: 1.0 },
            Coord { x: 0.0, y: 0.0 },
        ];
        assert_eq!(usable_ring(closed).len(), 3);
    }

    #[test]
    fn test_too_few_vertices() {
        let result = rasterize(&square(0.0, 0.0, 1.0, 1.0)[..2], TileSize::District, None);
        assert!(matches!(result, Err(GeoTilingError::InvalidPolygon(_))));

        // Out-of-range vertices do not count.
        let mut vertices = square(0.0, 0.0, 1.0, 1.0);
        vertices[1] = Point::new(200.0, 0.0);
        vertices[2] = Point::new(f64::NAN, 1.0);
        let result = rasterize(&vertices, TileSize::District, None);
        assert!(matches!(result, Err(GeoTilingError::InvalidPolygon(_))));
    }

    #[test]
    fn test_single_region_square() {
        let area = rasterize(&square(47.0, 8.0, 48.0, 9.0), TileSize::District, None).unwrap();
        assert_eq!(area.covering_tiles(), vec![Tile::from_address("8FVC").unwrap()]);
    }

    #[test]
    fn test_polygon_hole_is_left_out() {
        let donut: Polygon = polygon!(
            exterior: [
                (x: 8.0, y: 47.0),
                (x: 9.0, y: 47.0),
                (x: 9.0, y: 48.0),
                (x: 8.0, y: 48.0),
            ],
            interiors: [
                [
                    (x: 8.4, y: 47.4),
                    (x: 8.6, y: 47.4),
                    (x: 8.6, y: 47.6),
                    (x: 8.4, y: 47.6),
                ],
            ],
        );

        let area = PolygonRasterizer::new().rasterize_polygon(&donut).unwrap();
        assert!(area.contains_point(47.2, 8.2));
        assert!(area.contains_point(47.8, 8.8));
        assert!(!area.contains_point(47.5, 8.5));
        assert!(!area.contains(&Tile::from_address("8FVC").unwrap()));
    }

    #[test]
    fn test_degenerate_hole_is_ignored() {
        let polygon: Polygon = polygon!(
            exterior: [
                (x: 8.0, y: 47.0),
                (x: 9.0, y: 47.0),
                (x: 9.0, y: 48.0),
                (x: 8.0, y: 48.0),
            ],
            interiors: [
                [
                    (x: 8.4, y: 47.4),
                    (x: 8.6, y: 47.6),
                ],
            ],
        );

        let area = PolygonRasterizer::new().rasterize_polygon(&polygon).unwrap();
        assert_eq!(area.len(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = Config::default()
            .with_precision(TileSize::Neighborhood)
            .with_max_merged_size(TileSize::District);
        let rasterizer = PolygonRasterizer::from_config(&config).unwrap();
        assert_eq!(
            rasterizer,
            PolygonRasterizer::new()
                .precision(TileSize::Neighborhood)
                .max_merged_size(TileSize::District)
        );

        let invalid = Config::default().with_merge_threshold(0);
        assert!(matches!(
            PolygonRasterizer::from_config(&invalid),
            Err(GeoTilingError::InvalidConfig(_))
        ));
    }
}
