//! Hierarchical geographic tiling on top of Open Location Code.
//!
//! Tiles are the cells addressed by the leading digit pairs of a location
//! code, at five fixed sizes from 20° down to 0.000125°. Tile areas collect
//! tiles of mixed sizes and merge complete sibling groups into their parent;
//! the polygon rasterizer fills arbitrary polygons with tiles.
//!
//! ```rust
//! use geotiling::{PolygonRasterizer, Tile, TileArea, TileSize};
//! use geo::Point;
//!
//! let tile = Tile::new(47.3769, 8.5417, TileSize::District)?;
//! assert_eq!(tile.neighbors().len(), 8);
//!
//! let outline = [
//!     Point::new(8.50, 47.35),
//!     Point::new(8.60, 47.35),
//!     Point::new(8.60, 47.40),
//!     Point::new(8.50, 47.40),
//! ];
//! let area = PolygonRasterizer::new()
//!     .precision(TileSize::Neighborhood)
//!     .rasterize(&outline)?;
//! assert!(area.contains(&tile));
//! assert!(!area.contains_point(47.45, 8.55));
//! # Ok::<(), geotiling::GeoTilingError>(())
//! ```

pub mod area;
pub mod codec;
pub mod compute;
pub mod config;
pub mod error;
pub mod raster;
pub mod tile;

pub use area::{MergingTileArea, SimpleTileArea, TileArea};
pub use config::Config;
pub use error::{GeoTilingError, Result};
pub use raster::{PolygonRasterizer, rasterize};
pub use tile::{Neighbors, Tile};

pub use geotiling_types::area::CodeArea;
pub use geotiling_types::size::TileSize;

pub use geo::{Point, Polygon, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GeoTilingError, Result};

    pub use crate::{CodeArea, Tile, TileSize};

    pub use crate::{MergingTileArea, SimpleTileArea, TileArea};

    pub use crate::{Config, PolygonRasterizer, rasterize};

    pub use geo::{Point, Polygon, Rect};
}
