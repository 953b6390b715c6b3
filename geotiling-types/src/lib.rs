//! # geotiling-types
//!
//! Core data types shared by the geotiling crate:
//!
//! - **Tile sizes**: `TileSize`, the five fixed resolutions of the tile hierarchy
//! - **Code areas**: `CodeArea`, the decoded bounding box of a location code
//!
//! All types are serializable with Serde and convert into the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use geotiling_types::size::TileSize;
//!
//! let size = TileSize::District;
//! assert_eq!(size.address_length(), 6);
//! assert_eq!(size.parent(), Some(TileSize::Region));
//! ```

pub mod area;
pub mod size;
