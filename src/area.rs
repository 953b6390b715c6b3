//! Tile areas: sets of tiles of possibly mixed sizes.
//!
//! This module provides a trait-based abstraction over tile collections:
//! - `MergingTileArea`: collapses complete sibling groups into their parent tile
//! - `SimpleTileArea`: flat accumulator without merging

mod merging;
mod simple;

pub use merging::{MAX_MERGE_THRESHOLD, MIN_MERGE_THRESHOLD, MergingTileArea};
pub use simple::SimpleTileArea;

use crate::error::Result;
use crate::tile::Tile;
use geotiling_types::size::TileSize;

/// Trait for tile area implementations
///
/// An area never stores a tile together with one of its ancestors: adding a
/// tile that is already covered is a no-op.
pub trait TileArea: Send + Sync {
    /// All tiles making up the area, in no particular order
    fn covering_tiles(&self) -> Vec<Tile>;

    /// Check whether the tile lies completely within the area
    fn contains(&self, tile: &Tile) -> bool;

    /// The finest size of any tile ever added, `None` while nothing was added
    fn smallest_tile_size(&self) -> Option<TileSize>;

    /// Add a tile to the area
    fn add(&mut self, tile: Tile);

    /// Add every tile of another area
    fn add_area(&mut self, other: &dyn TileArea) {
        for tile in other.covering_tiles() {
            self.add(tile);
        }
    }

    /// Check whether a location lies within the area.
    ///
    /// The location is resolved at the finest tile size added so far, so the
    /// answer is exact for areas built from tiles. Non-finite input is never
    /// contained.
    fn contains_point(&self, latitude: f64, longitude: f64) -> bool {
        let Some(size) = self.smallest_tile_size() else {
            return false;
        };
        Tile::new(latitude, longitude, size)
            .map(|tile| self.contains(&tile))
            .unwrap_or(false)
    }

    /// Check whether the tile identified by a full location code lies within the area
    fn contains_code(&self, code: &str) -> Result<bool> {
        let tile = Tile::from_code(code)?;
        Ok(self.contains(&tile))
    }

    fn is_empty(&self) -> bool {
        self.covering_tiles().is_empty()
    }
}
