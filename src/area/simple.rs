use crate::area::TileArea;
use crate::tile::Tile;
use geotiling_types::size::TileSize;

/// Flat tile accumulator without merging.
///
/// Containment checks scan every stored tile, so this is mainly a baseline
/// for comparing against [`MergingTileArea`](crate::area::MergingTileArea).
#[derive(Debug, Clone, Default)]
pub struct SimpleTileArea {
    tiles: Vec<Tile>,
    smallest_tile_size: Option<TileSize>,
}

impl SimpleTileArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

impl TileArea for SimpleTileArea {
    fn covering_tiles(&self) -> Vec<Tile> {
        self.tiles.clone()
    }

    fn contains(&self, tile: &Tile) -> bool {
        self.tiles.iter().any(|member| member.contains(tile))
    }

    fn smallest_tile_size(&self) -> Option<TileSize> {
        self.smallest_tile_size
    }

    fn add(&mut self, tile: Tile) {
        if self.contains(&tile) {
            return;
        }
        self.smallest_tile_size = self.smallest_tile_size.max(Some(tile.size()));
        self.tiles.retain(|member| !tile.contains(member));
        self.tiles.push(tile);
    }

    fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl FromIterator<Tile> for SimpleTileArea {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut area = Self::new();
        for tile in iter {
            area.add(tile);
        }
        area
    }
}
