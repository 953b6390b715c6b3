//! Tile area that merges complete sibling groups into their parent tile.

use crate::area::TileArea;
use crate::config::Config;
use crate::tile::Tile;
use geotiling_types::size::TileSize;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Group key of global tiles, which have no parent address.
const GLOBAL_KEY: &str = "";

/// Fewer would snowball every addition into a global tile.
pub const MIN_MERGE_THRESHOLD: usize = 2;
/// Number of subtiles making up one tile.
pub const MAX_MERGE_THRESHOLD: usize = 400;

/// Tile area that replaces groups of sibling tiles by their parent.
///
/// Tiles are filed by parent address. Once a group reaches the merge threshold
/// it is dropped and its parent is added in its place, which may in turn
/// complete the parent's own group. With the default threshold of 400 the
/// covered surface never changes; lower thresholds trade precision for fewer
/// tiles.
///
/// ```rust
/// use geotiling::{MergingTileArea, Tile, TileArea, TileSize};
///
/// let mut area = MergingTileArea::new();
/// for child in Tile::from_address("8CFF")?.children() {
///     area.add(child);
/// }
///
/// assert_eq!(area.covering_tiles(), vec![Tile::from_address("8CFF")?]);
/// assert_eq!(area.smallest_tile_size(), Some(TileSize::District));
/// # Ok::<(), geotiling::GeoTilingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MergingTileArea {
    groups: FxHashMap<String, Vec<Tile>>,
    smallest_tile_size: Option<TileSize>,
    merge_threshold: usize,
    max_merged_size: Option<TileSize>,
}

impl MergingTileArea {
    /// Area merging only complete groups, up to global tiles.
    pub fn new() -> Self {
        Self {
            groups: FxHashMap::default(),
            smallest_tile_size: None,
            merge_threshold: MAX_MERGE_THRESHOLD,
            max_merged_size: None,
        }
    }

    /// Merge groups once they hold `threshold` tiles, clamped to [2, 400].
    pub fn with_merge_threshold(mut self, threshold: usize) -> Self {
        let clamped = threshold.clamp(MIN_MERGE_THRESHOLD, MAX_MERGE_THRESHOLD);
        if clamped != threshold {
            log::warn!(
                "Merge threshold {} outside [{}, {}], using {}",
                threshold,
                MIN_MERGE_THRESHOLD,
                MAX_MERGE_THRESHOLD,
                clamped
            );
        }
        self.merge_threshold = clamped;
        self
    }

    /// Never merge groups of tiles at or coarser than `size`.
    pub fn with_max_merged_size(mut self, size: TileSize) -> Self {
        self.max_merged_size = Some(size);
        self
    }

    pub fn with_options(threshold: usize, max_merged_size: Option<TileSize>) -> Self {
        let mut area = Self::new().with_merge_threshold(threshold);
        area.max_merged_size = max_merged_size;
        area
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_options(config.merge_threshold, config.max_merged_size)
    }

    /// Area built with default options from the given tiles.
    pub fn from_tiles<I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = Tile>,
    {
        let mut area = Self::new();
        area.extend(tiles);
        area
    }

    pub fn merge_threshold(&self) -> usize {
        self.merge_threshold
    }

    pub fn max_merged_size(&self) -> Option<TileSize> {
        self.max_merged_size
    }

    /// Number of stored tiles.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.groups.values().flatten()
    }

    /// Number of stored tiles per size, coarsest first.
    pub fn tile_count_by_size(&self) -> BTreeMap<TileSize, usize> {
        let mut counts = BTreeMap::new();
        for tile in self.iter() {
            *counts.entry(tile.size()).or_insert(0) += 1;
        }
        counts
    }

    fn should_merge(&self, key: &str, siblings: usize, candidate: &Tile) -> bool {
        if key == GLOBAL_KEY || siblings + 1 < self.merge_threshold {
            return false;
        }
        match self.max_merged_size {
            Some(max) => candidate.size() > max,
            None => true,
        }
    }

    /// Drop stored tiles lying inside `tile`.
    fn prune_descendants(&mut self, tile: &Tile) {
        let before = self.groups.len();
        self.groups.retain(|key, _| !key.starts_with(tile.address()));
        let pruned = before - self.groups.len();
        if pruned > 0 {
            log::trace!("Pruned {} groups inside {}", pruned, tile);
        }
    }

    fn add_uncovered(&mut self, tile: Tile) {
        let mut candidate = tile;
        // Finest size whose tiles inside the candidate are already gone.
        let mut cleared = candidate.size();
        loop {
            if self
                .smallest_tile_size
                .is_some_and(|smallest| smallest > cleared)
            {
                self.prune_descendants(&candidate);
            }

            let key = candidate.address_prefix().to_owned();
            let siblings = self.groups.get(&key).map_or(0, Vec::len);

            if !self.should_merge(&key, siblings, &candidate) {
                self.groups.entry(key).or_default().push(candidate);
                return;
            }

            self.groups.remove(&key);
            let Some(parent) = candidate.parent() else {
                return;
            };
            log::trace!("Merged {} tiles into {}", siblings + 1, parent);
            cleared = candidate.size();
            candidate = parent;
        }
    }
}

impl Default for MergingTileArea {
    fn default() -> Self {
        Self::new()
    }
}

impl TileArea for MergingTileArea {
    fn covering_tiles(&self) -> Vec<Tile> {
        self.iter().cloned().collect()
    }

    /// Only groups filed under one of the tile's ancestor addresses can hold a
    /// tile containing it, so those are the only ones checked.
    fn contains(&self, tile: &Tile) -> bool {
        let mut prefix = tile.address();
        while !prefix.is_empty() {
            prefix = &prefix[..prefix.len() - 2];
            if let Some(group) = self.groups.get(prefix)
                && group.iter().any(|member| member.contains(tile))
            {
                return true;
            }
        }
        false
    }

    fn smallest_tile_size(&self) -> Option<TileSize> {
        self.smallest_tile_size
    }

    fn add(&mut self, tile: Tile) {
        if self.contains(&tile) {
            return;
        }
        self.smallest_tile_size = self.smallest_tile_size.max(Some(tile.size()));
        self.add_uncovered(tile);
    }

    fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Extend<Tile> for MergingTileArea {
    fn extend<I: IntoIterator<Item = Tile>>(&mut self, iter: I) {
        for tile in iter {
            self.add(tile);
        }
    }
}

impl FromIterator<Tile> for MergingTileArea {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Self::from_tiles(iter)
    }
}
