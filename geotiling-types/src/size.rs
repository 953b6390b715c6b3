use serde::{Deserialize, Serialize};
use std::fmt;

/// The five fixed resolutions of the tile hierarchy.
///
/// Each level divides its parent's cell into a 20×20 sub-grid: one base-20
/// digit is added for latitude and one for longitude, so consecutive levels'
/// address lengths differ by exactly two characters.
///
/// Sizes are ordered from coarsest to finest, so `TileSize::Global` is the
/// smallest value and `TileSize::Pinpoint` the largest.
///
/// # Examples
///
/// ```
/// use geotiling_types::size::TileSize;
///
/// assert!(TileSize::Global < TileSize::Pinpoint);
/// assert_eq!(TileSize::Region.grid_increment(), 1.0);
/// assert_eq!(TileSize::from_address_length(8), Some(TileSize::Neighborhood));
/// assert_eq!(TileSize::from_address_length(7), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TileSize {
    /// 20° x 20°, up to roughly 2200km across. Addresses are 2 characters long.
    Global,
    /// 1° x 1°, up to roughly 110km across. Addresses are 4 characters long.
    Region,
    /// 0.05° x 0.05°, up to roughly 5.5km across. Addresses are 6 characters long.
    #[default]
    District,
    /// 0.0025° x 0.0025°, up to roughly 275m across. Addresses are 8 characters long.
    Neighborhood,
    /// 0.000125° x 0.000125°, up to roughly 14m across. Addresses are 10 characters long.
    Pinpoint,
}

impl TileSize {
    /// All sizes, coarsest first.
    pub const ALL: [TileSize; 5] = [
        TileSize::Global,
        TileSize::Region,
        TileSize::District,
        TileSize::Neighborhood,
        TileSize::Pinpoint,
    ];

    /// Number of characters in the address of a tile of this size.
    pub const fn address_length(self) -> usize {
        match self {
            TileSize::Global => 2,
            TileSize::Region => 4,
            TileSize::District => 6,
            TileSize::Neighborhood => 8,
            TileSize::Pinpoint => 10,
        }
    }

    /// Edge length of a tile of this size, in degrees.
    pub const fn grid_increment(self) -> f64 {
        match self {
            TileSize::Global => 20.0,
            TileSize::Region => 1.0,
            TileSize::District => 0.05,
            TileSize::Neighborhood => 0.0025,
            TileSize::Pinpoint => 0.000125,
        }
    }

    /// Zero-based depth in the hierarchy (`Global` is 0).
    pub const fn level(self) -> usize {
        self.address_length() / 2 - 1
    }

    /// The size whose addresses have exactly `length` characters.
    pub fn from_address_length(length: usize) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.address_length() == length)
    }

    /// The next coarser size, if any.
    pub fn parent(self) -> Option<Self> {
        self.level().checked_sub(1).map(|level| Self::ALL[level])
    }

    /// The next finer size, if any.
    pub fn child(self) -> Option<Self> {
        Self::ALL.get(self.level() + 1).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            TileSize::Global => "global",
            TileSize::Region => "region",
            TileSize::District => "district",
            TileSize::Neighborhood => "neighborhood",
            TileSize::Pinpoint => "pinpoint",
        }
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
