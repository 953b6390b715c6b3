//! Tiles: rectangular cells of the globe at one of five fixed sizes.
//!
//! A tile is identified by its address, the leading digits of the location
//! code of any point inside it. Because every digit pair subdivides the
//! parent cell 20×20, hierarchical containment reduces to prefix matching on
//! addresses and grid distances can be computed digit by digit.
//!
//! ```rust
//! use geotiling::{Tile, TileSize};
//!
//! let region = Tile::from_address("8CFF")?;
//! let district = Tile::from_address("8CFFXX")?;
//! assert!(region.contains(&district));
//!
//! let here = Tile::new(47.37, 8.54, TileSize::District)?;
//! assert_eq!(here.address().len(), 6);
//! # Ok::<(), geotiling::GeoTilingError>(())
//! ```

use crate::codec::{self, ALPHABET, PADDING_CHARACTER, SEPARATOR, SEPARATOR_POSITION};
use crate::error::{GeoTilingError, Result};
use geo::{Point, Polygon};
use geotiling_types::area::CodeArea;
use geotiling_types::size::TileSize;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

const ENCODING_BASE: i64 = 20;

/// Distinct first longitude digits in use: 360° split into 20° columns.
const FIRST_LONGITUDE_DIGITS: i64 = 18;

/// (latitude, longitude) steps to the 8 surrounding tiles, clockwise from north-west.
const NEIGHBOR_STEPS: [(f64, f64); 8] = [
    (1.0, -1.0),
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
    (-1.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
];

/// The surrounding tiles of a tile; at most 8.
pub type Neighbors = SmallVec<[Tile; 8]>;

/// An immutable cell of the globe at one of the five [`TileSize`]s.
///
/// Two tiles are equal iff their sizes and addresses are equal. Addresses are
/// stored upper case, so construction from `"8cff"` and `"8CFF"` yields the
/// same tile.
///
/// Serializes as its address string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tile {
    address: String,
    size: TileSize,
}

impl Tile {
    /// Create the tile of the given size containing a location.
    ///
    /// Latitude is clipped to the poles and longitude wrapped into [-180, 180).
    pub fn new(latitude: f64, longitude: f64, size: TileSize) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(GeoTilingError::InvalidCoordinate(format!(
                "Tile location must be finite, got: ({}, {})",
                latitude, longitude
            )));
        }
        Ok(Self::clipped(latitude, longitude, size))
    }

    /// Infallible construction for coordinates already known to be finite.
    pub(crate) fn clipped(latitude: f64, longitude: f64, size: TileSize) -> Self {
        Self {
            address: codec::encode_address(latitude, longitude, size.address_length()),
            size,
        }
    }

    /// Create a tile from its address; the size follows from the address length.
    ///
    /// ```rust
    /// use geotiling::{Tile, TileSize};
    ///
    /// let tile = Tile::from_address("CVXW")?;
    /// assert_eq!(tile.size(), TileSize::Region);
    /// assert_eq!(tile.tile_code(), "CVXW0000+");
    ///
    /// assert!(Tile::from_address("CVX").is_err());
    /// # Ok::<(), geotiling::GeoTilingError>(())
    /// ```
    pub fn from_address(address: &str) -> Result<Self> {
        let size = TileSize::from_address_length(address.len()).ok_or_else(|| {
            GeoTilingError::InvalidAddress(format!(
                "Tile address must be 2, 4, 6, 8 or 10 characters long, got: {:?}",
                address
            ))
        })?;

        if address.chars().any(|c| codec::digit_value(c).is_none()) {
            return Err(GeoTilingError::InvalidAddress(format!(
                "Tile address may only hold code digits, got: {:?}",
                address
            )));
        }

        let address = address.to_ascii_uppercase();
        if !codec::is_full(&pad_address(&address)) {
            return Err(GeoTilingError::InvalidAddress(format!(
                "{} is not a valid tile address",
                address
            )));
        }

        Ok(Self { address, size })
    }

    /// Create a tile from a full location code, inferring the size from the
    /// code's padding (or its digit count, capped at [`TileSize::Pinpoint`]).
    pub fn from_code(code: &str) -> Result<Self> {
        let digits = significant_digits(code)?;
        let length = digits.len().min(TileSize::Pinpoint.address_length());
        let size = TileSize::from_address_length(length).ok_or_else(|| {
            GeoTilingError::InvalidAddress(format!(
                "{} has no tile-sized digit count ({})",
                code, length
            ))
        })?;
        Self::from_digits(digits, size)
    }

    /// Create a tile of an explicit size from a full location code.
    ///
    /// Fails when the code is short or malformed, or when it is padded (or
    /// truncated) coarser than `size`.
    ///
    /// ```rust
    /// use geotiling::{Tile, TileSize};
    ///
    /// let tile = Tile::from_code_with_size("CCXWXWXW+XW", TileSize::District)?;
    /// assert_eq!(tile.address(), "CCXWXW");
    ///
    /// assert!(Tile::from_code_with_size("CCXW0000+", TileSize::District).is_err());
    /// # Ok::<(), geotiling::GeoTilingError>(())
    /// ```
    pub fn from_code_with_size(code: &str, size: TileSize) -> Result<Self> {
        let digits = significant_digits(code)?;
        if digits.len() < size.address_length() {
            return Err(GeoTilingError::InvalidAddress(format!(
                "{} has {} significant digits, {} tiles need {}",
                code,
                digits.len(),
                size,
                size.address_length()
            )));
        }
        Self::from_digits(digits, size)
    }

    fn from_digits(mut digits: String, size: TileSize) -> Result<Self> {
        digits.truncate(size.address_length());
        Ok(Self {
            address: digits,
            size,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn size(&self) -> TileSize {
        self.size
    }

    /// The address with its trailing digit pair removed; empty for global tiles.
    pub fn address_prefix(&self) -> &str {
        &self.address[..self.address.len() - 2]
    }

    /// The enclosing tile one size coarser, if any.
    pub fn parent(&self) -> Option<Tile> {
        let size = self.size.parent()?;
        Some(Self {
            address: self.address_prefix().to_owned(),
            size,
        })
    }

    /// The 400 tiles one size finer that make up this tile. Empty for pinpoint tiles.
    pub fn children(&self) -> Vec<Tile> {
        let Some(size) = self.size.child() else {
            return Vec::new();
        };

        let mut children = Vec::with_capacity(ALPHABET.len() * ALPHABET.len());
        for lat_digit in ALPHABET {
            for lng_digit in ALPHABET {
                let mut address = String::with_capacity(size.address_length());
                address.push_str(&self.address);
                address.push(*lat_digit as char);
                address.push(*lng_digit as char);
                children.push(Self { address, size });
            }
        }
        children
    }

    /// The full location code of the whole tile, padded as needed.
    ///
    /// ```rust
    /// use geotiling::Tile;
    ///
    /// assert_eq!(Tile::from_address("C9")?.tile_code(), "C9000000+");
    /// assert_eq!(Tile::from_address("8FVC9G8F6X")?.tile_code(), "8FVC9G8F+6X");
    /// # Ok::<(), geotiling::GeoTilingError>(())
    /// ```
    pub fn tile_code(&self) -> String {
        pad_address(&self.address)
    }

    /// Geographic bounds of the tile.
    pub fn bounds(&self) -> CodeArea {
        codec::decode_digits(&self.address)
    }

    /// Center of the tile (x = longitude, y = latitude).
    pub fn center(&self) -> Point<f64> {
        self.bounds().center()
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds().to_polygon()
    }

    /// The surrounding tiles of the same size.
    ///
    /// Typically 8. Near the poles, latitude clipping folds some candidates back
    /// onto this tile or onto each other; those are left out, so fewer tiles
    /// come back. Longitude wraps around the antimeridian.
    pub fn neighbors(&self) -> Neighbors {
        let delta = self.size.grid_increment();
        let bounds = self.bounds();
        let latitude = bounds.center_latitude();
        let longitude = bounds.center_longitude();

        let mut neighbors = Neighbors::new();
        for (lat_step, lng_step) in NEIGHBOR_STEPS {
            let candidate = Self::clipped(
                latitude + delta * lat_step,
                longitude + delta * lng_step,
                self.size,
            );
            if candidate != *self && !neighbors.contains(&candidate) {
                neighbors.push(candidate);
            }
        }
        neighbors
    }

    /// Check whether `other` lies within this tile, including `other == self`.
    pub fn contains(&self, other: &Tile) -> bool {
        other.address.starts_with(&self.address)
    }

    pub fn is_same_tile(&self, other: &Tile) -> bool {
        self.size == other.size && self.address == other.address
    }

    /// Check whether two tiles touch (8-neighborhood) without overlapping.
    ///
    /// Tiles of different sizes are adjacent when the bigger one does not
    /// contain the smaller one but contains at least one of its neighbors.
    pub fn is_neighbor(&self, other: &Tile) -> bool {
        if self.size == other.size {
            return !self.is_same_tile(other) && self.neighbors().contains(other);
        }

        let (smaller, bigger) = if other.size > self.size {
            (other, self)
        } else {
            (self, other)
        };

        if bigger.contains(smaller) {
            return false;
        }

        smaller
            .neighbors()
            .iter()
            .any(|neighbor| bigger.contains(neighbor))
    }

    /// Number of tiles traversed along the grid axes (city block distance).
    ///
    /// ```rust
    /// use geotiling::Tile;
    ///
    /// let from = Tile::from_address("9F53")?;
    /// let to = Tile::from_address("8FXG")?;
    /// assert_eq!(from.manhattan_distance(&to)?, 13);
    /// assert_eq!(from.chebyshev_distance(&to)?, 9);
    /// # Ok::<(), geotiling::GeoTilingError>(())
    /// ```
    pub fn manhattan_distance(&self, other: &Tile) -> Result<u64> {
        let latitudinal = self.latitudinal_distance(other)?;
        let longitudinal = self.longitudinal_distance(other)?;
        Ok(latitudinal.unsigned_abs() + longitudinal.unsigned_abs())
    }

    /// Number of king moves between the tiles (chessboard distance).
    pub fn chebyshev_distance(&self, other: &Tile) -> Result<u64> {
        let latitudinal = self.latitudinal_distance(other)?;
        let longitudinal = self.longitudinal_distance(other)?;
        Ok(latitudinal.unsigned_abs().max(longitudinal.unsigned_abs()))
    }

    /// Rough direction from `other` to this tile in radians: 0 is east, π/2 is
    /// north, ±π is west.
    ///
    /// Computed from grid distances, so it degrades for large or near-polar tiles.
    pub fn direction(&self, other: &Tile) -> Result<f64> {
        let latitudinal = self.latitudinal_distance(other)?;
        let longitudinal = self.longitudinal_distance(other)?;
        Ok((latitudinal as f64).atan2(longitudinal as f64))
    }

    /// Signed number of rows from `other` to this tile. Latitude never wraps.
    pub fn latitudinal_distance(&self, other: &Tile) -> Result<i64> {
        self.check_same_size(other)?;
        axis_distance(&self.address, &other.address, 0, false)
    }

    /// Signed number of columns from `other` to this tile, taking the shorter
    /// way around the antimeridian.
    pub fn longitudinal_distance(&self, other: &Tile) -> Result<i64> {
        self.check_same_size(other)?;
        axis_distance(&self.address, &other.address, 1, true)
    }

    fn check_same_size(&self, other: &Tile) -> Result<()> {
        if self.size != other.size {
            return Err(GeoTilingError::SizeMismatch {
                expected: self.size,
                actual: other.size,
            });
        }
        Ok(())
    }
}

/// Accumulate digit differences along one axis (0 = latitude, 1 = longitude),
/// coarsest pair first.
fn axis_distance(from: &str, to: &str, axis: usize, wraps: bool) -> Result<i64> {
    let from_digits = from.chars().skip(axis).step_by(2);
    let to_digits = to.chars().skip(axis).step_by(2);

    let mut distance = 0i64;
    for (i, (a, b)) in from_digits.zip(to_digits).enumerate() {
        let mut diff = digit_index(a)? - digit_index(b)?;
        if wraps && i == 0 && diff.abs() > FIRST_LONGITUDE_DIGITS / 2 {
            diff -= FIRST_LONGITUDE_DIGITS * diff.signum();
        }
        distance = distance * ENCODING_BASE + diff;
    }
    Ok(distance)
}

fn digit_index(c: char) -> Result<i64> {
    codec::digit_value(c)
        .map(|value| value as i64)
        .ok_or(GeoTilingError::InvalidCharacter(c))
}

/// Turn an address back into a full code: `"C9"` -> `"C9000000+"`.
fn pad_address(address: &str) -> String {
    let mut code = String::with_capacity(address.len().max(SEPARATOR_POSITION) + 1);
    if address.len() > SEPARATOR_POSITION {
        code.push_str(&address[..SEPARATOR_POSITION]);
        code.push(SEPARATOR);
        code.push_str(&address[SEPARATOR_POSITION..]);
    } else {
        code.push_str(address);
        code.extend(std::iter::repeat_n(
            PADDING_CHARACTER,
            SEPARATOR_POSITION - address.len(),
        ));
        code.push(SEPARATOR);
    }
    code
}

/// Upper-cased digits of a full code, up to the padding or the end.
fn significant_digits(code: &str) -> Result<String> {
    if !codec::is_full(code) {
        return Err(GeoTilingError::InvalidAddress(format!(
            "Only full codes can back a tile, got: {:?}",
            code
        )));
    }

    Ok(code
        .chars()
        .filter(|c| *c != SEPARATOR)
        .take_while(|c| *c != PADDING_CHARACTER)
        .map(|c| c.to_ascii_uppercase())
        .collect())
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl FromStr for Tile {
    type Err = GeoTilingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_address(s)
    }
}

impl TryFrom<String> for Tile {
    type Error = GeoTilingError;

    fn try_from(address: String) -> Result<Self> {
        Self::from_address(&address)
    }
}

impl From<Tile> for String {
    fn from(tile: Tile) -> Self {
        tile.address
    }
}
