//! Error types for tile, area and rasterization operations.

use geotiling_types::size::TileSize;

/// Errors surfaced by geotiling operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoTilingError {
    /// Malformed tile address or location code
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Operation requires tiles of equal size
    #[error("Tile sizes don't match: expected {expected}, got {actual}")]
    SizeMismatch { expected: TileSize, actual: TileSize },

    /// Character outside the location code alphabet
    #[error("Character {0:?} does not exist in alphabet")]
    InvalidCharacter(char),

    /// Fewer than three usable polygon vertices
    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    /// Non-finite latitude or longitude
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Code length the codec cannot produce
    #[error("Invalid code length: {0}")]
    InvalidCodeLength(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GeoTilingError>;
