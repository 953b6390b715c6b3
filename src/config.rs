//! Rasterization and merging configuration
//!
//! The configuration is serializable so rasterization settings can be kept
//! next to the polygons they apply to, as JSON or (with the `toml` feature)
//! TOML.
use crate::area::{MAX_MERGE_THRESHOLD, MIN_MERGE_THRESHOLD};
use geotiling_types::size::TileSize;
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Settings shared by [`PolygonRasterizer`](crate::PolygonRasterizer) and
/// [`MergingTileArea`](crate::MergingTileArea).
///
/// # Example
///
/// ```rust
/// use geotiling::{Config, TileSize};
///
/// let config = Config::default();
/// assert_eq!(config.precision, TileSize::District);
///
/// let json = r#"{
///     "precision": "neighborhood",
///     "max_merged_size": "district"
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.merge_threshold, 400);
/// assert_eq!(config.max_merged_size, Some(TileSize::District));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of sibling tiles that get merged into their parent (2-400, default: 400)
    #[serde(default = "Config::default_merge_threshold")]
    pub merge_threshold: usize,

    /// Coarsest size merging may stop at (None merges all the way to global tiles)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_merged_size: Option<TileSize>,

    /// Size of the tiles a polygon is rasterized into
    #[serde(default = "Config::default_precision")]
    pub precision: TileSize,
}

impl Config {
    const fn default_merge_threshold() -> usize {
        MAX_MERGE_THRESHOLD
    }

    const fn default_precision() -> TileSize {
        TileSize::District
    }

    pub fn with_precision(mut self, precision: TileSize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_max_merged_size(mut self, size: TileSize) -> Self {
        self.max_merged_size = Some(size);
        self
    }

    pub fn with_merge_threshold(mut self, threshold: usize) -> Self {
        self.merge_threshold = threshold;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_MERGE_THRESHOLD..=MAX_MERGE_THRESHOLD).contains(&self.merge_threshold) {
            return Err(format!(
                "Merge threshold must be between {} and {}, got {}",
                MIN_MERGE_THRESHOLD, MAX_MERGE_THRESHOLD, self.merge_threshold
            ));
        }

        if let Some(max) = self.max_merged_size
            && max > self.precision
        {
            return Err(format!(
                "Max merged size ({}) is finer than the precision ({})",
                max, self.precision
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            merge_threshold: Self::default_merge_threshold(),
            max_merged_size: None,
            precision: Self::default_precision(),
        }
    }
}
