//! Run configuration.
//!
//! Every tunable of the extraction pipeline lives here rather than in
//! process-wide constants. A [`Config`] can be built in code or loaded from a
//! TOML file; unspecified keys take their defaults.
//!
//! ```toml
//! layer = 2
//! vertex_counts = [60, 64]
//! count_policy = "warn"
//!
//! [normalize]
//! target_spacing = 100.0
//! grid_size = [4000.0, 4000.0]
//! ```

use std::path::Path;

use geometry::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How to react when the extracted electrode count differs from the expected count.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountPolicy {
    /// Do not compare counts.
    Ignore,
    /// Record a warning and continue.
    #[default]
    Warn,
    /// Abort the extraction with [`Error::CountMismatch`].
    Error,
}

/// Parameters of the rescale/recenter transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeConfig {
    /// The desired median nearest-neighbor spacing, in micrometers.
    pub target_spacing: f64,
    /// The extent of the simulator grid. Its center is the default target center.
    pub grid_size: Dims,
    /// An explicit target center, overriding the center of `grid_size`.
    pub target_center: Option<Point>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            target_spacing: 100.,
            grid_size: Dims::new(4000., 4000.),
            target_center: None,
        }
    }
}

impl NormalizeConfig {
    /// Creates a configuration with an explicit spacing and center.
    pub fn new(target_spacing: f64, target_center: Point) -> Self {
        Self {
            target_spacing,
            target_center: Some(target_center),
            ..Default::default()
        }
    }

    /// The point the normalized centroid is moved to.
    pub fn target(&self) -> Point {
        self.target_center.unwrap_or_else(|| self.grid_size.center())
    }
}

/// Parameters of grid inference and gap filling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Coordinate differences at or below this value are treated as identical.
    pub tolerance: f64,
    /// A fill producing more than `fill_warn_ratio` times the observed point
    /// count is reported as suspicious.
    pub fill_warn_ratio: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            fill_warn_ratio: 4.,
        }
    }
}

/// Configuration for a full extraction run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The layout layer holding electrode shapes.
    pub layer: i32,
    /// Polygon vertex counts identifying electrode candidates.
    pub vertex_counts: Vec<usize>,
    /// Electrode centers closer than this are merged.
    pub dedup_tolerance: f64,
    /// Quantum used when comparing shape dimensions in the outlier filter.
    pub shape_tolerance: f64,
    /// Reaction to an electrode count differing from the expected count.
    pub count_policy: CountPolicy,
    /// Whether rectangular stimulus pads are appended after the electrodes.
    pub include_stimulus: bool,
    /// The constant z-coordinate of every output record.
    pub z: f64,
    /// Margin added around the output bounding box.
    pub bbox_margin: f64,
    /// Rescale/recenter parameters.
    pub normalize: NormalizeConfig,
    /// Grid inference parameters.
    pub grid: GridConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layer: 2,
            vertex_counts: vec![60, 64],
            dedup_tolerance: 1e-3,
            shape_tolerance: 1e-3,
            count_policy: CountPolicy::default(),
            include_stimulus: true,
            z: 100.,
            bbox_margin: 100.,
            normalize: NormalizeConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

impl Config {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = crate::io::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Checks that every numeric parameter is usable.
    pub fn validate(&self) -> Result<()> {
        positive("dedup_tolerance", self.dedup_tolerance)?;
        positive("shape_tolerance", self.shape_tolerance)?;
        positive("normalize.target_spacing", self.normalize.target_spacing)?;
        positive("grid.tolerance", self.grid.tolerance)?;
        positive("grid.fill_warn_ratio", self.grid.fill_warn_ratio)?;
        if !self.z.is_finite() {
            return Err(Error::InvalidInput("`z` must be finite".to_string()));
        }
        if !(self.bbox_margin.is_finite() && self.bbox_margin >= 0.) {
            return Err(Error::InvalidInput(
                "`bbox_margin` must be finite and non-negative".to_string(),
            ));
        }
        if self.vertex_counts.is_empty() {
            return Err(Error::InvalidInput(
                "`vertex_counts` must list at least one vertex count".to_string(),
            ));
        }
        if self.normalize.target_spacing <= self.dedup_tolerance {
            return Err(Error::InvalidInput(
                "`normalize.target_spacing` must exceed `dedup_tolerance`".to_string(),
            ));
        }
        if !self.normalize.target().is_finite() {
            return Err(Error::InvalidInput(
                "the normalization target center must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "`{name}` must be a finite positive number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.normalize.target(), Point::new(2000., 2000.));
    }

    #[test]
    fn toml_overrides_nested_keys() {
        let config = Config::from_toml_str(
            r#"
            layer = 5
            count_policy = "error"
            include_stimulus = false

            [normalize]
            target_spacing = 50.0
            target_center = [10.0, 20.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.layer, 5);
        assert_eq!(config.count_policy, CountPolicy::Error);
        assert!(!config.include_stimulus);
        assert_eq!(config.normalize.target_spacing, 50.);
        assert_eq!(config.normalize.target(), Point::new(10., 20.));
        assert_eq!(config.vertex_counts, vec![60, 64]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("layr = 3"),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        let err = Config::from_toml_str("[normalize]\ntarget_spacing = 0.0").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
