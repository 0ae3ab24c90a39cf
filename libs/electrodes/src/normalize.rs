//! Rescaling and recentering of electrode sets.
//!
//! The transform is fit in two passes: points are first centered on their
//! centroid, then scaled so that the median nearest-neighbor spacing equals
//! the target spacing, and finally translated onto the target center.

use geometry::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::NormalizeConfig;
use crate::error::{Error, Result};
use crate::set::ElectrodeSet;

/// Computes the median of `values`.
///
/// For an even number of values, returns the mean of the two middle values.
/// Returns [`None`] if `values` is empty.
///
/// ```
/// # use electrodes::normalize::median;
/// assert_eq!(median(&[3., 1., 2.]), Some(2.));
/// assert_eq!(median(&[4., 1., 2., 3.]), Some(2.5));
/// assert_eq!(median(&[]), None);
/// ```
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.)
    }
}

/// For each point, the distance to the closest other point.
///
/// Returns an empty vector when there are fewer than two points.
pub fn nearest_neighbor_distances(points: &[Point]) -> Vec<f64> {
    if points.len() < 2 {
        return Vec::new();
    }
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, q)| p.dist_sq(*q))
                .fold(f64::INFINITY, f64::min)
                .sqrt()
        })
        .collect()
}

/// The median nearest-neighbor distance of `points`.
///
/// Fails with [`Error::DegenerateGeometry`] if there are fewer than two
/// points, or if the spacing is zero or not finite.
pub fn median_spacing(points: &[Point]) -> Result<f64> {
    if points.len() < 2 {
        return Err(Error::DegenerateGeometry(format!(
            "need at least 2 points to measure spacing, got {}",
            points.len()
        )));
    }
    let spacing = median(&nearest_neighbor_distances(points)).unwrap_or(0.);
    if spacing == 0. || !spacing.is_finite() {
        return Err(Error::DegenerateGeometry(format!(
            "median nearest-neighbor spacing is {spacing}"
        )));
    }
    Ok(spacing)
}

/// A fitted center-scale-recenter transform.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    centroid: Point,
    spacing: f64,
    scale: f64,
    target: Point,
}

impl Normalization {
    /// Fits the transform mapping `set` onto the configured spacing and center.
    pub fn fit(set: &ElectrodeSet, config: &NormalizeConfig) -> Result<Self> {
        Self::fit_points(&set.to_vec(), config)
    }

    /// Fits the transform for a plain slice of points.
    pub fn fit_points(points: &[Point], config: &NormalizeConfig) -> Result<Self> {
        let target_spacing = config.target_spacing;
        if !(target_spacing.is_finite() && target_spacing > 0.) {
            return Err(Error::InvalidInput(format!(
                "target spacing must be a finite positive number, got {target_spacing}"
            )));
        }
        let centroid = Point::centroid(points.iter().copied()).ok_or_else(|| {
            Error::DegenerateGeometry("cannot normalize an empty point set".to_string())
        })?;
        let centered: Vec<Point> = points.iter().map(|&p| p - centroid).collect();
        let spacing = median_spacing(&centered)?;
        let scale = target_spacing / spacing;
        let target = config.target();
        tracing::debug!(?centroid, spacing, scale, ?target, "fit normalization");
        Ok(Self {
            centroid,
            spacing,
            scale,
            target,
        })
    }

    /// Maps a point through the transform.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        (p - self.centroid) * self.scale + self.target
    }

    /// Maps every member of `set` through the transform.
    ///
    /// The output has exactly one member per input member. Fails with
    /// [`Error::DegenerateGeometry`] if two members become indistinguishable.
    pub fn apply_set(&self, set: &ElectrodeSet) -> Result<ElectrodeSet> {
        set.map(|p| self.apply(p), self.scale).ok_or_else(|| {
            Error::DegenerateGeometry(format!(
                "distinct electrodes coincide after scaling by {}",
                self.scale
            ))
        })
    }

    /// The centroid of the input set.
    #[inline]
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// The measured median nearest-neighbor spacing of the input set.
    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// The scale factor applied after centering.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The point the centroid is mapped to.
    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }
}

/// Rescales and recenters `set` according to `config`.
pub fn normalize(set: &ElectrodeSet, config: &NormalizeConfig) -> Result<ElectrodeSet> {
    let normalization = Normalization::fit(set, config)?;
    normalization.apply_set(set)
}
