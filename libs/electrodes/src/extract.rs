//! The electrode extraction pipeline.
//!
//! An [`Extractor`] turns the polygon records of one layout into an
//! [`ElectrodeLayout`]:
//!
//! 1. polygons on the configured layer with an accepted vertex count become
//!    electrode candidates;
//! 2. stray shapes are rejected by a [`ShapeClassifier`];
//! 3. the centers of the surviving bounding boxes are deduplicated;
//! 4. the electrode count is compared with the expected count;
//! 5. the centers are normalized and labeled in reading order;
//! 6. rectangular stimulus pads are projected with the same transform and
//!    appended after the electrodes.

use std::path::Path;

use geometry::prelude::*;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{span, Level};

use crate::config::{Config, CountPolicy};
use crate::error::{Error, Result};
use crate::filter::{MostCommonShape, ShapeClassifier};
use crate::issues::{Cause, IssueSet, Severity};
use crate::label::{label, label_from, LabeledElectrode};
use crate::normalize::Normalization;
use crate::set::{quantize, ElectrodeSet};

/// A pre-extracted layout polygon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonRecord {
    /// The number of vertices of the original polygon.
    pub vertex_count: usize,
    /// The layout layer the polygon lives on.
    pub layer: i32,
    /// The bounding box of the polygon.
    pub bounding_box: Rect,
    /// The enclosed area, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
}

impl PolygonRecord {
    /// Summarizes `polygon` as a record on `layer`.
    ///
    /// Returns [`None`] for a polygon without vertices.
    pub fn from_polygon(polygon: &Polygon, layer: i32) -> Option<Self> {
        Some(Self {
            vertex_count: polygon.num_vertices(),
            layer,
            bounding_box: polygon.bbox()?,
            area: Some(polygon.area()),
        })
    }

    /// Returns `true` if the polygon fills its bounding box, up to a relative `tolerance`.
    ///
    /// Records without an area are never rectangular.
    pub fn is_rectangular(&self, tolerance: f64) -> bool {
        let Some(area) = self.area else {
            return false;
        };
        let bbox_area = self.bounding_box.area();
        bbox_area > 0. && (area - bbox_area).abs() <= tolerance * bbox_area.max(1.)
    }
}

/// One line of the output layout: `[index, x, y, z]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(usize, f64, f64, f64)", into = "(usize, f64, f64, f64)")]
pub struct ElectrodeRecord {
    /// The label of the electrode.
    pub index: usize,
    /// The normalized center.
    pub position: Point,
    /// The configured constant height.
    pub z: f64,
}

impl From<(usize, f64, f64, f64)> for ElectrodeRecord {
    fn from((index, x, y, z): (usize, f64, f64, f64)) -> Self {
        Self {
            index,
            position: Point::new(x, y),
            z,
        }
    }
}

impl From<ElectrodeRecord> for (usize, f64, f64, f64) {
    fn from(value: ElectrodeRecord) -> Self {
        (value.index, value.position.x, value.position.y, value.z)
    }
}

/// The simulator-ready output of an extraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectrodeLayout {
    /// Electrodes first, then stimulus pads, numbered consecutively.
    pub electrode_coordinates: Vec<ElectrodeRecord>,
    /// The extent of the electrodes, expanded by the configured margin.
    ///
    /// Stimulus pads do not widen it.
    pub bounding_box: Rect,
}

/// Everything produced by [`Extractor::extract`].
#[derive(Clone, Debug, PartialEq)]
pub struct Extraction {
    /// The output record.
    pub layout: ElectrodeLayout,
    /// The labeled, normalized electrodes.
    pub electrodes: Vec<LabeledElectrode>,
    /// The labeled, normalized stimulus pad centers.
    pub stimulus: Vec<LabeledElectrode>,
    /// The transform applied to electrodes and stimulus pads.
    pub normalization: Normalization,
    /// The diagnostics logged during extraction.
    pub issues: IssueSet,
}

/// Parses the expected electrode count from a layout name.
///
/// The count is the first `_`-separated segment of the file stem with its
/// three-letter prefix removed.
///
/// ```
/// # use electrodes::extract::expected_count_from_name;
/// assert_eq!(expected_count_from_name("MEA128_rec.json"), Some(128));
/// assert_eq!(expected_count_from_name("data/MEA60"), Some(60));
/// assert_eq!(expected_count_from_name("layout"), None);
/// ```
pub fn expected_count_from_name(name: &str) -> Option<usize> {
    let stem = Path::new(name).file_stem()?.to_str()?;
    let head = stem.split('_').next()?;
    head.get(3..)?.parse().ok()
}

/// Runs the extraction pipeline.
#[derive(Clone, Debug)]
pub struct Extractor<'a, C = MostCommonShape> {
    config: &'a Config,
    classifier: C,
    expected_count: Option<usize>,
}

impl<'a> Extractor<'a> {
    /// Creates an extractor using the [`MostCommonShape`] classifier.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            classifier: MostCommonShape::new(config.shape_tolerance),
            expected_count: None,
        }
    }
}

impl<'a, C: ShapeClassifier> Extractor<'a, C> {
    /// Replaces the stray-shape classifier.
    pub fn with_classifier<D: ShapeClassifier>(self, classifier: D) -> Extractor<'a, D> {
        Extractor {
            config: self.config,
            classifier,
            expected_count: self.expected_count,
        }
    }

    /// Sets the number of electrodes the layout is expected to contain.
    pub fn expected_count(mut self, expected: impl Into<Option<usize>>) -> Self {
        self.expected_count = expected.into();
        self
    }

    /// Extracts, normalizes and labels the electrodes of `polygons`.
    ///
    /// Fails with [`Error::InvalidInput`] if the configuration does not
    /// pass [`Config::validate`].
    pub fn extract(&self, polygons: &[PolygonRecord]) -> Result<Extraction> {
        let config = self.config;
        config.validate()?;
        let span = span!(
            Level::INFO,
            "extract",
            polygons = polygons.len(),
            layer = config.layer
        );
        let _guard = span.enter();

        let mut issues = IssueSet::new();

        let candidates: Vec<Rect> = polygons
            .iter()
            .filter(|p| p.layer == config.layer && config.vertex_counts.contains(&p.vertex_count))
            .map(|p| p.bounding_box)
            .collect();
        if candidates.is_empty() {
            return Err(Error::EmptyResult(format!(
                "no polygons on layer {} have one of the vertex counts {:?}",
                config.layer, config.vertex_counts
            )));
        }
        tracing::debug!(candidates = candidates.len(), "selected electrode candidates");

        let keep = self.classifier.classify(&candidates)?;
        if keep.is_empty() {
            return Err(Error::EmptyResult(
                "the shape classifier rejected every candidate".to_string(),
            ));
        }
        if keep.len() < candidates.len() {
            issues.report(
                Cause::StrayShapes {
                    kept: keep.len(),
                    rejected: candidates.len() - keep.len(),
                },
                Severity::Info,
            );
        }

        let set = ElectrodeSet::new(
            keep.iter().map(|&i| candidates[i].center()),
            config.dedup_tolerance,
        );
        if set.duplicates_removed() > 0 {
            issues.report(
                Cause::DuplicateElectrodes {
                    removed: set.duplicates_removed(),
                },
                Severity::Info,
            );
        }

        self.check_count(set.len(), &mut issues)?;

        let normalization = Normalization::fit(&set, &config.normalize)?;
        let electrodes = label(normalization.apply_set(&set)?.iter());

        let stimulus = if config.include_stimulus {
            let pads = stimulus_pads(polygons, config);
            tracing::debug!(pads = pads.len(), "found stimulus pads");
            label_from(
                pads.iter().map(|r| normalization.apply(r.center())),
                electrodes.len(),
            )
        } else {
            Vec::new()
        };

        let electrode_coordinates: Vec<ElectrodeRecord> = electrodes
            .iter()
            .chain(&stimulus)
            .map(|e| ElectrodeRecord {
                index: e.label,
                position: e.position,
                z: config.z,
            })
            .collect();
        let bounding_box = electrodes
            .iter()
            .map(|e| e.position)
            .collect::<Vec<_>>()
            .bbox()
            .ok_or_else(|| Error::EmptyResult("no electrodes to emit".to_string()))?
            .expand_all(config.bbox_margin);

        tracing::info!(
            electrodes = electrodes.len(),
            stimulus = stimulus.len(),
            "extracted electrode layout"
        );

        Ok(Extraction {
            layout: ElectrodeLayout {
                electrode_coordinates,
                bounding_box,
            },
            electrodes,
            stimulus,
            normalization,
            issues,
        })
    }

    fn check_count(&self, actual: usize, issues: &mut IssueSet) -> Result<()> {
        let Some(expected) = self.expected_count else {
            return Ok(());
        };
        if expected == actual {
            return Ok(());
        }
        match self.config.count_policy {
            CountPolicy::Ignore => {
                tracing::debug!(expected, actual, "ignoring electrode count mismatch");
                Ok(())
            }
            CountPolicy::Warn => {
                issues.report(Cause::CountMismatch { expected, actual }, Severity::Warning);
                Ok(())
            }
            CountPolicy::Error => Err(Error::CountMismatch { expected, actual }),
        }
    }
}

/// Rectangular pads on the electrode layer, unique by bounding box, in input order.
fn stimulus_pads(polygons: &[PolygonRecord], config: &Config) -> Vec<Rect> {
    let tol = config.dedup_tolerance;
    let mut seen = IndexSet::new();
    polygons
        .iter()
        .filter(|p| p.layer == config.layer && p.is_rectangular(config.shape_tolerance))
        .map(|p| p.bounding_box)
        .filter(|r| {
            seen.insert((
                quantize(r.left(), tol),
                quantize(r.bot(), tol),
                quantize(r.right(), tol),
                quantize(r.top(), tol),
            ))
        })
        .collect()
}
