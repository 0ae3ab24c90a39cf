//! Rectangular grid inference and gap filling.
//!
//! Position lists exported from electrode-placement descriptors often omit
//! sites. Given the surviving points of an otherwise regular grid, this module
//! infers the pitch along each axis and materializes every grid position in
//! the observed range. The reconstruction is best-effort: filled points are
//! not individually validated, but a fill that is far larger than the input
//! is reported as [`Cause::SparseGridFill`].

use geometry::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::error::{Error, Result};
use crate::issues::{Cause, IssueSet, Severity};
use crate::normalize::median;

/// The inferred pitch and extent of a rectangular grid.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// The grid pitch along x (`w`) and y (`h`).
    pub pitch: Dims,
    /// The observed x-range.
    pub xspan: Span,
    /// The observed y-range.
    pub yspan: Span,
}

impl GridSpec {
    /// Infers a grid from `points`, or returns [`None`] if there are no points.
    pub fn infer(points: &[Point], tolerance: f64) -> Option<Self> {
        let xs = distinct_coords(points, Dir::Horiz);
        let ys = distinct_coords(points, Dir::Vert);
        let xspan = Span::from_values(xs.iter().copied())?;
        let yspan = Span::from_values(ys.iter().copied())?;
        Some(Self {
            pitch: Dims::new(infer_pitch(&xs, tolerance), infer_pitch(&ys, tolerance)),
            xspan,
            yspan,
        })
    }

    /// Uses the extent of `points` with an explicitly given pitch.
    ///
    /// Returns [`None`] if there are no points.
    pub fn with_pitch(points: &[Point], pitch: Dims) -> Option<Self> {
        let xspan = Span::from_values(points.iter().map(|p| p.x))?;
        let yspan = Span::from_values(points.iter().map(|p| p.y))?;
        Some(Self {
            pitch,
            xspan,
            yspan,
        })
    }

    /// The pitch along direction `dir`.
    #[inline]
    pub fn pitch(&self, dir: Dir) -> f64 {
        self.pitch.dim(dir)
    }

    /// The observed range along direction `dir`.
    #[inline]
    pub fn span(&self, dir: Dir) -> Span {
        match dir {
            Dir::Horiz => self.xspan,
            Dir::Vert => self.yspan,
        }
    }

    /// The grid coordinates along direction `dir`.
    ///
    /// Starts at the observed minimum and steps by the pitch until reaching
    /// the observed maximum, taking one extra step if rounding left the
    /// maximum uncovered.
    pub fn ladder(&self, dir: Dir, tolerance: f64) -> Vec<f64> {
        let span = self.span(dir);
        let step = self.pitch(dir);
        let (vmin, vmax) = (span.start(), span.stop());
        let n = if step > tolerance {
            ((vmax - vmin) / step).round() as usize
        } else {
            0
        };
        if n == 0 {
            return vec![vmin];
        }
        let mut coords: Vec<f64> = (0..=n).map(|i| vmin + i as f64 * step).collect();
        if let Some(&last) = coords.last() {
            if last + tolerance < vmax {
                coords.push(last + step);
            }
        }
        coords
    }

    /// Every grid position, sorted by x and then by y.
    pub fn positions(&self, tolerance: f64) -> Vec<Point> {
        let xs = self.ladder(Dir::Horiz, tolerance);
        let ys = self.ladder(Dir::Vert, tolerance);
        let mut points: Vec<Point> = xs
            .iter()
            .flat_map(|&x| ys.iter().map(move |&y| Point::new(x, y)))
            .collect();
        points.sort_by(Point::cmp_xy);
        points
    }
}

/// The sorted, exactly distinct coordinates of `points` along `dir`.
fn distinct_coords(points: &[Point], dir: Dir) -> Vec<f64> {
    let mut coords: Vec<f64> = points
        .iter()
        // Adding zero folds `-0.0` into `0.0`.
        .map(|p| p.coord(dir) + 0.)
        .collect();
    coords.sort_by(f64::total_cmp);
    coords.dedup();
    coords
}

/// Infers the pitch of sorted, distinct coordinates.
///
/// Takes the median of the successive differences above `tolerance`, rounded
/// to the nearest integer with ties to even. Falls back to the smallest
/// positive difference when that median is degenerate, and to `1.0` when
/// there is only one coordinate.
pub fn infer_pitch(coords: &[f64], tolerance: f64) -> f64 {
    let diffs: Vec<f64> = coords.windows(2).map(|w| w[1] - w[0]).collect();
    let spaced: Vec<f64> = diffs.iter().copied().filter(|&d| d > tolerance).collect();
    if let Some(m) = median(&spaced) {
        let pitch = m.round_ties_even();
        if pitch > tolerance {
            return pitch;
        }
    }
    diffs
        .into_iter()
        .filter(|&d| d > 0.)
        .min_by(f64::total_cmp)
        .unwrap_or(1.)
}

/// The outcome of [`fill_missing`].
#[derive(Clone, Debug, PartialEq)]
pub struct GridFill {
    /// The grid used for filling, or [`None`] if there were no input points.
    pub spec: Option<GridSpec>,
    /// Every grid position, sorted by x and then by y.
    pub points: Vec<Point>,
    /// The number of distinct input points.
    pub observed: usize,
}

impl GridFill {
    /// The number of positions that were not among the input points.
    pub fn added(&self) -> usize {
        self.points.len().saturating_sub(self.observed)
    }
}

/// Infers a rectangular grid from `known` and fills in the missing positions.
///
/// An explicit `pitch` bypasses inference. An empty input yields an empty fill.
pub fn fill_missing(
    known: &[Point],
    pitch: Option<Dims>,
    config: &GridConfig,
    issues: &mut IssueSet,
) -> Result<GridFill> {
    let tolerance = config.tolerance;
    let mut pts: Vec<Point> = known
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| Point::new(p.x + 0., p.y + 0.))
        .collect();
    pts.sort_by(Point::cmp_xy);
    pts.dedup();
    let observed = pts.len();

    let spec = match pitch {
        Some(pitch) => {
            for dir in Dir::ALL {
                let step = pitch.dim(dir);
                if !(step.is_finite() && step > 0.) {
                    return Err(Error::InvalidInput(format!(
                        "{} pitch must be a finite positive number, got {}",
                        dir.axis(),
                        step
                    )));
                }
            }
            GridSpec::with_pitch(&pts, pitch)
        }
        None => GridSpec::infer(&pts, tolerance),
    };

    let Some(spec) = spec else {
        tracing::debug!("no positions to fill");
        return Ok(GridFill {
            spec: None,
            points: Vec::new(),
            observed: 0,
        });
    };

    let points = spec.positions(tolerance);
    tracing::debug!(
        pitch_x = spec.pitch.w(),
        pitch_y = spec.pitch.h(),
        observed,
        filled = points.len(),
        "filled grid"
    );
    if points.len() as f64 > observed as f64 * config.fill_warn_ratio {
        issues.report(
            Cause::SparseGridFill {
                observed,
                filled: points.len(),
            },
            Severity::Warning,
        );
    }

    Ok(GridFill {
        spec: Some(spec),
        points,
        observed,
    })
}
