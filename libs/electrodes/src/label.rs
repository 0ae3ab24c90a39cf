//! Deterministic electrode labeling.

use geometry::prelude::*;
use serde::{Deserialize, Serialize};

/// An electrode position with its assigned label.
///
/// Serializes as `[label, x, y]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(usize, f64, f64)", into = "(usize, f64, f64)")]
pub struct LabeledElectrode {
    /// The label, unique within one labeling.
    pub label: usize,
    /// The electrode center.
    pub position: Point,
}

impl LabeledElectrode {
    /// The x-coordinate of the electrode center.
    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// The y-coordinate of the electrode center.
    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }
}

impl From<(usize, f64, f64)> for LabeledElectrode {
    fn from((label, x, y): (usize, f64, f64)) -> Self {
        Self {
            label,
            position: Point::new(x, y),
        }
    }
}

impl From<LabeledElectrode> for (usize, f64, f64) {
    fn from(value: LabeledElectrode) -> Self {
        (value.label, value.position.x, value.position.y)
    }
}

/// Labels `points` `0..N` in reading order: ascending y, then ascending x.
///
/// # Example
///
/// ```
/// # use geometry::prelude::*;
/// # use electrodes::label::label;
/// let labeled = label([Point::new(5., 0.), Point::new(0., 1.), Point::new(1., 0.)]);
/// let order: Vec<_> = labeled.iter().map(|e| (e.label, e.x(), e.y())).collect();
/// assert_eq!(order, vec![(0, 1., 0.), (1, 5., 0.), (2, 0., 1.)]);
/// ```
pub fn label(points: impl IntoIterator<Item = Point>) -> Vec<LabeledElectrode> {
    label_from(points, 0)
}

/// Labels `points` in reading order, starting at `first`.
///
/// Used to continue a numbering, e.g. for stimulus pads listed after the
/// electrodes.
pub fn label_from(points: impl IntoIterator<Item = Point>, first: usize) -> Vec<LabeledElectrode> {
    let mut points: Vec<Point> = points.into_iter().collect();
    points.sort_by(Point::cmp_yx);
    points
        .into_iter()
        .enumerate()
        .map(|(i, position)| LabeledElectrode {
            label: first + i,
            position,
        })
        .collect()
}
