//! Rejection of stray shapes on the electrode layer.
//!
//! Layouts often carry a few non-electrode shapes (labels, alignment marks)
//! on the electrode layer. The default [`MostCommonShape`] classifier keeps
//! the shapes whose dimensions form the largest cluster.

use geometry::prelude::*;
use indexmap::IndexMap;
use tracing::Level;

use crate::error::{Error, Result};
use crate::set::quantize;

/// A strategy deciding which bounding boxes are electrodes.
pub trait ShapeClassifier {
    /// Returns the indices (into `boxes`, ascending) of the boxes to keep.
    ///
    /// Implementations should fail with [`Error::EmptyResult`] rather than
    /// return an empty keep-set.
    fn classify(&self, boxes: &[Rect]) -> Result<Vec<usize>>;
}

/// Keeps the boxes sharing the most frequent `(width, height)` pair.
///
/// Dimensions are compared after quantizing to `tolerance`. Among equally
/// frequent shapes the smallest area wins, then the smallest width, then the
/// shape encountered first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MostCommonShape {
    tolerance: f64,
}

impl Default for MostCommonShape {
    fn default() -> Self {
        Self { tolerance: 1e-3 }
    }
}

impl MostCommonShape {
    /// Creates a classifier comparing dimensions up to `tolerance`.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    fn key(&self, rect: &Rect) -> (i64, i64) {
        (
            quantize(rect.width(), self.tolerance),
            quantize(rect.height(), self.tolerance),
        )
    }
}

impl ShapeClassifier for MostCommonShape {
    fn classify(&self, boxes: &[Rect]) -> Result<Vec<usize>> {
        if boxes.is_empty() {
            return Err(Error::EmptyResult(
                "no shapes were given to the outlier filter".to_string(),
            ));
        }

        let mut tally: IndexMap<(i64, i64), usize> = IndexMap::new();
        for rect in boxes {
            *tally.entry(self.key(rect)).or_default() += 1;
        }

        // `tally` is non-empty because `boxes` is.
        let mut best = *tally.first().map(|(k, _)| k).ok_or_else(|| {
            Error::EmptyResult("no shapes were given to the outlier filter".to_string())
        })?;
        let mut best_count = tally[&best];
        for (&key, &count) in tally.iter().skip(1) {
            let area = key.0 as i128 * key.1 as i128;
            let best_area = best.0 as i128 * best.1 as i128;
            let better = count > best_count
                || (count == best_count
                    && (area < best_area || (area == best_area && key.0 < best.0)));
            if better {
                best = key;
                best_count = count;
            }
        }

        let keep: Vec<usize> = boxes
            .iter()
            .enumerate()
            .filter_map(|(i, rect)| (self.key(rect) == best).then_some(i))
            .collect();

        if keep.is_empty() {
            return Err(Error::EmptyResult(
                "no shapes match the most common dimensions".to_string(),
            ));
        }

        tracing::event!(
            Level::DEBUG,
            shapes = tally.len(),
            kept = keep.len(),
            rejected = boxes.len() - keep.len(),
            width = best.0 as f64 * self.tolerance,
            height = best.1 as f64 * self.tolerance,
            "selected dominant electrode shape"
        );
        Ok(keep)
    }
}

/// Applies `classifier` and returns the kept boxes, in input order.
pub fn filter_with<C: ShapeClassifier + ?Sized>(classifier: &C, boxes: &[Rect]) -> Result<Vec<Rect>> {
    let keep = classifier.classify(boxes)?;
    Ok(keep.into_iter().map(|i| boxes[i]).collect())
}

/// Removes every box whose dimensions differ from the most common dimensions.
///
/// # Example
///
/// ```
/// # use geometry::prelude::*;
/// # use electrodes::filter::remove_outliers;
/// let boxes = vec![
///     Rect::from_sides(0., 0., 10., 10.),
///     Rect::from_sides(20., 0., 30., 10.),
///     Rect::from_sides(0., 50., 200., 60.),
/// ];
/// let kept = remove_outliers(&boxes).unwrap();
/// assert_eq!(kept, boxes[..2].to_vec());
/// ```
pub fn remove_outliers(boxes: &[Rect]) -> Result<Vec<Rect>> {
    filter_with(&MostCommonShape::default(), boxes)
}
