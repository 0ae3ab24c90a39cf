//! Deduplicated electrode point sets.
//!
//! Floating-point coordinates are never hashed directly. Each point is
//! quantized to an integer key on a grid of spacing `tolerance`, and two
//! points are the same electrode when their keys agree.

use geometry::prelude::*;
use indexmap::IndexMap;

/// The default deduplication tolerance, in micrometers.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// An integer key identifying a point up to a tolerance.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct QuantizedPoint {
    /// The quantized x-coordinate.
    pub x: i64,
    /// The quantized y-coordinate.
    pub y: i64,
}

impl QuantizedPoint {
    /// Quantizes `p` onto a grid of spacing `tolerance`.
    #[inline]
    pub fn new(p: Point, tolerance: f64) -> Self {
        Self {
            x: quantize(p.x, tolerance),
            y: quantize(p.y, tolerance),
        }
    }
}

/// Rounds `value / tolerance` to the nearest integer.
#[inline]
pub fn quantize(value: f64, tolerance: f64) -> i64 {
    (value / tolerance).round() as i64
}

/// A set of electrode centers, unique up to a tolerance.
///
/// Members keep the order in which they were first inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectrodeSet {
    points: IndexMap<QuantizedPoint, Point>,
    tolerance: f64,
    duplicates: usize,
}

impl ElectrodeSet {
    /// Builds a set from `points`, keeping the first point seen for each key.
    ///
    /// Non-finite points are dropped.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance` is not a finite positive number.
    pub fn new(points: impl IntoIterator<Item = Point>, tolerance: f64) -> Self {
        assert!(
            tolerance.is_finite() && tolerance > 0.,
            "ElectrodeSet::new requires a finite positive tolerance, got {}",
            tolerance
        );
        let mut set = Self {
            points: IndexMap::new(),
            tolerance,
            duplicates: 0,
        };
        for p in points {
            set.insert(p);
        }
        set
    }

    /// Builds a set using [`DEFAULT_TOLERANCE`].
    pub fn with_default_tolerance(points: impl IntoIterator<Item = Point>) -> Self {
        Self::new(points, DEFAULT_TOLERANCE)
    }

    fn insert(&mut self, p: Point) -> bool {
        if !p.is_finite() {
            tracing::warn!(point = ?p, "dropping non-finite electrode position");
            return false;
        }
        let key = QuantizedPoint::new(p, self.tolerance);
        if self.points.contains_key(&key) {
            self.duplicates += 1;
            return false;
        }
        self.points.insert(key, p);
        true
    }

    /// The number of distinct electrodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The deduplication tolerance.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// How many input points were merged into an existing member.
    #[inline]
    pub fn duplicates_removed(&self) -> usize {
        self.duplicates
    }

    /// Returns `true` if a member lies on the same quantized key as `p`.
    pub fn contains(&self, p: Point) -> bool {
        self.points.contains_key(&QuantizedPoint::new(p, self.tolerance))
    }

    /// Iterates over the members in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.points.values().copied()
    }

    /// Copies the members into a vector, in insertion order.
    pub fn to_vec(&self) -> Vec<Point> {
        self.iter().collect()
    }

    /// Applies `f` to every member, keeping one output member per input member.
    ///
    /// The tolerance of the new set is `tolerance * scale`, halved until no
    /// two mapped members share a key. Returns [`None`] if `f` sends two
    /// members onto the same point or produces a non-finite point.
    pub fn map(&self, f: impl Fn(Point) -> Point, scale: f64) -> Option<Self> {
        let mapped: Vec<Point> = self.iter().map(f).collect();
        if mapped.iter().any(|p| !p.is_finite()) {
            return None;
        }
        let mut tolerance = self.tolerance * scale.abs();
        for _ in 0..MAX_REFINEMENTS {
            if !(tolerance.is_finite() && tolerance > 0.) {
                return None;
            }
            let set = Self::new(mapped.iter().copied(), tolerance);
            if set.len() == mapped.len() {
                return Some(set);
            }
            tolerance /= 2.;
        }
        None
    }
}

/// Bound on how often [`ElectrodeSet::map`] halves the tolerance.
const MAX_REFINEMENTS: usize = 64;

impl Bbox for ElectrodeSet {
    fn bbox(&self) -> Option<Rect> {
        Rect::union_all_option(self.iter().map(|p| Some(Rect::from_point(p))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_within_tolerance_are_merged() {
        let set = ElectrodeSet::new(
            [
                Point::new(10., 10.),
                Point::new(10.0001, 9.9999),
                Point::new(20., 10.),
            ],
            1e-3,
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.duplicates_removed(), 1);
        assert_eq!(set.to_vec()[0], Point::new(10., 10.));
        assert!(set.contains(Point::new(20.0002, 10.)));
    }

    #[test]
    fn non_finite_points_are_dropped() {
        let set = ElectrodeSet::with_default_tolerance([
            Point::new(f64::NAN, 0.),
            Point::new(1., f64::INFINITY),
            Point::new(1., 1.),
        ]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.duplicates_removed(), 0);
    }

    #[test]
    fn map_scales_tolerance() {
        let set = ElectrodeSet::new([Point::new(1., 2.), Point::new(3., 4.)], 0.5);
        let shifted = set.map(|p| p + Point::new(1., 1.), 1.).unwrap();
        assert_eq!(shifted.tolerance(), 0.5);
        assert_eq!(shifted.to_vec(), vec![Point::new(2., 3.), Point::new(4., 5.)]);
        let shrunk = set.map(|p| p * 0.1, 0.1).unwrap();
        assert_eq!(shrunk.len(), 2);
    }

    #[test]
    fn map_never_merges_distinct_members() {
        let set = ElectrodeSet::new([Point::new(0.0011, 0.), Point::new(0.0019, 0.)], 1e-3);
        assert_eq!(set.len(), 2);
        let squeezed = set
            .map(|p| p * 0.1 + Point::new(1879.9999, 0.), 0.1)
            .unwrap();
        assert_eq!(squeezed.len(), 2);
    }

    #[test]
    fn map_fails_on_collapsed_members() {
        let set = ElectrodeSet::new([Point::new(1., 0.), Point::new(2., 0.)], 1e-3);
        assert!(set.map(|_| Point::new(5., 5.), 1.).is_none());
        assert!(set.map(|p| p * f64::INFINITY, 1.).is_none());
    }
}
