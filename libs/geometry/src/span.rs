//! A one-dimensional span.
//!
//! A span represents the closed interval `[start, stop]`.
use serde::{Deserialize, Serialize};

/// A closed interval of coordinates in one dimension.
///
/// Represents the range `[start, stop]`.
#[derive(Debug, Default, Clone, Copy, PartialOrd, Serialize, Deserialize, PartialEq)]
pub struct Span {
    start: f64,
    stop: f64,
}

impl Span {
    /// Creates a new [`Span`] between two coordinates.
    ///
    /// The endpoints are sorted, so `Span::new(3., 1.)` is the interval `[1, 3]`.
    pub fn new(start: f64, stop: f64) -> Self {
        Self {
            start: start.min(stop),
            stop: start.max(stop),
        }
    }

    /// Creates a span of zero length encompassing the given coordinate.
    pub const fn from_point(x: f64) -> Self {
        Self { start: x, stop: x }
    }

    /// Creates the smallest span containing every coordinate in `values`.
    ///
    /// Returns [`None`] if `values` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let span = Span::from_values([4., -1., 2.]);
    /// assert_eq!(span, Some(Span::new(-1., 4.)));
    /// assert_eq!(Span::from_values(Vec::new()), None);
    /// ```
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, x| match acc {
            None => Some(Self::from_point(x)),
            Some(span) => Some(span.add_point(x)),
        })
    }

    /// Gets the starting (lower) endpoint of the span.
    #[inline]
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// Gets the stopping (upper) endpoint of the span.
    #[inline]
    pub const fn stop(&self) -> f64 {
        self.stop
    }

    /// Returns the smallest span containing this span and the coordinate `x`.
    pub fn add_point(self, x: f64) -> Self {
        Self {
            start: self.start.min(x),
            stop: self.stop.max(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::span::Span;

    #[test]
    fn span_covers_all_values() {
        let span = Span::from_values([4., -1.5, 10., 3.]).unwrap();
        assert_eq!(span, Span::new(-1.5, 10.));
        assert_eq!(span.add_point(12.), Span::new(-1.5, 12.));
        assert_eq!(Span::from_values([]), None);
    }
}
