//! Real-valued polygons.

use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::point::Point;
use crate::rect::Rect;

/// A polygon, with vertex coordinates given in order.
///
/// The closing vertex is implied; the last vertex should not repeat the first.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Polygon {
    /// Vector of points that make up the polygon.
    points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon with given vertices.
    pub fn from_verts(vec: Vec<Point>) -> Self {
        Self { points: vec }
    }

    /// Returns the vertices of the polygon.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    /// Computes the enclosed area using the shoelace formula.
    ///
    /// The result is non-negative regardless of winding order.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let tri = Polygon::from_verts(vec![
    ///     Point::new(0., 0.),
    ///     Point::new(4., 0.),
    ///     Point::new(0., 3.),
    /// ]);
    /// assert_eq!(tri.area(), 6.);
    /// ```
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() / 2.
    }
}

impl Bbox for Polygon {
    fn bbox(&self) -> Option<Rect> {
        Rect::union_all_option(self.points.iter().map(|p| Some(Rect::from_point(*p))))
    }
}
