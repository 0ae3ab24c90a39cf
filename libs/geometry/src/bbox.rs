//! Axis-aligned rectangular bounding boxes.

use crate::{point::Point, rect::Rect};

/// A geometric shape that has a bounding box.
///
/// # Examples
///
/// ```
/// # use geometry::prelude::*;
/// let rect = Rect::from_sides(0., 0., 100., 200.);
/// assert_eq!(rect.bbox(), Some(Rect::from_sides(0., 0., 100., 200.)));
/// let pts = vec![Point::new(5., 1.), Point::new(-2., 7.)];
/// assert_eq!(pts.bbox(), Some(Rect::from_sides(-2., 1., 5., 7.)));
/// ```
pub trait Bbox {
    /// Computes the axis-aligned rectangular bounding box.
    ///
    /// If empty, this method should return `None`.
    /// Note that points and zero-area rectangles are not empty:
    /// these shapes contain a single point, and their bounding box
    /// implementations will return `Some(_)`.
    fn bbox(&self) -> Option<Rect>;
}

impl<T> Bbox for &T
where
    T: Bbox + ?Sized,
{
    fn bbox(&self) -> Option<Rect> {
        T::bbox(*self)
    }
}

impl Bbox for Point {
    fn bbox(&self) -> Option<Rect> {
        Some(Rect::from_point(*self))
    }
}

impl<T: Bbox> Bbox for [T] {
    fn bbox(&self) -> Option<Rect> {
        Rect::union_all_option(self.iter().map(Bbox::bbox))
    }
}

impl<T: Bbox> Bbox for Vec<T> {
    fn bbox(&self) -> Option<Rect> {
        self.as_slice().bbox()
    }
}

impl Bbox for Option<Rect> {
    fn bbox(&self) -> Option<Rect> {
        *self
    }
}
