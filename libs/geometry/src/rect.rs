//! Axis-aligned rectangles.

use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::dims::Dims;
use crate::dir::Dir;
use crate::point::Point;
use crate::span::Span;

/// An axis-aligned rectangle, specified by lower-left and upper-right corners.
///
/// Serializes as `[[left, bot], [right, top]]`, the bounding-box format
/// produced by layout readers.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(from = "[Point; 2]", into = "[Point; 2]")]
pub struct Rect {
    /// The lower-left corner.
    p0: Point,
    /// The upper-right corner.
    p1: Point,
}

impl Rect {
    /// Creates a new rectangle from the given opposite corner points.
    ///
    /// The corners are sorted, so any pair of opposite corners may be given.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::new(Point::new(30., 20.), Point::new(15., 40.));
    /// assert_eq!(rect.left(), 15.);
    /// assert_eq!(rect.bot(), 20.);
    /// assert_eq!(rect.right(), 30.);
    /// assert_eq!(rect.top(), 40.);
    /// ```
    #[inline]
    pub fn new(lower_left: Point, upper_right: Point) -> Self {
        let p0 = lower_left;
        let p1 = upper_right;
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// Creates a rectangle from all 4 sides (left, bottom, right, top).
    ///
    /// # Panics
    ///
    /// This method panics if `left > right` or if `bot > top`.
    ///
    /// If you want sides to be sorted for you, consider using [`Rect::new`] instead.
    #[inline]
    pub fn from_sides(left: f64, bot: f64, right: f64, top: f64) -> Self {
        assert!(
            left <= right,
            "Rect::from_sides requires that left ({}) <= right ({})",
            left,
            right
        );
        assert!(
            bot <= top,
            "Rect::from_sides requires that bot ({}) <= top ({})",
            bot,
            top
        );
        Self::new(Point::new(left, bot), Point::new(right, top))
    }

    /// Creates a zero-area rectangle containing the given point.
    #[inline]
    pub const fn from_point(p: Point) -> Self {
        Self { p0: p, p1: p }
    }

    /// Returns the center point of the rectangle.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(0., 0., 55., 45.);
    /// assert_eq!(rect.center(), Point::new(27.5, 22.5));
    /// ```
    pub fn center(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2., (self.p0.y + self.p1.y) / 2.)
    }

    /// Returns the bottom y-coordinate of the rectangle.
    #[inline]
    pub const fn bot(&self) -> f64 {
        self.p0.y
    }

    /// Returns the top y-coordinate of the rectangle.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.p1.y
    }

    /// Returns the left x-coordinate of the rectangle.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.p0.x
    }

    /// Returns the right x-coordinate of the rectangle.
    #[inline]
    pub const fn right(&self) -> f64 {
        self.p1.x
    }

    /// Returns the horizontal [`Span`] of the rectangle.
    pub fn hspan(&self) -> Span {
        Span::new(self.p0.x, self.p1.x)
    }

    /// Returns the vertical [`Span`] of the rectangle.
    pub fn vspan(&self) -> Span {
        Span::new(self.p0.y, self.p1.y)
    }

    /// Returns the [`Span`] of the rectangle along direction `dir`.
    pub fn span(&self, dir: Dir) -> Span {
        match dir {
            Dir::Horiz => self.hspan(),
            Dir::Vert => self.vspan(),
        }
    }

    /// The horizontal width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.p1.x - self.p0.x
    }

    /// The vertical height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.p1.y - self.p0.y
    }

    /// The dimensions of the rectangle.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(20., 20., 100., 200.);
    /// assert_eq!(rect.dims(), Dims::new(80., 180.));
    /// ```
    #[inline]
    pub fn dims(&self) -> Dims {
        Dims::new(self.width(), self.height())
    }

    /// The area of the rectangle.
    #[inline]
    pub fn area(&self) -> f64 {
        self.dims().area()
    }

    /// Computes the rectangular union of this `Rect` with another `Rect`.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let r1 = Rect::from_sides(0., 0., 100., 200.);
    /// let r2 = Rect::from_sides(-50., 20., 120., 160.);
    /// assert_eq!(r1.union(r2), Rect::from_sides(-50., 0., 120., 200.));
    /// ```
    pub fn union(self, other: Self) -> Self {
        Rect::new(
            Point::new(self.p0.x.min(other.p0.x), self.p0.y.min(other.p0.y)),
            Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y)),
        )
    }

    /// Calculates the rectangular union of all `Option<Rect>`s provided.
    ///
    /// All `None` elements in the iterator are ignored.
    /// If the iterator has no `Some(_)` elements, this function returns [`None`].
    pub fn union_all_option<T>(rects: impl Iterator<Item = T>) -> Option<Self>
    where
        T: Into<Option<Self>>,
    {
        rects
            .filter_map(|r| r.into())
            .fold(None, |acc, r| match acc {
                Some(acc) => Some(acc.union(r)),
                None => Some(r),
            })
    }

    /// Expands the rectangle by `amount` on all sides.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(0., 0., 100., 200.);
    /// assert_eq!(rect.expand_all(20.), Rect::from_sides(-20., -20., 120., 220.));
    /// ```
    #[inline]
    pub fn expand_all(&self, amount: f64) -> Self {
        Self::new(
            Point::new(self.p0.x - amount, self.p0.y - amount),
            Point::new(self.p1.x + amount, self.p1.y + amount),
        )
    }
}

impl Bbox for Rect {
    fn bbox(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl From<[Point; 2]> for Rect {
    fn from(value: [Point; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<Rect> for [Point; 2] {
    fn from(value: Rect) -> Self {
        [value.p0, value.p1]
    }
}
