//! Rectangle dimensions.

use serde::{Deserialize, Serialize};

use crate::dir::Dir;

/// The width and height of an axis-aligned shape.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Dims {
    w: f64,
    h: f64,
}

impl Dims {
    /// Creates a new [`Dims`] from a width and height.
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    /// The width.
    #[inline]
    pub const fn w(&self) -> f64 {
        self.w
    }

    /// The height.
    #[inline]
    pub const fn h(&self) -> f64 {
        self.h
    }

    /// The extent along direction `dir`.
    pub const fn dim(&self, dir: Dir) -> f64 {
        match dir {
            Dir::Horiz => self.w,
            Dir::Vert => self.h,
        }
    }

    /// The product of width and height.
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// assert_eq!(Dims::new(4., 2.5).area(), 10.);
    /// ```
    #[inline]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Returns the center point of a rectangle of these dimensions
    /// anchored at the origin.
    pub fn center(&self) -> crate::point::Point {
        crate::point::Point::new(self.w / 2., self.h / 2.)
    }
}

impl From<[f64; 2]> for Dims {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<Dims> for [f64; 2] {
    fn from(value: Dims) -> Self {
        [value.w, value.h]
    }
}
