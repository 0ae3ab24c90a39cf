//! 2-D geometric primitives for electrode layouts.
//!
//! Coordinates are real-valued and expressed in micrometers.
//!
//! # Examples
//!
//! Create a [bounding box](crate::rect::Rect) and find its center:
//!
//! ```
//! # use geometry::prelude::*;
//! let rect = Rect::from_sides(10., 20., 30., 40.);
//! assert_eq!(rect.center(), Point::new(20., 30.));
//! ```
#![warn(missing_docs)]

extern crate self as geometry;

pub mod bbox;
pub mod dims;
pub mod dir;
pub mod point;
pub mod polygon;
pub mod prelude;
pub mod rect;
pub mod span;
