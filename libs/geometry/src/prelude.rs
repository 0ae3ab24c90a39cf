//! An import prelude that re-exports commonly used items.

pub use crate::bbox::Bbox;
pub use crate::dims::Dims;
pub use crate::dir::Dir;
pub use crate::point::Point;
pub use crate::polygon::Polygon;
pub use crate::rect::Rect;
pub use crate::span::Span;
