use geometry::prelude::*;

use crate::extract::PolygonRecord;

mod filter;
mod io;
mod mapping;
mod normalize;

/// A 64-vertex electrode of diameter 30 centered at `(x, y)`.
pub(crate) fn electrode(x: f64, y: f64) -> PolygonRecord {
    PolygonRecord {
        vertex_count: 64,
        layer: 2,
        bounding_box: Rect::from_sides(x - 15., y - 15., x + 15., y + 15.),
        area: Some(std::f64::consts::PI * 15. * 15.),
    }
}

/// A rectangular pad of side 40 centered at `(x, y)`.
pub(crate) fn pad(x: f64, y: f64) -> PolygonRecord {
    PolygonRecord {
        vertex_count: 4,
        layer: 2,
        bounding_box: Rect::from_sides(x - 20., y - 20., x + 20., y + 20.),
        area: Some(1600.),
    }
}

/// The points of a `nx` by `ny` grid with the given pitch and lower-left corner.
pub(crate) fn grid_points(origin: Point, pitch: f64, nx: usize, ny: usize) -> Vec<Point> {
    (0..ny)
        .flat_map(|j| {
            (0..nx).map(move |i| {
                Point::new(origin.x + i as f64 * pitch, origin.y + j as f64 * pitch)
            })
        })
        .collect()
}
