//! Shared utilities for geometry operation tests
//!
//! Builders and measurement helpers used across the integration test
//! files. Everything here goes through the public crate surface only.

#![allow(dead_code)]

use brep2d::{Model, PolygonId, PolylineId};

/// Create an axis-aligned rectangle polygon
pub fn rect(model: &mut Model, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> PolygonId {
    model
        .create_polygon_from_coords(
            &[
                (min_x, min_y),
                (max_x, min_y),
                (max_x, max_y),
                (min_x, max_y),
            ],
            &[],
        )
        .unwrap()
}

/// Create a square polygon spanning `[min, max]` on both axes
pub fn square(model: &mut Model, min: f64, max: f64) -> PolygonId {
    rect(model, min, min, max, max)
}

/// Create an open polyline from raw coordinates
pub fn open_polyline(model: &mut Model, coords: &[(f64, f64)]) -> PolylineId {
    model.create_polyline_from_coords(coords, false).unwrap()
}

/// Sum of enclosed areas over a result id list
pub fn total_area(model: &Model, ids: &[PolygonId]) -> f64 {
    ids.iter().map(|&id| model.polygon_area(id).unwrap()).sum()
}

/// Vertex count of a polygon's outer wire
pub fn outer_vertex_count(model: &Model, id: PolygonId) -> usize {
    let wire = model.polygon(id).unwrap().outer;
    model.wire(wire).unwrap().positions.len()
}

/// Total length of a polyline's wire
pub fn polyline_length(model: &Model, id: PolylineId) -> f64 {
    let wire = model.polyline(id).unwrap().wire;
    let points = model.wire_points(wire).unwrap();
    let closed = model.wire(wire).unwrap().closed;
    let mut length = 0.0;
    let segments = if closed {
        points.len()
    } else {
        points.len().saturating_sub(1)
    };
    for i in 0..segments {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % points.len()];
        length += (x1 - x0).hypot(y1 - y0);
    }
    length
}
