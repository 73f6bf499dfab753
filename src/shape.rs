//! Internal quantized path and shape representation
//!
//! Engines work on ephemeral `Shape` values: sets of integer-grid paths
//! where exactly one path is the outer boundary and the rest are holes.
//! Roles are derived from the signed-area sign, never inferred from input
//! order, and all orientation/containment arithmetic is exact (`i128`
//! products over `i64` grid coordinates).
//!
//! The clipping engine returns a flat list of rings without nesting
//! information; [`group_shapes`] reassembles shapes by classifying each ring
//! by area sign and attaching each hole to the smallest outer ring that
//! contains it.

use crate::quantize::{dequantize_xy, quantize_xy};

/// A ring or open chain on the integer grid
pub(crate) type GridPath = Vec<(i64, i64)>;

/// Role of one path inside a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathRole {
    /// Outer boundary, counter-clockwise (positive signed area)
    Outer,
    /// Hole boundary, clockwise (negative signed area)
    Hole,
}

/// One oriented path of a shape
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ShapePath {
    /// Role derived from the signed-area sign
    pub role: PathRole,
    /// Grid coordinates, closing edge implicit
    pub points: GridPath,
}

impl ShapePath {
    pub(crate) fn outer(points: GridPath) -> Self {
        Self {
            role: PathRole::Outer,
            points,
        }
    }

    pub(crate) fn hole(points: GridPath) -> Self {
        Self {
            role: PathRole::Hole,
            points,
        }
    }
}

/// A polygon with holes at the clipping level
///
/// The first path is always the outer boundary.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Shape {
    pub paths: Vec<ShapePath>,
}

impl Shape {
    pub(crate) fn new(outer: GridPath) -> Self {
        Self {
            paths: vec![ShapePath::outer(outer)],
        }
    }

    pub(crate) fn push_hole(&mut self, points: GridPath) {
        self.paths.push(ShapePath::hole(points));
    }

    pub(crate) fn outer_points(&self) -> &GridPath {
        &self.paths[0].points
    }

    pub(crate) fn holes(&self) -> impl Iterator<Item = &ShapePath> {
        self.paths.iter().skip(1)
    }

    /// Exact parity test: is the point inside this shape's filled region?
    ///
    /// Even-odd over all rings; a point inside a hole counts as outside.
    pub(crate) fn contains(&self, point: (i64, i64)) -> bool {
        let mut inside = false;
        for path in &self.paths {
            if point_in_ring(point, &path.points) {
                inside = !inside;
            }
        }
        inside
    }
}

/// Exact cross product of `(a - o) × (b - o)`
///
/// Positive when `o → a → b` turns counter-clockwise.
pub(crate) fn cross(o: (i64, i64), a: (i64, i64), b: (i64, i64)) -> i128 {
    let (ox, oy) = o;
    let (ax, ay) = a;
    let (bx, by) = b;
    (ax - ox) as i128 * (by - oy) as i128 - (ay - oy) as i128 * (bx - ox) as i128
}

/// Twice the signed area of a ring (positive for counter-clockwise)
///
/// Exact: every cross product and the running sum are computed in `i128`.
pub(crate) fn signed_area2(points: &[(i64, i64)]) -> i128 {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    let mut sum: i128 = 0;
    for i in 0..n {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % n];
        sum += x0 as i128 * y1 as i128 - x1 as i128 * y0 as i128;
    }
    sum
}

/// Exact even-odd ray cast of a point against one ring
///
/// Casts toward +X and counts proper edge crossings; the comparison against
/// the edge is done with cross-multiplied `i128` terms, never a division.
/// Points exactly on the boundary fall on whichever side the parity count
/// gives; callers that need boundary handling must test separately.
pub(crate) fn point_in_ring(point: (i64, i64), ring: &[(i64, i64)]) -> bool {
    let (px, py) = point;
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    for i in 0..n {
        let (ax, ay) = ring[i];
        let (bx, by) = ring[(i + 1) % n];
        if (ay > py) == (by > py) {
            continue;
        }
        // Crossing iff px is left of the edge's intersection with y = py
        let lhs = (px - ax) as i128 * (by - ay) as i128;
        let rhs = (py - ay) as i128 * (bx - ax) as i128;
        let crosses = if by > ay { lhs < rhs } else { lhs > rhs };
        if crosses {
            inside = !inside;
        }
    }
    inside
}

/// Reassemble a flat ring list into shapes
///
/// Rings with positive signed area become outer boundaries; negative rings
/// become holes attached to the smallest outer ring containing their first
/// vertex. Zero-area rings, and holes no outer ring contains (engine
/// artifacts), are dropped.
pub(crate) fn group_shapes(rings: Vec<GridPath>) -> Vec<Shape> {
    let mut outers: Vec<(GridPath, i128)> = Vec::new();
    let mut holes: Vec<GridPath> = Vec::new();

    for ring in rings {
        let area2 = signed_area2(&ring);
        if area2 > 0 {
            outers.push((ring, area2));
        } else if area2 < 0 {
            holes.push(ring);
        }
    }

    let mut shapes: Vec<Shape> = outers
        .iter()
        .map(|(ring, _)| Shape::new(ring.clone()))
        .collect();

    for hole in holes {
        let Some(&seed) = hole.first() else {
            continue;
        };
        let mut best: Option<(usize, i128)> = None;
        for (i, (ring, area2)) in outers.iter().enumerate() {
            if point_in_ring(seed, ring) {
                match best {
                    Some((_, best_area)) if best_area <= *area2 => {}
                    _ => best = Some((i, *area2)),
                }
            }
        }
        if let Some((i, _)) = best {
            shapes[i].push_hole(hole);
        }
    }

    shapes
}

/// Flatten shapes into the float path lists the clipping engine consumes
pub(crate) fn shapes_to_paths(shapes: &[Shape]) -> Vec<Vec<(f64, f64)>> {
    let mut paths = Vec::new();
    for shape in shapes {
        for path in &shape.paths {
            paths.push(path.points.iter().map(|&q| dequantize_xy(q)).collect());
        }
    }
    paths
}

/// Quantize engine output rings and reassemble them into shapes
///
/// Consecutive points that collapse onto the same grid cell are merged
/// (including the closing wrap pair); rings left with fewer than 3 vertices
/// are quantization slivers and are skipped.
pub(crate) fn paths_from_engine(paths: Vec<Vec<(f64, f64)>>) -> Vec<Shape> {
    let mut rings: Vec<GridPath> = Vec::new();
    for path in paths {
        let ring = dedup_ring(path.into_iter().map(|(x, y)| quantize_xy(x, y)));
        if ring.len() >= 3 {
            rings.push(ring);
        }
    }
    group_shapes(rings)
}

/// Drop consecutive duplicates from a closed ring, including the wrap pair
pub(crate) fn dedup_ring(points: impl IntoIterator<Item = (i64, i64)>) -> GridPath {
    let mut ring: GridPath = Vec::new();
    for q in points {
        if ring.last() != Some(&q) {
            ring.push(q);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}
