//! Vertex welding and redundant-point removal
//!
//! Two passes over a wire's vertex chain, both driven by one distance
//! tolerance. Pass 1 welds: a vertex within `tolerance` of the last kept
//! vertex is dropped, and for closed wires the wrap-around pair is welded
//! the same way. Pass 2 simplifies: Douglas-Peucker removes every vertex
//! whose omission keeps the remaining edges within `tolerance` of the
//! original path; closed wires are split at the vertex farthest from the
//! start and each half is simplified on its own.
//!
//! Cleanup never moves or creates positions. Surviving vertices keep their
//! original position ids; only a new wire and a new entity are created.

use crate::error::{Error, Result};
use crate::model::{Model, PolygonId, PolylineId, PositionId, WireId};

/// A chain vertex: its model id plus the working-plane coordinate
type ChainPoint = (PositionId, (f64, f64));

/// Clean a polyline
///
/// The result is a new polyline with the same closure as the input,
/// referencing the surviving original positions.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `tolerance` is not a positive finite
///   number
/// - [`Error::DegenerateGeometry`] if cleaning collapses the wire below 2
///   vertices (3 for a closed polyline)
///
/// # Example
/// ```
/// use brep2d::{Model, cleanup};
///
/// let mut model = Model::new();
/// let line = model
///     .create_polyline_from_coords(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)], false)
///     .unwrap();
/// let cleaned = cleanup::clean_polyline(&mut model, line, 0.01).unwrap();
/// let wire = model.polyline(cleaned).unwrap().wire;
/// assert_eq!(model.wire(wire).unwrap().positions.len(), 2);
/// ```
pub fn clean_polyline(
    model: &mut Model,
    polyline: PolylineId,
    tolerance: f64,
) -> Result<PolylineId> {
    validate_tolerance("clean-polyline", tolerance)?;
    let wire_id = model.polyline(polyline)?.wire;
    let closed = model.wire(wire_id)?.closed;
    let ids = cleaned_chain(model, wire_id, tolerance, "clean-polyline")?;
    let wire = model.create_wire(ids, closed)?;
    model.create_polyline(wire)
}

/// Clean a polygon
///
/// The outer wire and every hole wire are cleaned independently; the
/// result is a new polygon over new wires referencing the surviving
/// original positions.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `tolerance` is not a positive finite
///   number
/// - [`Error::UnsupportedOperandRole`] if any boundary wire is open
/// - [`Error::DegenerateGeometry`] if any ring collapses below 3 vertices
pub fn clean_polygon(
    model: &mut Model,
    polygon: PolygonId,
    tolerance: f64,
) -> Result<PolygonId> {
    validate_tolerance("clean-polygon", tolerance)?;
    let source = model.polygon(polygon)?.clone();
    let outer = clean_ring(model, source.outer, polygon, tolerance)?;
    let mut holes = Vec::with_capacity(source.holes.len());
    for &hole in &source.holes {
        holes.push(clean_ring(model, hole, polygon, tolerance)?);
    }
    model.create_polygon(outer, holes)
}

fn clean_ring(
    model: &mut Model,
    wire_id: WireId,
    owner: PolygonId,
    tolerance: f64,
) -> Result<WireId> {
    if !model.wire(wire_id)?.closed {
        return Err(Error::operand_role(
            "clean-polygon",
            owner,
            format!("{} is open; polygon boundaries must be closed", wire_id),
        ));
    }
    let ids = cleaned_chain(model, wire_id, tolerance, "clean-polygon")?;
    model.create_wire(ids, true)
}

/// Check the cleanup tolerance at entry
fn validate_tolerance(op: &'static str, tolerance: f64) -> Result<()> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(Error::parameter(
            op,
            format!(
                "tolerance must be a positive finite number, got {}",
                tolerance
            ),
        ));
    }
    Ok(())
}

/// Weld then simplify one wire's chain, returning the surviving ids
fn cleaned_chain(
    model: &Model,
    wire_id: WireId,
    tolerance: f64,
    op: &'static str,
) -> Result<Vec<PositionId>> {
    let wire = model.wire(wire_id)?;
    let closed = wire.closed;
    let mut chain: Vec<ChainPoint> = Vec::with_capacity(wire.positions.len());
    for &pid in &wire.positions {
        chain.push((pid, model.position(pid)?.xy()));
    }

    let minimum = if closed { 3 } else { 2 };
    let welded = weld(&chain, closed, tolerance);
    if welded.len() < minimum {
        return Err(collapse_error(op, wire_id, minimum, tolerance));
    }
    let simplified = if closed {
        simplify_closed(&welded, tolerance)
    } else {
        douglas_peucker(&welded, tolerance)
    };
    if simplified.len() < minimum {
        return Err(collapse_error(op, wire_id, minimum, tolerance));
    }
    Ok(simplified.into_iter().map(|(id, _)| id).collect())
}

fn collapse_error(
    op: &'static str,
    wire_id: WireId,
    minimum: usize,
    tolerance: f64,
) -> Error {
    Error::degenerate(
        op,
        format!(
            "{} collapsed below {} vertices at tolerance {}",
            wire_id, minimum, tolerance
        ),
    )
}

/// Drop every vertex within `tolerance` of the last kept vertex
fn weld(chain: &[ChainPoint], closed: bool, tolerance: f64) -> Vec<ChainPoint> {
    let mut kept: Vec<ChainPoint> = Vec::with_capacity(chain.len());
    for &entry in chain {
        match kept.last() {
            Some(&(_, last)) if distance(last, entry.1) <= tolerance => {}
            _ => kept.push(entry),
        }
    }
    if closed {
        // Wrap-around weld: the seam pair collapses onto the first vertex
        while kept.len() > 1 && distance(kept[0].1, kept[kept.len() - 1].1) <= tolerance {
            kept.pop();
        }
    }
    kept
}

/// Douglas-Peucker over an open chain; endpoints always survive
fn douglas_peucker(points: &[ChainPoint], tolerance: f64) -> Vec<ChainPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let first = points[0];
    let last = points[points.len() - 1];
    let mut max_dist = 0.0;
    let mut max_idx = 0;
    for (i, &(_, p)) in points
        .iter()
        .enumerate()
        .skip(1)
        .take(points.len() - 2)
    {
        let d = perpendicular_distance(p, first.1, last.1);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }
    if max_dist > tolerance {
        let mut left = douglas_peucker(&points[..=max_idx], tolerance);
        let right = douglas_peucker(&points[max_idx..], tolerance);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Simplify a closed chain by splitting at the vertex farthest from the
/// start and running the open simplification on each half
fn simplify_closed(points: &[ChainPoint], tolerance: f64) -> Vec<ChainPoint> {
    let anchor = points[0].1;
    let mut split = 1;
    let mut max_dist = 0.0;
    for (i, &(_, p)) in points.iter().enumerate().skip(1) {
        let d = distance(anchor, p);
        if d > max_dist {
            max_dist = d;
            split = i;
        }
    }
    let mut ring = douglas_peucker(&points[..=split], tolerance);
    let mut back_half: Vec<ChainPoint> = points[split..].to_vec();
    back_half.push(points[0]);
    let back_half = douglas_peucker(&back_half, tolerance);
    ring.extend(back_half[1..back_half.len() - 1].iter().copied());
    ring
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Distance from `p` to the infinite line through `a` and `b`
fn perpendicular_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return distance(p, a);
    }
    ((p.0 - a.0) * dy - (p.1 - a.1) * dx).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_collinear_middle_point() {
        let mut model = Model::new();
        let line = model
            .create_polyline_from_coords(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)], false)
            .unwrap();
        let original = model.wire(model.polyline(line).unwrap().wire).unwrap().positions.clone();
        let count_before = model.position_count();

        let cleaned = clean_polyline(&mut model, line, 0.01).unwrap();
        let kept = model
            .wire(model.polyline(cleaned).unwrap().wire)
            .unwrap()
            .positions
            .clone();
        assert_eq!(kept, vec![original[0], original[2]]);
        // Cleanup reuses positions, it creates none
        assert_eq!(model.position_count(), count_before);
    }

    #[test]
    fn test_clean_welds_near_duplicate() {
        let mut model = Model::new();
        let line = model
            .create_polyline_from_coords(&[(0.0, 0.0), (0.005, 0.0), (10.0, 5.0)], false)
            .unwrap();
        let cleaned = clean_polyline(&mut model, line, 0.01).unwrap();
        let wire = model.polyline(cleaned).unwrap().wire;
        assert_eq!(model.wire(wire).unwrap().positions.len(), 2);
        // The first vertex of a welded run survives
        assert_eq!(model.wire_points(wire).unwrap()[0], (0.0, 0.0));
    }

    #[test]
    fn test_clean_keeps_real_corner() {
        let mut model = Model::new();
        let line = model
            .create_polyline_from_coords(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)], false)
            .unwrap();
        let cleaned = clean_polyline(&mut model, line, 0.01).unwrap();
        let wire = model.polyline(cleaned).unwrap().wire;
        assert_eq!(model.wire(wire).unwrap().positions.len(), 3);
    }

    #[test]
    fn test_clean_tolerance_scales_with_deviation() {
        let mut model = Model::new();
        // Middle point deviates 0.5 from the straight line
        let line = model
            .create_polyline_from_coords(&[(0.0, 0.0), (5.0, 0.5), (10.0, 0.0)], false)
            .unwrap();
        let kept = clean_polyline(&mut model, line, 0.1).unwrap();
        let wire = model.polyline(kept).unwrap().wire;
        assert_eq!(model.wire(wire).unwrap().positions.len(), 3);

        let dropped = clean_polyline(&mut model, line, 1.0).unwrap();
        let wire = model.polyline(dropped).unwrap().wire;
        assert_eq!(model.wire(wire).unwrap().positions.len(), 2);
    }

    #[test]
    fn test_clean_closed_polyline_welds_the_seam() {
        let mut model = Model::new();
        let ring = model
            .create_polyline_from_coords(
                &[
                    (0.0, 0.0),
                    (10.0, 0.0),
                    (10.0, 10.0),
                    (0.0, 10.0),
                    (0.005, 0.005),
                ],
                true,
            )
            .unwrap();
        let cleaned = clean_polyline(&mut model, ring, 0.01).unwrap();
        let wire = model.polyline(cleaned).unwrap().wire;
        assert_eq!(model.wire(wire).unwrap().positions.len(), 4);
        assert!(model.wire(wire).unwrap().closed);
    }

    #[test]
    fn test_clean_polygon_simplifies_all_rings() {
        let mut model = Model::new();
        let id = model
            .create_polygon_from_coords(
                &[
                    (0.0, 0.0),
                    (5.0, 0.0),
                    (10.0, 0.0),
                    (10.0, 10.0),
                    (0.0, 10.0),
                ],
                &[&[
                    (2.0, 2.0),
                    (4.0, 2.0),
                    (4.0, 3.0),
                    (4.0, 4.0),
                    (2.0, 4.0),
                ]],
            )
            .unwrap();
        let cleaned = clean_polygon(&mut model, id, 0.01).unwrap();
        let polygon = model.polygon(cleaned).unwrap().clone();
        assert_eq!(model.wire(polygon.outer).unwrap().positions.len(), 4);
        assert_eq!(model.wire(polygon.holes[0]).unwrap().positions.len(), 4);
        assert!((model.polygon_area(cleaned).unwrap() - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_clean_rejects_non_positive_tolerance() {
        let mut model = Model::new();
        let line = model
            .create_polyline_from_coords(&[(0.0, 0.0), (10.0, 0.0)], false)
            .unwrap();
        let err = clean_polyline(&mut model, line, 0.0).unwrap_err();
        assert!(err.to_string().contains("[E2003]"));
        let err = clean_polyline(&mut model, line, -1.0).unwrap_err();
        assert!(err.to_string().contains("[E2003]"));
    }

    #[test]
    fn test_clean_collapse_is_an_error() {
        let mut model = Model::new();
        let line = model
            .create_polyline_from_coords(
                &[(0.0, 0.0), (0.001, 0.001), (0.002, 0.0)],
                false,
            )
            .unwrap();
        let err = clean_polyline(&mut model, line, 0.01).unwrap_err();
        assert!(err.to_string().contains("[E3001]"));
        assert!(err.to_string().contains("collapsed"));
    }

    #[test]
    fn test_clean_polygon_rejects_open_boundary() {
        let mut model = Model::new();
        let a = model.create_position(0.0, 0.0, 0.0);
        let b = model.create_position(10.0, 0.0, 0.0);
        let c = model.create_position(10.0, 10.0, 0.0);
        let open = model.create_wire(vec![a, b, c], false).unwrap();
        let polygon = model.create_polygon(open, vec![]).unwrap();
        let err = clean_polygon(&mut model, polygon, 0.01).unwrap_err();
        assert!(err.to_string().contains("[E2002]"));
    }

    #[test]
    fn test_clean_tiny_closed_ring_collapses() {
        let mut model = Model::new();
        let id = model
            .create_polygon_from_coords(
                &[(0.0, 0.0), (0.001, 0.0), (0.001, 0.001), (0.0, 0.001)],
                &[],
            )
            .unwrap();
        let err = clean_polygon(&mut model, id, 0.01).unwrap_err();
        assert!(err.to_string().contains("[E3001]"));
    }
}
