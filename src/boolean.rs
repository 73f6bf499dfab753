//! Boolean combination of planar entities
//!
//! Closed-polygon operands are delegated to the Clipper2 engine:
//! - Union: fold any number of polygons into an accumulated result
//! - Intersection: overlapping region of two operand sets
//! - Difference: subject minus clip
//! - Symmetric difference: region covered by exactly one operand set
//!
//! Operand winding is normalized by the adapter (outer counter-clockwise,
//! holes clockwise), so every engine call runs under the nonzero fill rule.
//! Results fragment freely: one call may return zero, one, or many
//! polygons, and an empty operand list yields an empty result rather than
//! an error.
//!
//! A polyline may be clipped **against** polygons ([`intersect_polyline`],
//! [`difference_polyline`]) but can never act as the clip side; the clip
//! parameters only accept polygon ids. Open subjects are split exactly at
//! clip-boundary crossings with integer arithmetic and reassembled into new
//! polyline entities.

use clipper2::FillRule;

use crate::adapter::{
    emit_polygons, emit_polylines, polygon_to_shape, polygons_to_shapes, polyline_to_path,
};
use crate::error::{Error, Result};
use crate::model::{Model, PolygonId, PolylineId};
use crate::quantize::Micro;
use crate::shape::{GridPath, Shape, cross, paths_from_engine, shapes_to_paths};

/// Engine operation selector
#[derive(Debug, Clone, Copy)]
enum BooleanOp {
    Union,
    Intersection,
    Difference,
    Xor,
}

/// Union of any number of polygons
///
/// Folds all operands into one accumulated region; overlapping operands
/// merge, disjoint operands stay separate output polygons.
///
/// # Arguments
/// * `model` - The entity store; results are appended to it
/// * `operands` - Polygons to combine (any count, may be empty)
///
/// # Returns
/// Ids of the newly created result polygons. Empty input gives an empty
/// result.
///
/// # Errors
/// Returns an error if an operand is missing, has an open boundary wire, or
/// collapses under quantization.
///
/// # Example
/// ```
/// use brep2d::{Model, boolean};
///
/// let mut model = Model::new();
/// let a = model
///     .create_polygon_from_coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], &[])
///     .unwrap();
/// let b = model
///     .create_polygon_from_coords(&[(5.0, 0.0), (15.0, 0.0), (15.0, 10.0), (5.0, 10.0)], &[])
///     .unwrap();
/// let merged = boolean::union(&mut model, &[a, b]).unwrap();
/// assert_eq!(merged.len(), 1);
/// assert!((model.polygon_area(merged[0]).unwrap() - 150.0).abs() < 1e-6);
/// ```
pub fn union(model: &mut Model, operands: &[PolygonId]) -> Result<Vec<PolygonId>> {
    if operands.is_empty() {
        return Ok(Vec::new());
    }
    let shapes = polygons_to_shapes(model, operands, "union")?;
    let result = run_boolean("union", BooleanOp::Union, &shapes, &[])?;
    emit_polygons(model, &result)
}

/// Intersection of two polygon sets
///
/// # Returns
/// Ids of the newly created polygons covering the region common to both
/// sets. Either set being empty gives an empty result.
pub fn intersection(
    model: &mut Model,
    subjects: &[PolygonId],
    clips: &[PolygonId],
) -> Result<Vec<PolygonId>> {
    if subjects.is_empty() || clips.is_empty() {
        return Ok(Vec::new());
    }
    let subject_shapes = polygons_to_shapes(model, subjects, "intersection")?;
    let clip_shapes = polygons_to_shapes(model, clips, "intersection")?;
    let result = run_boolean(
        "intersection",
        BooleanOp::Intersection,
        &subject_shapes,
        &clip_shapes,
    )?;
    emit_polygons(model, &result)
}

/// Difference of two polygon sets (subjects minus clips)
///
/// A clip fully consuming the subjects legitimately returns an empty list.
/// With no clips at all the result is the union of the subjects.
pub fn difference(
    model: &mut Model,
    subjects: &[PolygonId],
    clips: &[PolygonId],
) -> Result<Vec<PolygonId>> {
    if subjects.is_empty() {
        return Ok(Vec::new());
    }
    let subject_shapes = polygons_to_shapes(model, subjects, "difference")?;
    let result = if clips.is_empty() {
        run_boolean("difference", BooleanOp::Union, &subject_shapes, &[])?
    } else {
        let clip_shapes = polygons_to_shapes(model, clips, "difference")?;
        run_boolean(
            "difference",
            BooleanOp::Difference,
            &subject_shapes,
            &clip_shapes,
        )?
    };
    emit_polygons(model, &result)
}

/// Symmetric difference of two polygon sets
///
/// Covers the region claimed by exactly one of the two sets. With one set
/// empty this degenerates to the union of the other.
pub fn symmetric_difference(
    model: &mut Model,
    subjects: &[PolygonId],
    clips: &[PolygonId],
) -> Result<Vec<PolygonId>> {
    if subjects.is_empty() && clips.is_empty() {
        return Ok(Vec::new());
    }
    if clips.is_empty() {
        let shapes = polygons_to_shapes(model, subjects, "symmetric-difference")?;
        let result = run_boolean("symmetric-difference", BooleanOp::Union, &shapes, &[])?;
        return emit_polygons(model, &result);
    }
    if subjects.is_empty() {
        let shapes = polygons_to_shapes(model, clips, "symmetric-difference")?;
        let result = run_boolean("symmetric-difference", BooleanOp::Union, &shapes, &[])?;
        return emit_polygons(model, &result);
    }
    let subject_shapes = polygons_to_shapes(model, subjects, "symmetric-difference")?;
    let clip_shapes = polygons_to_shapes(model, clips, "symmetric-difference")?;
    let result = run_boolean(
        "symmetric-difference",
        BooleanOp::Xor,
        &subject_shapes,
        &clip_shapes,
    )?;
    emit_polygons(model, &result)
}

/// Split a self-intersecting polygon boundary into simple polygons
///
/// A union against nothing under the nonzero fill rule resolves
/// self-crossings; a boundary that already is simple comes back as a single
/// equivalent polygon.
pub fn resolve_self_intersections(model: &mut Model, polygon: PolygonId) -> Result<Vec<PolygonId>> {
    let shape = polygon_to_shape(model, polygon, "resolve-self-intersections")?;
    let result = run_boolean(
        "resolve-self-intersections",
        BooleanOp::Union,
        &[shape],
        &[],
    )?;
    emit_polygons(model, &result)
}

/// Keep the parts of a polyline inside a polygon region
///
/// The polyline is the subject operand; the region is the union of the clip
/// polygons. The subject is split exactly at region-boundary crossings and
/// the surviving pieces become new polylines. A closed subject that
/// survives in full stays closed.
///
/// # Returns
/// Ids of the newly created polylines; empty when nothing survives or the
/// clip list is empty.
pub fn intersect_polyline(
    model: &mut Model,
    subject: PolylineId,
    clips: &[PolygonId],
) -> Result<Vec<PolylineId>> {
    let (path, closed) = polyline_to_path(model, subject, "intersect-polyline")?;
    if clips.is_empty() {
        return Ok(Vec::new());
    }
    let clip_shapes = polygons_to_shapes(model, clips, "intersect-polyline")?;
    let pieces = clip_open_path(&path, closed, &clip_shapes, true);
    emit_polylines(model, &pieces)
}

/// Keep the parts of a polyline outside a polygon region
///
/// Counterpart of [`intersect_polyline`]; with an empty clip list the whole
/// subject survives (as a new polyline entity).
pub fn difference_polyline(
    model: &mut Model,
    subject: PolylineId,
    clips: &[PolygonId],
) -> Result<Vec<PolylineId>> {
    let (path, closed) = polyline_to_path(model, subject, "difference-polyline")?;
    if clips.is_empty() {
        return emit_polylines(model, &[(path, closed)]);
    }
    let clip_shapes = polygons_to_shapes(model, clips, "difference-polyline")?;
    let pieces = clip_open_path(&path, closed, &clip_shapes, false);
    emit_polylines(model, &pieces)
}

/// Run one engine call over already-normalized shapes
fn run_boolean(
    op_name: &'static str,
    op: BooleanOp,
    subjects: &[Shape],
    clips: &[Shape],
) -> Result<Vec<Shape>> {
    let subject_paths = shapes_to_paths(subjects);
    let clip_paths = shapes_to_paths(clips);
    let result = match op {
        BooleanOp::Union => clipper2::union::<Micro>(subject_paths, clip_paths, FillRule::NonZero),
        BooleanOp::Intersection => {
            clipper2::intersect::<Micro>(subject_paths, clip_paths, FillRule::NonZero)
        }
        BooleanOp::Difference => {
            clipper2::difference::<Micro>(subject_paths, clip_paths, FillRule::NonZero)
        }
        BooleanOp::Xor => clipper2::xor::<Micro>(subject_paths, clip_paths, FillRule::NonZero),
    }
    .map_err(|e| Error::clip_failed(op_name, format!("{:?}", e)))?;
    let result_paths: Vec<Vec<(f64, f64)>> = result.into();
    Ok(paths_from_engine(result_paths))
}

/// Split a subject path at clip-region boundary crossings and keep the
/// pieces on the requested side
///
/// Piece classification samples the piece midpoint against the clip region
/// (union over clip shapes, holes respected). Consecutive kept pieces are
/// stitched back together; for closed subjects the seam pieces merge, and a
/// ring surviving in full is returned closed.
fn clip_open_path(
    path: &[(i64, i64)],
    closed: bool,
    clips: &[Shape],
    keep_inside: bool,
) -> Vec<(GridPath, bool)> {
    let mut clip_edges: Vec<((i64, i64), (i64, i64))> = Vec::new();
    for shape in clips {
        for shape_path in &shape.paths {
            let pts = &shape_path.points;
            for i in 0..pts.len() {
                clip_edges.push((pts[i], pts[(i + 1) % pts.len()]));
            }
        }
    }

    let segment_count = if closed {
        path.len()
    } else {
        path.len().saturating_sub(1)
    };

    let mut runs: Vec<GridPath> = Vec::new();
    let mut current: Option<GridPath> = None;

    for i in 0..segment_count {
        let a = path[i];
        let b = path[(i + 1) % path.len()];
        let mut params = vec![0.0f64, 1.0];
        for &(c, d) in &clip_edges {
            if let Some(t) = crossing_parameter(a, b, c, d) {
                params.push(t);
            }
        }
        params.sort_by(f64::total_cmp);
        params.dedup_by(|x, y| (*x - *y).abs() < 1e-12);

        for window in params.windows(2) {
            let (t0, t1) = (window[0], window[1]);
            let start = point_at(a, b, t0);
            let end = point_at(a, b, t1);
            if start == end {
                continue;
            }
            let mid = point_at(a, b, 0.5 * (t0 + t1));
            let inside = clips.iter().any(|shape| shape.contains(mid));
            if inside != keep_inside {
                if let Some(run) = current.take() {
                    runs.push(run);
                }
                continue;
            }
            match current.as_mut() {
                Some(run) if run.last() == Some(&start) => run.push(end),
                _ => {
                    if let Some(run) = current.take() {
                        runs.push(run);
                    }
                    current = Some(vec![start, end]);
                }
            }
        }
    }
    if let Some(run) = current.take() {
        runs.push(run);
    }

    // A closed subject's first and last runs may be two halves of one piece
    // split at the seam
    if closed && runs.len() >= 2 {
        let seam = runs
            .first()
            .zip(runs.last())
            .map(|(first, last)| first.first() == last.last())
            .unwrap_or(false);
        if seam {
            if let Some(mut merged) = runs.pop() {
                merged.extend(runs[0].iter().skip(1).copied());
                runs[0] = merged;
            }
        }
    }

    runs.into_iter()
        .map(|mut run| {
            let full_ring = closed && run.len() > 1 && run.first() == run.last();
            if full_ring {
                run.pop();
            }
            (run, full_ring)
        })
        .collect()
}

/// Parameter along `a → b` of a proper crossing with edge `c → d`
///
/// Only strict sign changes on both segments count; touch and collinear
/// overlap cases yield `None` and are resolved by piece-midpoint parity
/// instead.
fn crossing_parameter(
    a: (i64, i64),
    b: (i64, i64),
    c: (i64, i64),
    d: (i64, i64),
) -> Option<f64> {
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    if d1 == 0 || d2 == 0 || (d1 > 0) == (d2 > 0) {
        return None;
    }
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if d3 == 0 || d4 == 0 || (d3 > 0) == (d4 > 0) {
        return None;
    }
    Some(d1 as f64 / (d1 - d2) as f64)
}

/// Interpolate along a grid segment, snapping the result to the grid
fn point_at(a: (i64, i64), b: (i64, i64), t: f64) -> (i64, i64) {
    if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        let x = a.0 as f64 + t * (b.0 - a.0) as f64;
        let y = a.1 as f64 + t * (b.1 - a.1) as f64;
        (x.round() as i64, y.round() as i64)
    }
}
