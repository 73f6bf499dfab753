//! Signed-distance offsetting of polygons and polylines
//!
//! Positive distances grow a region outward, negative distances shrink it.
//! Joint styles control corner treatment ([`JointStyle`]); end-cap styles
//! apply to open polylines only ([`EndStyle`]). A polygon offsets together
//! with its holes in one engine pass, so holes shrink as the solid grows; a
//! polyline offsets into closed ribbon polygons (two-sided for closed
//! wires).
//!
//! Self-intersecting input passes straight through to the engine; whatever
//! the engine makes of it is the result.

use clipper2::*;

use crate::adapter::{emit_polygons, polygon_to_shape, polyline_to_path};
use crate::error::{Error, Result};
use crate::model::{Model, PolygonId, PolylineId};
use crate::quantize::{Micro, SCALE, dequantize_xy};
use crate::shape::{Shape, paths_from_engine, shapes_to_paths};

/// Engine miter limit applied when the joint style carries none of its own
const DEFAULT_MITER_LIMIT: f64 = 2.0;

/// Corner treatment for offset results
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointStyle {
    /// Flatten each corner perpendicular to its angle bisector at the
    /// offset distance
    Square,
    /// Approximate each corner with an arc, deviating from the true arc by
    /// at most `tolerance` (model units, must be positive)
    ///
    /// The engine segments arcs at its own fixed-scale quality, keeping
    /// deviations to a few millionths of a model unit. Any representable
    /// tolerance is therefore met; a coarser tolerance does not reduce the
    /// vertex count.
    Round {
        /// Maximum deviation from the true arc
        tolerance: f64,
    },
    /// Extend the offset edges to their sharp intersection, falling back to
    /// a squared corner once the spike exceeds `limit` times the offset
    /// distance (must be at least 1)
    Mitre {
        /// Spike ratio at which the corner is squared off instead
        limit: f64,
    },
}

/// End-cap treatment for open polyline offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndStyle {
    /// Cut the ribbon square exactly at the path endpoints
    Butt,
    /// Extend the ribbon past each endpoint by the offset distance
    Square,
    /// Cap each endpoint with a semicircular arc
    Round,
}

/// Offset a polygon by a signed distance
///
/// The outer boundary and all holes move together: a positive distance
/// grows the solid region (holes shrink, and may vanish), a negative
/// distance shrinks it (and may consume it entirely, yielding an empty
/// result). One input may split into several output polygons.
///
/// # Example
/// ```
/// use brep2d::{Model, offset, offset::JointStyle};
///
/// let mut model = Model::new();
/// let square = model
///     .create_polygon_from_coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], &[])
///     .unwrap();
/// let grown = offset::offset_polygon(&mut model, square, 2.0, JointStyle::Mitre { limit: 4.0 })
///     .unwrap();
/// assert_eq!(grown.len(), 1);
/// assert!((model.polygon_area(grown[0]).unwrap() - 196.0).abs() < 1e-6);
/// ```
pub fn offset_polygon(
    model: &mut Model,
    polygon: PolygonId,
    distance: f64,
    joint: JointStyle,
) -> Result<Vec<PolygonId>> {
    validate_offset("offset-polygon", distance, joint)?;
    let shape = polygon_to_shape(model, polygon, "offset-polygon")?;
    let result = run_inflate(shapes_to_paths(&[shape]), distance, joint, EndType::Polygon);
    emit_polygons(model, &result)
}

/// Offset a polyline into ribbon polygons
///
/// An open polyline becomes a closed ribbon of width `2 * distance` around
/// the path, capped per `end`; a closed polyline becomes a two-sided ribbon
/// (an annulus for simple rings) and ignores `end`. A non-positive distance
/// on an open polyline has no region to cover and yields an empty result.
pub fn offset_polyline(
    model: &mut Model,
    polyline: PolylineId,
    distance: f64,
    joint: JointStyle,
    end: EndStyle,
) -> Result<Vec<PolygonId>> {
    validate_offset("offset-polyline", distance, joint)?;
    let (path, closed) = polyline_to_path(model, polyline, "offset-polyline")?;
    let end_type = if closed {
        EndType::Joined
    } else {
        match end {
            EndStyle::Butt => EndType::Butt,
            EndStyle::Square => EndType::Square,
            EndStyle::Round => EndType::Round,
        }
    };
    let points: Vec<(f64, f64)> = path.iter().map(|&q| dequantize_xy(q)).collect();
    let result = run_inflate(vec![points], distance, joint, end_type);
    emit_polygons(model, &result)
}

/// Check the numeric offset parameters at entry
fn validate_offset(op: &'static str, distance: f64, joint: JointStyle) -> Result<()> {
    if !distance.is_finite() {
        return Err(Error::parameter(
            op,
            format!("offset distance must be finite, got {}", distance),
        ));
    }
    match joint {
        JointStyle::Round { tolerance } if !(tolerance.is_finite() && tolerance > 0.0) => {
            Err(Error::parameter(
                op,
                format!("round joint tolerance must be positive, got {}", tolerance),
            ))
        }
        JointStyle::Mitre { limit } if !(limit.is_finite() && limit >= 1.0) => {
            Err(Error::parameter(
                op,
                format!("mitre limit must be at least 1, got {}", limit),
            ))
        }
        _ => Ok(()),
    }
}

/// One engine inflate pass over already-normalized paths
fn run_inflate(
    paths: Vec<Vec<(f64, f64)>>,
    distance: f64,
    joint: JointStyle,
    end_type: EndType,
) -> Vec<Shape> {
    let join_type = match joint {
        JointStyle::Square => JoinType::Square,
        JointStyle::Round { .. } => JoinType::Round,
        JointStyle::Mitre { .. } => JoinType::Miter,
    };
    let miter_limit = match joint {
        JointStyle::Mitre { limit } => limit,
        _ => DEFAULT_MITER_LIMIT,
    };
    let subject: Paths<Micro> = paths.into();
    // The engine wrapper multiplies the miter limit by the coordinate
    // multiplier along with the delta; the limit is a dimensionless ratio,
    // so pre-divide to cancel that scaling.
    let result = inflate(subject, distance, join_type, end_type, miter_limit / SCALE);
    let result_paths: Vec<Vec<(f64, f64)>> = result.into();
    paths_from_engine(result_paths)
}
