//! Convex hull and axis-aligned bounding polygon
//!
//! The hull runs entirely on quantized integer coordinates (Andrew's
//! monotone chain with i128 cross products), so it is exact: no epsilon
//! tuning, no near-collinear ambiguity. The hull polygon's wire references
//! the originating position ids; no new positions are created. Collinear
//! boundary points are excluded, only strict corners survive.

use crate::adapter::{SiteTable, entity_wires};
use crate::error::{Error, Result};
use crate::model::{EntityRef, Model, PolygonId, PositionId};
use crate::quantize::{PositionIndex, quantize_xy};
use crate::shape::cross;

/// Convex hull of a point set
///
/// Duplicate points (and points quantizing onto the same grid cell) are
/// allowed and collapse to their first occurrence. The hull is returned as
/// a polygon whose outer wire references the surviving original position
/// ids in counter-clockwise order, starting from the lexicographically
/// smallest point.
///
/// # Errors
/// - [`Error::InputArity`] if fewer than 3 point ids are supplied
/// - [`Error::DegenerateGeometry`] if fewer than 3 distinct points remain
///   after quantization, or all distinct points are collinear
///
/// # Example
/// ```
/// use brep2d::{Model, hull};
///
/// let mut model = Model::new();
/// let points = vec![
///     model.create_position(0.0, 0.0, 0.0),
///     model.create_position(10.0, 0.0, 0.0),
///     model.create_position(10.0, 10.0, 0.0),
///     model.create_position(0.0, 10.0, 0.0),
///     model.create_position(5.0, 5.0, 0.0), // interior, excluded
/// ];
/// let hull = hull::convex_hull(&mut model, &points).unwrap();
/// let wire = model.polygon(hull).unwrap().outer;
/// assert_eq!(model.wire(wire).unwrap().positions.len(), 4);
/// ```
pub fn convex_hull(model: &mut Model, points: &[PositionId]) -> Result<PolygonId> {
    if points.len() < 3 {
        return Err(Error::arity("convex-hull", 3, points.len()));
    }
    let table = SiteTable::build(model, points)?;
    if table.len() < 3 {
        return Err(Error::degenerate(
            "convex-hull",
            format!(
                "only {} distinct point(s) after quantization",
                table.len()
            ),
        ));
    }
    let mut sites: Vec<((i64, i64), PositionId)> = table
        .sites
        .iter()
        .copied()
        .zip(table.owners.iter().copied())
        .collect();
    sites.sort_by_key(|&(site, _)| site);

    let hull = monotone_chain(&sites);
    if hull.len() < 3 {
        return Err(Error::degenerate(
            "convex-hull",
            "all distinct points are collinear",
        ));
    }
    let ids: Vec<PositionId> = hull.into_iter().map(|(_, id)| id).collect();
    let wire = model.create_wire(ids, true)?;
    model.create_polygon(wire, vec![])
}

/// Axis-aligned bounding rectangle over entity positions
///
/// Scans every position of every wire of the given entities and
/// materializes the bounds as a 4-vertex counter-clockwise polygon with
/// fresh (deduplicated) corner positions.
///
/// # Errors
/// - [`Error::InputArity`] if the entity list is empty
/// - [`Error::DegenerateGeometry`] if all positions fall on one horizontal
///   or vertical grid line (zero-extent bounds)
pub fn bounding_polygon(model: &mut Model, entities: &[EntityRef]) -> Result<PolygonId> {
    if entities.is_empty() {
        return Err(Error::arity("bounding-polygon", 1, 0));
    }
    let mut min_q = (i64::MAX, i64::MAX);
    let mut max_q = (i64::MIN, i64::MIN);
    for &entity in entities {
        for wire_id in entity_wires(model, entity)? {
            for (x, y) in model.wire_points(wire_id)? {
                let (qx, qy) = quantize_xy(x, y);
                min_q.0 = min_q.0.min(qx);
                min_q.1 = min_q.1.min(qy);
                max_q.0 = max_q.0.max(qx);
                max_q.1 = max_q.1.max(qy);
            }
        }
    }
    if min_q.0 == max_q.0 || min_q.1 == max_q.1 {
        return Err(Error::degenerate(
            "bounding-polygon",
            "bounding region has zero extent",
        ));
    }
    let corners = [
        (min_q.0, min_q.1),
        (max_q.0, min_q.1),
        (max_q.0, max_q.1),
        (min_q.0, max_q.1),
    ];
    let mut index = PositionIndex::new(model);
    let ids: Vec<PositionId> = corners.iter().map(|&q| index.get_or_create(q)).collect();
    let wire = index.model().create_wire(ids, true)?;
    index.model().create_polygon(wire, vec![])
}

/// Counter-clockwise hull over sites sorted by (x, y)
///
/// Pops on `cross <= 0`, so collinear chain points are discarded and every
/// surviving vertex is a strict corner.
fn monotone_chain(
    sorted: &[((i64, i64), PositionId)],
) -> Vec<((i64, i64), PositionId)> {
    let mut lower: Vec<((i64, i64), PositionId)> = Vec::new();
    for &entry in sorted {
        while lower.len() >= 2
            && cross(lower[lower.len() - 2].0, lower[lower.len() - 1].0, entry.0) <= 0
        {
            lower.pop();
        }
        lower.push(entry);
    }
    let mut upper: Vec<((i64, i64), PositionId)> = Vec::new();
    for &entry in sorted.iter().rev() {
        while upper.len() >= 2
            && cross(upper[upper.len() - 2].0, upper[upper.len() - 1].0, entry.0) <= 0
        {
            upper.pop();
        }
        upper.push(entry);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
