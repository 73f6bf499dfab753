//! Conversion between model entities and quantized shapes
//!
//! The entity→shape direction validates operands as early as possible:
//! closure, vertex minima, and degeneracy are all checked here before any
//! engine runs. Winding is normalized during conversion (outer rings
//! counter-clockwise, holes clockwise) so engines can rely on it.
//!
//! The shape→entity direction materializes engine results as new model
//! entities. Every output point flows through one call-scoped
//! [`PositionIndex`], so results that share an edge share position ids;
//! paths that collapse below their minimum vertex count are skipped as
//! quantization slivers.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{EntityRef, Model, PolygonId, PolylineId, PositionId, WireId};
use crate::quantize::{PositionIndex, quantize_xy};
use crate::shape::{GridPath, Shape, dedup_ring, signed_area2};

/// Convert one polygon entity into a quantized shape
///
/// The outer wire and every hole wire must be closed and keep at least 3
/// distinct grid vertices after quantization; outer winding is normalized
/// counter-clockwise and holes clockwise.
pub(crate) fn polygon_to_shape(model: &Model, id: PolygonId, op: &'static str) -> Result<Shape> {
    let polygon = model.polygon(id)?;
    let outer = ring_points(model, polygon.outer, id, op)?;
    let mut shape = Shape::new(ensure_winding(outer, true));
    for &hole in &polygon.holes {
        let ring = ring_points(model, hole, id, op)?;
        shape.push_hole(ensure_winding(ring, false));
    }
    Ok(shape)
}

/// Convert a list of polygon entities, one shape per entity
pub(crate) fn polygons_to_shapes(
    model: &Model,
    ids: &[PolygonId],
    op: &'static str,
) -> Result<Vec<Shape>> {
    let mut shapes = Vec::with_capacity(ids.len());
    for &id in ids {
        shapes.push(polygon_to_shape(model, id, op)?);
    }
    Ok(shapes)
}

/// Convert one polyline entity into a quantized path plus its closure flag
pub(crate) fn polyline_to_path(
    model: &Model,
    id: PolylineId,
    op: &'static str,
) -> Result<(GridPath, bool)> {
    let wire_id = model.polyline(id)?.wire;
    let wire = model.wire(wire_id)?;
    let closed = wire.closed;
    let mut path: GridPath = Vec::with_capacity(wire.positions.len());
    for &pid in &wire.positions {
        let (x, y) = model.position(pid)?.xy();
        let q = quantize_xy(x, y);
        if path.last() != Some(&q) {
            path.push(q);
        }
    }
    if closed {
        while path.len() > 1 && path.first() == path.last() {
            path.pop();
        }
    }
    let minimum = if closed { 3 } else { 2 };
    if path.len() < minimum {
        return Err(Error::degenerate(
            op,
            format!(
                "{} keeps fewer than {} distinct vertices after quantization",
                id, minimum
            ),
        ));
    }
    Ok((path, closed))
}

fn ring_points(
    model: &Model,
    wire_id: WireId,
    owner: PolygonId,
    op: &'static str,
) -> Result<GridPath> {
    let wire = model.wire(wire_id)?;
    if !wire.closed {
        return Err(Error::operand_role(
            op,
            owner,
            format!("{} is open; polygon boundaries must be closed", wire_id),
        ));
    }
    let mut points = Vec::with_capacity(wire.positions.len());
    for &pid in &wire.positions {
        let (x, y) = model.position(pid)?.xy();
        points.push(quantize_xy(x, y));
    }
    let ring = dedup_ring(points);
    if ring.len() < 3 {
        return Err(Error::degenerate(
            op,
            format!(
                "{} keeps fewer than 3 distinct vertices after quantization",
                wire_id
            ),
        ));
    }
    Ok(ring)
}

/// Reverse a ring when its winding does not match the requested role
///
/// A ring with exactly zero signed area (a symmetric self-crossing, or a
/// fully collinear ring) has no meaningful winding and passes through
/// unchanged; the engine decides what becomes of it.
fn ensure_winding(mut ring: GridPath, counter_clockwise: bool) -> GridPath {
    let area2 = signed_area2(&ring);
    if area2 != 0 && (area2 > 0) != counter_clockwise {
        ring.reverse();
    }
    ring
}

/// Materialize result shapes as new polygon entities
///
/// All shapes of one call share one dedup index. Shapes whose outer ring
/// lost its minimum vertex count are skipped.
pub(crate) fn emit_polygons(model: &mut Model, shapes: &[Shape]) -> Result<Vec<PolygonId>> {
    let mut index = PositionIndex::new(model);
    let mut ids = Vec::with_capacity(shapes.len());
    for shape in shapes {
        if shape.outer_points().len() < 3 {
            continue;
        }
        let outer_ids: Vec<PositionId> = shape
            .outer_points()
            .iter()
            .map(|&q| index.get_or_create(q))
            .collect();
        let outer = index.model().create_wire(outer_ids, true)?;
        let mut holes = Vec::new();
        for hole in shape.holes() {
            if hole.points.len() < 3 {
                continue;
            }
            let hole_ids: Vec<PositionId> =
                hole.points.iter().map(|&q| index.get_or_create(q)).collect();
            holes.push(index.model().create_wire(hole_ids, true)?);
        }
        ids.push(index.model().create_polygon(outer, holes)?);
    }
    Ok(ids)
}

/// Materialize result paths as new polyline entities
///
/// Fragments that lost their minimum vertex count (2 open, 3 closed) are
/// skipped.
pub(crate) fn emit_polylines(
    model: &mut Model,
    paths: &[(GridPath, bool)],
) -> Result<Vec<PolylineId>> {
    let mut index = PositionIndex::new(model);
    let mut ids = Vec::with_capacity(paths.len());
    for (path, closed) in paths {
        let minimum = if *closed { 3 } else { 2 };
        if path.len() < minimum {
            continue;
        }
        let position_ids: Vec<PositionId> =
            path.iter().map(|&q| index.get_or_create(q)).collect();
        let wire = index.model().create_wire(position_ids, *closed)?;
        ids.push(index.model().create_polyline(wire)?);
    }
    Ok(ids)
}

/// All wires of a wire-bearing entity (outer first for polygons)
pub(crate) fn entity_wires(model: &Model, entity: EntityRef) -> Result<Vec<WireId>> {
    match entity {
        EntityRef::Polygon(id) => {
            let polygon = model.polygon(id)?;
            let mut wires = vec![polygon.outer];
            wires.extend(polygon.holes.iter().copied());
            Ok(wires)
        }
        EntityRef::Polyline(id) => Ok(vec![model.polyline(id)?.wire]),
    }
}

/// Distinct quantized sites with their originating position ids
///
/// Built before invoking a partition primitive, which requires distinct
/// sites. Sites keep first-seen order; `owners[i]` is the first position id
/// that quantized onto `sites[i]`.
pub(crate) struct SiteTable {
    pub sites: Vec<(i64, i64)>,
    pub owners: Vec<PositionId>,
}

impl SiteTable {
    /// Collect distinct quantized sites from a position-id list
    pub(crate) fn build(model: &Model, ids: &[PositionId]) -> Result<Self> {
        let mut seen: HashMap<(i64, i64), usize> = HashMap::new();
        let mut sites = Vec::new();
        let mut owners = Vec::new();
        for &id in ids {
            let (x, y) = model.position(id)?.xy();
            let q = quantize_xy(x, y);
            if !seen.contains_key(&q) {
                seen.insert(q, sites.len());
                sites.push(q);
                owners.push(id);
            }
        }
        Ok(Self { sites, owners })
    }

    /// Number of distinct sites
    pub(crate) fn len(&self) -> usize {
        self.sites.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::PathRole;

    fn square_coords(min: f64, max: f64) -> Vec<(f64, f64)> {
        vec![(min, min), (max, min), (max, max), (min, max)]
    }

    #[test]
    fn test_polygon_to_shape_normalizes_winding() {
        let mut model = Model::new();
        // Clockwise outer, counter-clockwise hole: both get flipped
        let id = model
            .create_polygon_from_coords(
                &[(0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)],
                &[&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)]],
            )
            .unwrap();
        let shape = polygon_to_shape(&model, id, "test").unwrap();
        assert!(signed_area2(shape.outer_points()) > 0);
        let hole = shape.holes().next().unwrap();
        assert_eq!(hole.role, PathRole::Hole);
        assert!(signed_area2(&hole.points) < 0);
    }

    #[test]
    fn test_polygon_to_shape_rejects_open_outer() {
        let mut model = Model::new();
        let a = model.create_position(0.0, 0.0, 0.0);
        let b = model.create_position(10.0, 0.0, 0.0);
        let c = model.create_position(10.0, 10.0, 0.0);
        let open = model.create_wire(vec![a, b, c], false).unwrap();
        let id = model.create_polygon(open, vec![]).unwrap();
        let err = polygon_to_shape(&model, id, "union").unwrap_err();
        assert!(err.to_string().contains("[E2002]"));
        assert!(err.to_string().contains("must be closed"));
    }

    #[test]
    fn test_polygon_to_shape_rejects_collapsed_ring() {
        let mut model = Model::new();
        // Distinct floats that land on the same grid cell
        let id = model
            .create_polygon_from_coords(
                &[(0.0, 0.0), (1e-8, 0.0), (1e-8, 1e-8)],
                &[],
            )
            .unwrap();
        let err = polygon_to_shape(&model, id, "union").unwrap_err();
        assert!(err.to_string().contains("[E3001]"));
    }

    #[test]
    fn test_polyline_to_path_keeps_closure() {
        let mut model = Model::new();
        let open = model
            .create_polyline_from_coords(&[(0.0, 0.0), (5.0, 0.0)], false)
            .unwrap();
        let (path, closed) = polyline_to_path(&model, open, "test").unwrap();
        assert_eq!(path.len(), 2);
        assert!(!closed);

        let ring = model
            .create_polyline_from_coords(&square_coords(0.0, 5.0), true)
            .unwrap();
        let (path, closed) = polyline_to_path(&model, ring, "test").unwrap();
        assert_eq!(path.len(), 4);
        assert!(closed);
    }

    #[test]
    fn test_emit_polygons_shares_edge_positions() {
        let mut model = Model::new();
        // Two unit squares sharing the x = 1 edge
        let left = Shape::new(vec![
            (0, 0),
            (1_000_000, 0),
            (1_000_000, 1_000_000),
            (0, 1_000_000),
        ]);
        let right = Shape::new(vec![
            (1_000_000, 0),
            (2_000_000, 0),
            (2_000_000, 1_000_000),
            (1_000_000, 1_000_000),
        ]);
        let ids = emit_polygons(&mut model, &[left, right]).unwrap();
        assert_eq!(ids.len(), 2);
        // 8 corners minus the 2 shared ones
        assert_eq!(model.position_count(), 6);

        let a = model.polygon(ids[0]).unwrap().outer;
        let b = model.polygon(ids[1]).unwrap().outer;
        let a_ids = model.wire(a).unwrap().positions.clone();
        let b_ids = model.wire(b).unwrap().positions.clone();
        let shared: Vec<_> = a_ids.iter().filter(|id| b_ids.contains(id)).collect();
        assert_eq!(shared.len(), 2);
    }

    #[test]
    fn test_emit_polylines_skips_fragments() {
        let mut model = Model::new();
        let paths = vec![
            (vec![(0, 0), (1_000_000, 0)], false),
            (vec![(5_000_000, 5_000_000)], false),
        ];
        let ids = emit_polylines(&mut model, &paths).unwrap();
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn test_site_table_dedups_by_grid_cell() {
        let mut model = Model::new();
        let a = model.create_position(0.0, 0.0, 0.0);
        let b = model.create_position(1e-8, -1e-8, 0.0); // same grid cell as a
        let c = model.create_position(5.0, 5.0, 0.0);
        let table = SiteTable::build(&model, &[a, b, c]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.owners[0], a);
        assert_eq!(table.owners[1], c);
    }
}
