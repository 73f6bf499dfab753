//! In-memory entity store
//!
//! [`Model`] owns the position/wire/polygon/polyline tables that geometry
//! operations read from and append to. It is the explicit context passed
//! into every operation; there is no global state. Operations never mutate
//! or delete existing entities — they only create new ones — so the tables
//! are append-only and ids stay valid for the model's lifetime.

use crate::error::{Error, Result};
use crate::model::entity::{
    Polygon, PolygonId, Polyline, PolylineId, Position, PositionId, Wire, WireId,
};

/// Entity store for planar BREP geometry
///
/// # Example
///
/// ```
/// use brep2d::Model;
///
/// let mut model = Model::new();
/// let square = model
///     .create_polygon_from_coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], &[])
///     .unwrap();
/// assert!((model.polygon_area(square).unwrap() - 100.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Model {
    positions: Vec<Position>,
    wires: Vec<Wire>,
    polygons: Vec<Polygon>,
    polylines: Vec<Polyline>,
}

impl Model {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Positions
    // ------------------------------------------------------------------

    /// Create a new position and return its id
    pub fn create_position(&mut self, x: f64, y: f64, z: f64) -> PositionId {
        self.positions.push(Position::new(x, y, z));
        PositionId(self.positions.len() - 1)
    }

    /// Look up a position by id
    ///
    /// # Errors
    /// Returns [`Error::UnknownEntity`] if the id was not issued by this model.
    pub fn position(&self, id: PositionId) -> Result<&Position> {
        self.positions
            .get(id.0)
            .ok_or_else(|| Error::unknown_entity(id))
    }

    /// Overwrite the coordinates of an existing position
    ///
    /// This is the kernel's coordinate-write capability; the geometry
    /// operations in this crate never call it on their inputs.
    ///
    /// # Errors
    /// Returns [`Error::UnknownEntity`] if the id was not issued by this model.
    pub fn set_position(&mut self, id: PositionId, x: f64, y: f64, z: f64) -> Result<()> {
        let slot = self
            .positions
            .get_mut(id.0)
            .ok_or_else(|| Error::unknown_entity(id))?;
        *slot = Position::new(x, y, z);
        Ok(())
    }

    /// Number of positions in the model
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    // ------------------------------------------------------------------
    // Wires
    // ------------------------------------------------------------------

    /// Create a wire from an ordered position-id list
    ///
    /// A closed wire must not repeat its first position at the end; closure
    /// is implicit in the `closed` flag.
    ///
    /// # Errors
    /// - [`Error::InvalidEntity`] if `positions` is empty
    /// - [`Error::UnknownEntity`] if any referenced position does not exist
    pub fn create_wire(&mut self, positions: Vec<PositionId>, closed: bool) -> Result<WireId> {
        if positions.is_empty() {
            return Err(Error::InvalidEntity(
                "wire requires at least one position".to_string(),
            ));
        }
        for &id in &positions {
            self.position(id)?;
        }
        self.wires.push(Wire::new(positions, closed));
        Ok(WireId(self.wires.len() - 1))
    }

    /// Look up a wire by id
    ///
    /// # Errors
    /// Returns [`Error::UnknownEntity`] if the id was not issued by this model.
    pub fn wire(&self, id: WireId) -> Result<&Wire> {
        self.wires.get(id.0).ok_or_else(|| Error::unknown_entity(id))
    }

    /// Read back a wire's positions projected onto the working plane
    ///
    /// # Errors
    /// Returns [`Error::UnknownEntity`] if the wire does not exist.
    pub fn wire_points(&self, id: WireId) -> Result<Vec<(f64, f64)>> {
        let wire = self.wire(id)?;
        let mut points = Vec::with_capacity(wire.positions.len());
        for &pid in &wire.positions {
            points.push(self.position(pid)?.xy());
        }
        Ok(points)
    }

    /// Number of wires in the model
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    // ------------------------------------------------------------------
    // Polygons
    // ------------------------------------------------------------------

    /// Create a polygon from an outer wire and zero or more hole wires
    ///
    /// Referential integrity is checked here; geometric validity (closure,
    /// vertex minima, winding) is checked by the operations that consume the
    /// polygon.
    ///
    /// # Errors
    /// Returns [`Error::UnknownEntity`] if any referenced wire does not exist.
    pub fn create_polygon(&mut self, outer: WireId, holes: Vec<WireId>) -> Result<PolygonId> {
        self.wire(outer)?;
        for &hole in &holes {
            self.wire(hole)?;
        }
        self.polygons.push(Polygon::new(outer, holes));
        Ok(PolygonId(self.polygons.len() - 1))
    }

    /// Look up a polygon by id
    ///
    /// # Errors
    /// Returns [`Error::UnknownEntity`] if the id was not issued by this model.
    pub fn polygon(&self, id: PolygonId) -> Result<&Polygon> {
        self.polygons
            .get(id.0)
            .ok_or_else(|| Error::unknown_entity(id))
    }

    /// Number of polygons in the model
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Enclosed area of a polygon: outer area minus hole areas
    ///
    /// Computed with the shoelace formula over the working-plane projection.
    /// The result is unsigned regardless of wire winding.
    ///
    /// # Errors
    /// - [`Error::UnknownEntity`] if the polygon does not exist
    /// - [`Error::UnsupportedOperandRole`] if any of its wires is open
    pub fn polygon_area(&self, id: PolygonId) -> Result<f64> {
        let polygon = self.polygon(id)?.clone();
        let mut area = self.ring_area("polygon-area", polygon.outer)?;
        for hole in polygon.holes {
            area -= self.ring_area("polygon-area", hole)?;
        }
        Ok(area)
    }

    fn ring_area(&self, op: &'static str, wire_id: WireId) -> Result<f64> {
        let wire = self.wire(wire_id)?;
        if !wire.closed {
            return Err(Error::operand_role(op, wire_id, "wire is open"));
        }
        let points = self.wire_points(wire_id)?;
        Ok(shoelace(&points).abs())
    }

    // ------------------------------------------------------------------
    // Polylines
    // ------------------------------------------------------------------

    /// Create a polyline wrapping an existing wire
    ///
    /// # Errors
    /// Returns [`Error::UnknownEntity`] if the wire does not exist.
    pub fn create_polyline(&mut self, wire: WireId) -> Result<PolylineId> {
        self.wire(wire)?;
        self.polylines.push(Polyline::new(wire));
        Ok(PolylineId(self.polylines.len() - 1))
    }

    /// Look up a polyline by id
    ///
    /// # Errors
    /// Returns [`Error::UnknownEntity`] if the id was not issued by this model.
    pub fn polyline(&self, id: PolylineId) -> Result<&Polyline> {
        self.polylines
            .get(id.0)
            .ok_or_else(|| Error::unknown_entity(id))
    }

    /// Number of polylines in the model
    pub fn polyline_count(&self) -> usize {
        self.polylines.len()
    }

    // ------------------------------------------------------------------
    // Convenience builders
    // ------------------------------------------------------------------

    /// Create positions, a closed outer wire, closed hole wires, and the
    /// polygon itself from raw working-plane coordinates (z = 0)
    ///
    /// A ring may optionally repeat its first coordinate at the end; the
    /// duplicate closing point is dropped.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEntity`] if any ring has fewer than 3 points
    /// after dropping a duplicated closing point.
    pub fn create_polygon_from_coords(
        &mut self,
        outer: &[(f64, f64)],
        holes: &[&[(f64, f64)]],
    ) -> Result<PolygonId> {
        let outer_wire = self.ring_from_coords(outer)?;
        let mut hole_wires = Vec::with_capacity(holes.len());
        for hole in holes {
            hole_wires.push(self.ring_from_coords(hole)?);
        }
        self.create_polygon(outer_wire, hole_wires)
    }

    /// Create positions, a wire, and the polyline itself from raw
    /// working-plane coordinates (z = 0)
    ///
    /// For closed polylines a duplicated closing point is dropped.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEntity`] if fewer than 2 points remain (3 for
    /// a closed polyline).
    pub fn create_polyline_from_coords(
        &mut self,
        coords: &[(f64, f64)],
        closed: bool,
    ) -> Result<PolylineId> {
        let coords = strip_closing_dup(coords, closed);
        let minimum = if closed { 3 } else { 2 };
        if coords.len() < minimum {
            return Err(Error::InvalidEntity(format!(
                "polyline requires at least {} distinct points, got {}",
                minimum,
                coords.len()
            )));
        }
        let ids: Vec<PositionId> = coords
            .iter()
            .map(|&(x, y)| self.create_position(x, y, 0.0))
            .collect();
        let wire = self.create_wire(ids, closed)?;
        self.create_polyline(wire)
    }

    fn ring_from_coords(&mut self, coords: &[(f64, f64)]) -> Result<WireId> {
        let coords = strip_closing_dup(coords, true);
        if coords.len() < 3 {
            return Err(Error::InvalidEntity(format!(
                "polygon ring requires at least 3 distinct points, got {}",
                coords.len()
            )));
        }
        let ids: Vec<PositionId> = coords
            .iter()
            .map(|&(x, y)| self.create_position(x, y, 0.0))
            .collect();
        self.create_wire(ids, true)
    }
}

/// Drop a repeated closing coordinate from a closed ring/polyline
fn strip_closing_dup(coords: &[(f64, f64)], closed: bool) -> &[(f64, f64)] {
    if closed && coords.len() >= 2 && coords.first() == coords.last() {
        &coords[..coords.len() - 1]
    } else {
        coords
    }
}

/// Signed shoelace area of a closed ring (positive for counter-clockwise)
fn shoelace(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % n];
        sum += x0 * y1 - x1 * y0;
    }
    sum / 2.0
}
