//! Planar BREP entity types and their ids
//!
//! Entities form a reference hierarchy: polygons and polylines reference
//! wires, wires reference positions. Ids are opaque per-table handles issued
//! by [`Model`](super::Model); an id is only meaningful for the model that
//! issued it.

use std::fmt;

/// Id of a [`Position`] in a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionId(pub(crate) usize);

/// Id of a [`Wire`] in a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub(crate) usize);

/// Id of a [`Polygon`] in a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolygonId(pub(crate) usize);

/// Id of a [`Polyline`] in a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolylineId(pub(crate) usize);

impl PositionId {
    /// Dense table index of this id
    pub fn index(self) -> usize {
        self.0
    }
}

impl WireId {
    /// Dense table index of this id
    pub fn index(self) -> usize {
        self.0
    }
}

impl PolygonId {
    /// Dense table index of this id
    pub fn index(self) -> usize {
        self.0
    }
}

impl PolylineId {
    /// Dense table index of this id
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position#{}", self.0)
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wire#{}", self.0)
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "polygon#{}", self.0)
    }
}

impl fmt::Display for PolylineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "polyline#{}", self.0)
    }
}

/// A point in model space
///
/// Planar operations project onto the working plane by reading only X and Y;
/// Z is stored and carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate (ignored by 2D operations)
    pub z: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Project onto the working plane
    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// An ordered chain of position references, open or closed
///
/// A closed wire connects its last position back to its first implicitly;
/// the closing position is not repeated in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    /// Positions along the wire, in order
    pub positions: Vec<PositionId>,
    /// Whether the wire cycles back to its first position
    pub closed: bool,
}

impl Wire {
    /// Create a new wire
    pub fn new(positions: Vec<PositionId>, closed: bool) -> Self {
        Self { positions, closed }
    }
}

/// A face bounded by one outer wire and zero or more hole wires
///
/// Holes are assumed to lie inside the outer boundary and to be mutually
/// disjoint; this is not enforced at creation time. Operations validate the
/// properties they rely on (closure, vertex minima) on entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Outer boundary wire
    pub outer: WireId,
    /// Hole wires
    pub holes: Vec<WireId>,
}

impl Polygon {
    /// Create a new polygon
    pub fn new(outer: WireId, holes: Vec<WireId>) -> Self {
        Self { outer, holes }
    }
}

/// A standalone curve entity wrapping a single wire
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// The wire carrying the curve's positions
    pub wire: WireId,
}

impl Polyline {
    /// Create a new polyline
    pub fn new(wire: WireId) -> Self {
        Self { wire }
    }
}

/// Reference to any wire-bearing planar entity
///
/// Used by operations that accept mixed entity lists, such as
/// [`bounding_polygon`](crate::hull::bounding_polygon).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A polygon entity
    Polygon(PolygonId),
    /// A polyline entity
    Polyline(PolylineId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Polygon(id) => id.fmt(f),
            EntityRef::Polyline(id) => id.fmt(f),
        }
    }
}

impl From<PolygonId> for EntityRef {
    fn from(id: PolygonId) -> Self {
        EntityRef::Polygon(id)
    }
}

impl From<PolylineId> for EntityRef {
    fn from(id: PolylineId) -> Self {
        EntityRef::Polyline(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(PositionId(7).to_string(), "position#7");
        assert_eq!(WireId(0).to_string(), "wire#0");
        assert_eq!(PolygonId(12).to_string(), "polygon#12");
        assert_eq!(PolylineId(3).to_string(), "polyline#3");
    }

    #[test]
    fn test_position_projection() {
        let p = Position::new(1.5, -2.0, 9.0);
        assert_eq!(p.xy(), (1.5, -2.0));
    }

    #[test]
    fn test_entity_ref_display_matches_inner_id() {
        let r: EntityRef = PolygonId(4).into();
        assert_eq!(r.to_string(), "polygon#4");
        let r: EntityRef = PolylineId(9).into();
        assert_eq!(r.to_string(), "polyline#9");
    }
}
