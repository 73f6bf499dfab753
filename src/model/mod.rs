//! Data structures representing the planar BREP model

// Declare all submodules
mod entity;
mod store;

// Re-export all public types from entity module
pub use entity::{
    EntityRef, Polygon, PolygonId, Polyline, PolylineId, Position, PositionId, Wire, WireId,
};

// Re-export the store
pub use store::Model;
