//! # brep2d
//!
//! 2D polygon geometry for planar boundary-representation (BREP) models.
//!
//! This library provides boolean combination, offsetting, convex hulls,
//! Delaunay/Voronoi partitioning, and vertex cleanup over polygons and
//! polylines held in an in-memory entity store. Inputs are quantized onto a
//! fixed integer grid before any geometry runs, so coincident results
//! deduplicate exactly and every orientation test is exact integer
//! arithmetic.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Union, intersection, difference, and symmetric difference of polygons
//! - Polyline clipping against polygon regions
//! - Signed-distance offsetting with square, round, and mitre joints
//! - Convex hull and axis-aligned bounding polygon
//! - Delaunay triangle and Voronoi cell adapters (`partition` feature)
//! - Vertex welding and Douglas-Peucker simplification
//!
//! ## Example
//!
//! ```
//! use brep2d::{Model, boolean};
//!
//! # fn main() -> Result<(), brep2d::Error> {
//! let mut model = Model::new();
//! let a = model.create_polygon_from_coords(
//!     &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
//!     &[],
//! )?;
//! let b = model.create_polygon_from_coords(
//!     &[(5.0, 0.0), (15.0, 0.0), (15.0, 10.0), (5.0, 10.0)],
//!     &[],
//! )?;
//!
//! let merged = boolean::union(&mut model, &[a, b])?;
//! assert_eq!(merged.len(), 1);
//! assert!((model.polygon_area(merged[0])? - 150.0).abs() < 1e-6);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod boolean;
pub mod cleanup;
pub mod error;
pub mod hull;
pub mod model;
pub mod offset;
#[cfg(feature = "partition")]
pub mod partition;
pub mod quantize;
mod adapter;
mod shape;

pub use error::{Error, Result};
pub use model::{
    EntityRef, Model, Polygon, PolygonId, Polyline, PolylineId, Position, PositionId, Wire,
    WireId,
};
pub use offset::{EndStyle, JointStyle};
#[cfg(feature = "partition")]
pub use partition::Rect;
