//! Delaunay and Voronoi partition adapters
//!
//! No triangulation or Voronoi math lives here. These are pure data
//! bridges: collect distinct sites from model positions, hand them to the
//! external primitive (`delaunator` for triangles, `voronoice` for cells),
//! and resolve the primitive's output back into model polygons.
//!
//! Triangle polygons reference the originating position ids directly; no
//! new positions are created for a triangulation. Voronoi cell vertices are
//! new coordinates and flow through the shared dedup index, so neighboring
//! cells share their edge position ids.

use delaunator::triangulate;
use voronoice::{BoundingBox, VoronoiBuilder};

use crate::adapter::SiteTable;
use crate::error::{Error, Result};
use crate::model::{Model, PolygonId, PositionId};
use crate::quantize::{PositionIndex, dequantize_xy, quantize_xy};
use crate::shape::{GridPath, dedup_ring, signed_area2};

/// Axis-aligned bounding region for Voronoi cell clipping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub min_x: f64,
    /// Bottom edge
    pub min_y: f64,
    /// Right edge
    pub max_x: f64,
    /// Top edge
    pub max_y: f64,
}

impl Rect {
    /// Create a bounding region from its corner coordinates
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    fn validate(&self, op: &'static str) -> Result<()> {
        let edges = [self.min_x, self.min_y, self.max_x, self.max_y];
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(Error::parameter(op, "bounding region must be finite"));
        }
        if self.max_x <= self.min_x || self.max_y <= self.min_y {
            return Err(Error::parameter(
                op,
                format!(
                    "bounding region must have positive extent, got {}x{}",
                    self.max_x - self.min_x,
                    self.max_y - self.min_y
                ),
            ));
        }
        Ok(())
    }

    fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Delaunay triangulation of a point set
///
/// Duplicate points collapse to their first occurrence before the
/// primitive runs (it requires distinct sites). Each output triangle is a
/// polygon whose wire references the three originating position ids in
/// counter-clockwise order.
///
/// # Errors
/// - [`Error::InputArity`] if fewer than 3 point ids are supplied
/// - [`Error::DegenerateGeometry`] if fewer than 3 distinct points remain
///   after quantization, or the primitive returns no triangles (all sites
///   collinear)
///
/// # Example
/// ```
/// use brep2d::{Model, partition};
///
/// let mut model = Model::new();
/// let points = vec![
///     model.create_position(0.0, 0.0, 0.0),
///     model.create_position(10.0, 0.0, 0.0),
///     model.create_position(10.0, 10.0, 0.0),
///     model.create_position(0.0, 10.0, 0.0),
/// ];
/// let triangles = partition::delaunay_triangles(&mut model, &points).unwrap();
/// assert_eq!(triangles.len(), 2);
/// ```
pub fn delaunay_triangles(model: &mut Model, points: &[PositionId]) -> Result<Vec<PolygonId>> {
    if points.len() < 3 {
        return Err(Error::arity("delaunay", 3, points.len()));
    }
    let table = SiteTable::build(model, points)?;
    if table.len() < 3 {
        return Err(Error::degenerate(
            "delaunay",
            format!(
                "only {} distinct point(s) after quantization",
                table.len()
            ),
        ));
    }
    let sites: Vec<delaunator::Point> = table
        .sites
        .iter()
        .map(|&q| {
            let (x, y) = dequantize_xy(q);
            delaunator::Point { x, y }
        })
        .collect();
    let triangulation = triangulate(&sites);
    if triangulation.triangles.is_empty() {
        return Err(Error::degenerate("delaunay", "all distinct points are collinear"));
    }

    let mut ids = Vec::with_capacity(triangulation.triangles.len() / 3);
    for triple in triangulation.triangles.chunks_exact(3) {
        let corners = [
            table.sites[triple[0]],
            table.sites[triple[1]],
            table.sites[triple[2]],
        ];
        let mut owners = [
            table.owners[triple[0]],
            table.owners[triple[1]],
            table.owners[triple[2]],
        ];
        if signed_area2(&corners) < 0 {
            owners.reverse();
        }
        let wire = model.create_wire(owners.to_vec(), true)?;
        ids.push(model.create_polygon(wire, vec![])?);
    }
    Ok(ids)
}

/// Voronoi diagram of a point set, clipped to a bounding region
///
/// One cell polygon per distinct site, returned in input site order.
/// Infinite cells are clipped to `bounds` by the primitive. Cell vertices
/// are new positions shared between neighboring cells through the dedup
/// index.
///
/// A site exactly on the bounding edge may yield a zero-area cell; cells
/// collapsing below 3 distinct quantized vertices are skipped. Sites
/// outside the bounding region are passed through to the primitive as-is.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `bounds` is non-finite or has no extent
/// - [`Error::InputArity`] if fewer than 3 point ids are supplied
/// - [`Error::DegenerateGeometry`] if fewer than 3 distinct points remain
///   after quantization, or the primitive cannot build a diagram (all sites
///   collinear)
pub fn voronoi_cells(
    model: &mut Model,
    points: &[PositionId],
    bounds: Rect,
) -> Result<Vec<PolygonId>> {
    bounds.validate("voronoi")?;
    if points.len() < 3 {
        return Err(Error::arity("voronoi", 3, points.len()));
    }
    let table = SiteTable::build(model, points)?;
    if table.len() < 3 {
        return Err(Error::degenerate(
            "voronoi",
            format!(
                "only {} distinct point(s) after quantization",
                table.len()
            ),
        ));
    }
    let sites: Vec<voronoice::Point> = table
        .sites
        .iter()
        .map(|&q| {
            let (x, y) = dequantize_xy(q);
            voronoice::Point { x, y }
        })
        .collect();
    let center = voronoice::Point {
        x: (bounds.min_x + bounds.max_x) / 2.0,
        y: (bounds.min_y + bounds.max_y) / 2.0,
    };
    let diagram = VoronoiBuilder::default()
        .set_sites(sites)
        .set_bounding_box(BoundingBox::new(center, bounds.width(), bounds.height()))
        .build()
        .ok_or_else(|| {
            Error::degenerate("voronoi", "sites do not span a two-dimensional region")
        })?;

    let mut rings: Vec<GridPath> = Vec::with_capacity(table.len());
    for cell in diagram.iter_cells() {
        let ring: GridPath = cell
            .iter_vertices()
            .map(|v| quantize_xy(v.x, v.y))
            .collect();
        rings.push(dedup_ring(ring));
    }

    let mut index = PositionIndex::new(model);
    let mut ids = Vec::with_capacity(rings.len());
    for mut ring in rings {
        if ring.len() < 3 {
            continue;
        }
        if signed_area2(&ring) < 0 {
            ring.reverse();
        }
        let wire_ids: Vec<PositionId> = ring.iter().map(|&q| index.get_or_create(q)).collect();
        let wire = index.model().create_wire(wire_ids, true)?;
        ids.push(index.model().create_polygon(wire, vec![])?);
    }
    Ok(ids)
}
