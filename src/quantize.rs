//! Coordinate quantization and position deduplication
//!
//! All planar operations run on a fixed integer grid so downstream
//! arithmetic (signed areas, orientation tests, containment) is exact.
//! Working-plane coordinates are quantized with [`quantize`] on the way in
//! and dequantized with [`dequantize`] on the way out, symmetrically for one
//! whole pipeline call.
//!
//! The [`Micro`] scaler gives the clipping engine the same multiplier, so a
//! coordinate handed over as a dequantized float is re-scaled to the
//! identical grid integer inside the engine and no precision is lost across
//! the boundary. Distances stay in model units everywhere; the engine
//! scales them with the same factor.

use std::collections::HashMap;

use clipper2::PointScaler;

use crate::model::{Model, PositionId};

/// Units per model unit on the integer grid (micro-unit resolution)
///
/// Fixed per build. Coordinates with `|c| * SCALE` beyond the `i64` range
/// are outside the supported coordinate range; this is a documented
/// limitation and is not range-checked on every call.
pub const SCALE: f64 = 1_000_000.0;

/// Point scaler handing the micro-unit grid to the clipping engine
#[derive(Debug, Default, Copy, Clone, PartialEq, Hash)]
pub struct Micro;

impl PointScaler for Micro {
    const MULTIPLIER: f64 = SCALE;
}

/// Quantize one coordinate onto the integer grid
pub fn quantize(c: f64) -> i64 {
    (c * SCALE).round() as i64
}

/// Dequantize one grid coordinate back to model units
pub fn dequantize(q: i64) -> f64 {
    q as f64 / SCALE
}

/// Quantize a working-plane point
pub fn quantize_xy(x: f64, y: f64) -> (i64, i64) {
    (quantize(x), quantize(y))
}

/// Dequantize a working-plane point
pub fn dequantize_xy(q: (i64, i64)) -> (f64, f64) {
    (dequantize(q.0), dequantize(q.1))
}

/// Per-call index from quantized coordinates to model position ids
///
/// Guarantees at most one position id per distinct quantized coordinate
/// within one operation call, so adjoining output polygons that share an
/// edge also share position ids. The index lives only for one call; it
/// borrows the model mutably and appends positions as needed.
pub(crate) struct PositionIndex<'m> {
    model: &'m mut Model,
    map: HashMap<(i64, i64), PositionId>,
}

impl<'m> PositionIndex<'m> {
    /// Create an empty index over a model
    pub(crate) fn new(model: &'m mut Model) -> Self {
        Self {
            model,
            map: HashMap::new(),
        }
    }

    /// Return the position id for a quantized coordinate, creating the
    /// position (at the dequantized coordinate, z = 0) on first sight
    pub(crate) fn get_or_create(&mut self, q: (i64, i64)) -> PositionId {
        if let Some(&id) = self.map.get(&q) {
            return id;
        }
        let (x, y) = dequantize_xy(q);
        let id = self.model.create_position(x, y, 0.0);
        self.map.insert(q, id);
        id
    }

    /// Access the underlying model
    pub(crate) fn model(&mut self) -> &mut Model {
        self.model
    }
}
