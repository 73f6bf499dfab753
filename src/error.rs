//! Error types for 2D geometry operations
//!
//! This module provides error handling for every operation in the crate.
//! All errors include error codes for categorization and carry the operation
//! name, the offending argument where one exists, and a reason.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: entity store errors (unknown ids, invalid entity construction)
//! - **E2xxx**: operand and parameter errors
//! - **E3xxx**: geometric degeneracy and precision errors
//! - **E4xxx**: external clipping engine failures
//!
//! ## Common Error Codes
//!
//! - `E1001`: unknown entity id
//! - `E1002`: invalid entity construction
//! - `E2001`: too few inputs for an operation
//! - `E2002`: entity supplied in a role it cannot fill
//! - `E2003`: invalid numeric parameter
//! - `E3001`: degenerate geometry
//! - `E3002`: coordinate outside the quantization range
//! - `E4001`: clipping engine failure
//!
//! A boolean operation that legitimately produces no output (for example a
//! difference that fully consumes its subject) is **not** an error; such
//! operations return an empty id list.

use thiserror::Error;

/// Result type for 2D geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during 2D geometry operations
#[derive(Error, Debug)]
pub enum Error {
    /// An entity id was not found in the model
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Id issued by a different model instance
    /// - Id of the wrong entity class passed through untyped code
    #[error("[E1001] Unknown entity: {0}")]
    UnknownEntity(String),

    /// An entity could not be constructed from the given parts
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Wire creation from an empty position list
    /// - Polygon creation referencing a wire that does not exist
    #[error("[E1002] Invalid entity: {0}")]
    InvalidEntity(String),

    /// Fewer inputs were supplied than the operation requires
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Convex hull of fewer than 3 points
    /// - Triangulation of fewer than 3 sites
    /// - Bounding polygon of an empty entity list
    #[error("[E2001] Operation '{op}' requires at least {needed} input(s), got {got}")]
    InputArity {
        /// Name of the operation that rejected its inputs
        op: &'static str,
        /// Minimum number of inputs the operation accepts
        needed: usize,
        /// Number of inputs actually supplied
        got: usize,
    },

    /// An entity was supplied in a role it cannot fill
    ///
    /// **Error Code**: E2002
    ///
    /// **Common Causes**:
    /// - An open wire used as a polygon boundary
    /// - A polygon outer or hole wire with fewer than 3 positions
    #[error("[E2002] Operation '{op}' cannot use {entity}: {reason}")]
    UnsupportedOperandRole {
        /// Name of the operation that rejected the operand
        op: &'static str,
        /// Rendered id of the offending entity
        entity: String,
        /// Why the entity cannot fill the role
        reason: String,
    },

    /// A numeric parameter was out of range or not finite
    ///
    /// **Error Code**: E2003
    ///
    /// **Common Causes**:
    /// - Zero or negative tolerance
    /// - Mitre limit below 1
    /// - Non-finite offset distance
    #[error("[E2003] Operation '{op}': invalid parameter: {reason}")]
    InvalidParameter {
        /// Name of the operation that rejected the parameter
        op: &'static str,
        /// Which parameter failed and why
        reason: String,
    },

    /// Input geometry is degenerate for the requested operation
    ///
    /// **Error Code**: E3001
    ///
    /// **Common Causes**:
    /// - All hull/triangulation sites collinear or coincident
    /// - Cleanup collapsing a wire below its minimum vertex count
    /// - Zero-extent bounding region
    #[error("[E3001] Operation '{op}': degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// Name of the operation that detected the degeneracy
        op: &'static str,
        /// What degenerated and how
        reason: String,
    },

    /// A coordinate does not fit the fixed quantization scale
    ///
    /// **Error Code**: E3002
    ///
    /// Coordinates are quantized onto a fixed integer grid before clipping;
    /// magnitudes near `i64::MAX / SCALE` are outside the supported range.
    /// This is a documented limitation: coordinates are not range-scanned on
    /// every call, and the error surfaces only where the condition is
    /// detected as a side effect of other work.
    #[error("[E3002] Operation '{op}': coordinate outside quantization range: {reason}")]
    PrecisionOverflow {
        /// Name of the operation that hit the limit
        op: &'static str,
        /// Which coordinate overflowed
        reason: String,
    },

    /// The external clipping engine reported a failure
    ///
    /// **Error Code**: E4001
    ///
    /// **Common Causes**:
    /// - Pathological self-intersections the engine cannot resolve
    /// - Coordinate range problems inside the engine
    #[error("[E4001] Operation '{op}': clipping engine failure: {reason}")]
    ClipFailed {
        /// Name of the operation that invoked the engine
        op: &'static str,
        /// Failure as reported by the engine
        reason: String,
    },
}

impl Error {
    /// Create an `UnknownEntity` error from a rendered entity id
    ///
    /// # Arguments
    /// * `entity` - Display form of the missing id (e.g. `position#7`)
    pub fn unknown_entity(entity: impl std::fmt::Display) -> Self {
        Error::UnknownEntity(entity.to_string())
    }

    /// Create an `InputArity` error
    ///
    /// # Arguments
    /// * `op` - Operation name (e.g. `"convex-hull"`)
    /// * `needed` - Minimum input count
    /// * `got` - Actual input count
    ///
    /// # Example
    /// ```ignore
    /// Error::arity("convex-hull", 3, points.len())
    /// ```
    pub fn arity(op: &'static str, needed: usize, got: usize) -> Self {
        Error::InputArity { op, needed, got }
    }

    /// Create an `UnsupportedOperandRole` error
    ///
    /// # Arguments
    /// * `op` - Operation name
    /// * `entity` - Display form of the offending entity id
    /// * `reason` - Why the entity cannot fill the role
    pub fn operand_role(
        op: &'static str,
        entity: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Error::UnsupportedOperandRole {
            op,
            entity: entity.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an `InvalidParameter` error
    pub fn parameter(op: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            op,
            reason: reason.into(),
        }
    }

    /// Create a `DegenerateGeometry` error
    ///
    /// # Arguments
    /// * `op` - Operation name
    /// * `reason` - What degenerated (e.g. `"all sites collinear"`)
    pub fn degenerate(op: &'static str, reason: impl Into<String>) -> Self {
        Error::DegenerateGeometry {
            op,
            reason: reason.into(),
        }
    }

    /// Create a `PrecisionOverflow` error
    pub fn precision(op: &'static str, reason: impl Into<String>) -> Self {
        Error::PrecisionOverflow {
            op,
            reason: reason.into(),
        }
    }

    /// Create a `ClipFailed` error from the engine's reported failure
    pub fn clip_failed(op: &'static str, reason: impl Into<String>) -> Self {
        Error::ClipFailed {
            op,
            reason: reason.into(),
        }
    }
}
