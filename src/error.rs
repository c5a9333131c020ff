//! Error taxonomy.
//!
//! [`ValidationError`] is the only class a caller can act on: the input was
//! bad. [`InternalError`] means the engine broke one of its own invariants and
//! no change of input on the caller's side is implied. [`ServiceError`] joins
//! the two at the service boundary.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::input::MAX_DIMENSION;

/// Which side of the matrix broke a size limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => write!(f, "rows"),
            Axis::Columns => write!(f, "columns"),
        }
    }
}

/// Rejected input. Raised by the matrix parser, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Matrix cannot be empty")]
    EmptyMatrix,

    #[error("Matrix cannot have zero columns")]
    ZeroColumns,

    #[error("All rows must have the same number of columns: row {row} has {found}, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Number of {axis} must be ≤ {max}, got {found}", max = MAX_DIMENSION)]
    DimensionExceeded { axis: Axis, found: usize },

    #[error("Invalid numeric value in matrix at row {row}, column {col}: {reason}")]
    InvalidEntry {
        row: usize,
        col: usize,
        reason: String,
    },
}

impl ValidationError {
    /// Stable identifier for the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::EmptyMatrix => "EmptyMatrix",
            ValidationError::ZeroColumns => "ZeroColumns",
            ValidationError::NonRectangular { .. } => "NonRectangular",
            ValidationError::DimensionExceeded { .. } => "DimensionExceeded",
            ValidationError::InvalidEntry { .. } => "InvalidEntry",
        }
    }
}

/// A broken engine invariant. Logged in full, reported generically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("malformed pivot structure: {0}")]
    MalformedPivots(String),

    #[error("rank-nullity check failed: {0}")]
    DimensionMismatch(String),
}

/// Everything [`Spaces::compute`](crate::Spaces::compute) can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Computation error: {0}")]
    Internal(#[from] InternalError),
}

impl ServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(e) => e.kind(),
            ServiceError::Internal(_) => "InternalError",
        }
    }

    /// `true` when the caller sent bad input, `false` for engine defects.
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }

    /// Serializable `{kind, message}` form.
    ///
    /// Internal errors are reported with a generic message; the detail only
    /// goes to the log.
    pub fn body(&self) -> ErrorBody {
        let message = match self {
            ServiceError::Validation(e) => e.to_string(),
            ServiceError::Internal(_) => "Computation error: internal engine failure".to_string(),
        };
        ErrorBody {
            kind: self.kind(),
            message,
        }
    }
}

/// What the transport layer sends back on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}
