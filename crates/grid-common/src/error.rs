//! Error types for grid coordinate generation.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Primary error type for grid sessions.
#[derive(Debug, Error)]
pub enum GridError {
    // === Resource Errors ===
    #[error("unable to allocate {bytes} bytes")]
    OutOfMemory { bytes: usize },

    // === Parameter Errors ===
    #[error("parameter not found: {0}")]
    ParameterNotFound(String),

    #[error("parameter '{name}' has the wrong type (expected {expected})")]
    ParameterTypeMismatch {
        name: String,
        expected: &'static str,
    },

    // === Geometry Errors ===
    #[error("wrong number of points ({declared} != {columns}x{rows})")]
    GridShapeMismatch {
        declared: usize,
        columns: usize,
        rows: usize,
    },

    #[error("transformation cannot be computed at the poles")]
    UndefinedAtPole,

    #[error("latitude iteration did not converge within {iterations} iterations")]
    SolverNonConvergence { iterations: usize },

    // === Data Layout Errors ===
    #[error("scan-order transform failed: {0}")]
    ScanTransformFailure(String),
}

impl GridError {
    /// Whether the error stems from the configuration handed to the
    /// session rather than from the computation itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GridError::ParameterNotFound(_)
                | GridError::ParameterTypeMismatch { .. }
                | GridError::GridShapeMismatch { .. }
        )
    }
}
