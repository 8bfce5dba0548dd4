//! Grid dimensions and the row-major point ordering they induce.

use serde::{Deserialize, Serialize};

use crate::{GridError, GridResult};

/// Dimensions of a projected grid.
///
/// Points are ordered row-major: `index = col + row * columns`, starting
/// at the first grid point and walking in the +i then +j direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of points along a row (Ni in GRIB terms)
    pub columns: usize,
    /// Number of rows (Nj in GRIB terms)
    pub rows: usize,
}

impl GridShape {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Total number of grid points.
    pub fn total_points(&self) -> usize {
        self.columns * self.rows
    }

    /// Check the shape against an externally declared point count.
    ///
    /// A mismatch is a fatal configuration error: the sample array and the
    /// coordinate arrays would disagree about their common length.
    pub fn validate_declared(&self, declared: usize) -> GridResult<()> {
        if self.total_points() != declared {
            return Err(GridError::GridShapeMismatch {
                declared,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }

    /// Flat row-major index for a (col, row) cell.
    pub fn index(&self, col: usize, row: usize) -> usize {
        col + row * self.columns
    }
}
