//! Scan mode flags and the sample-array reordering they require.
//!
//! Grid coordinates are always generated row-major from the first grid
//! point in the +i/+j direction. Sample arrays, however, arrive in
//! whatever scan order the producer used (GRIB2 Flag Table 3.4). The
//! transform here rearranges the sample array to match the coordinate
//! ordering, so a cursor can pair them by plain index.

use serde::{Deserialize, Serialize};

use crate::{GridError, GridResult, GridShape};

/// Scan mode flags for grid data ordering.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScanMode {
    /// +i direction: false = +x (east), true = -x (west)
    pub i_negative: bool,
    /// +j direction: true = rows stored away from the first point's side
    pub j_positive: bool,
    /// Adjacent points: false = consecutive in i, true = consecutive in j
    pub j_consecutive: bool,
    /// Row scan direction alternates (boustrophedon)
    pub alternating_rows: bool,
}

impl ScanMode {
    /// The ordering the coordinate arrays use natively: +i, +j,
    /// i-consecutive, no alternation.
    pub fn canonical() -> Self {
        Self {
            i_negative: false,
            j_positive: true,
            j_consecutive: false,
            alternating_rows: false,
        }
    }

    /// Create from a GRIB2 scanning mode flag byte (Flag Table 3.4).
    pub fn from_grib2_flag(flag: u8) -> Self {
        Self {
            i_negative: (flag & 0x80) != 0,
            j_positive: (flag & 0x40) != 0,
            j_consecutive: (flag & 0x20) != 0,
            alternating_rows: (flag & 0x10) != 0,
        }
    }

    /// Whether values are already stored in the canonical ordering.
    pub fn is_canonical(&self) -> bool {
        !self.i_negative && self.j_positive && !self.j_consecutive && !self.alternating_rows
    }

    /// Source-array position of the value belonging at canonical (i, j).
    fn source_index(&self, i: usize, j: usize, shape: &GridShape) -> usize {
        let (nx, ny) = (shape.columns, shape.rows);
        let j = if self.j_positive { j } else { ny - 1 - j };
        let i = if self.alternating_rows && j % 2 == 1 {
            nx - 1 - i
        } else {
            i
        };
        let i = if self.i_negative { nx - 1 - i } else { i };
        if self.j_consecutive {
            i * ny + j
        } else {
            j * nx + i
        }
    }
}

/// Reorder `values` in place into the canonical row-major +i/+j ordering.
///
/// No-op when the scan mode already matches. The reorder goes through a
/// scratch buffer; the caller's slice is overwritten on success only.
pub fn apply_scan_order(
    values: &mut [f64],
    shape: &GridShape,
    mode: &ScanMode,
) -> GridResult<()> {
    if values.len() != shape.total_points() {
        return Err(GridError::ScanTransformFailure(format!(
            "value array has {} entries, grid has {}",
            values.len(),
            shape.total_points()
        )));
    }
    if mode.is_canonical() {
        return Ok(());
    }

    let mut reordered = Vec::new();
    if reordered.try_reserve_exact(values.len()).is_err() {
        let bytes = values.len() * std::mem::size_of::<f64>();
        tracing::error!(bytes, "unable to allocate scan-order scratch buffer");
        return Err(GridError::OutOfMemory { bytes });
    }
    for j in 0..shape.rows {
        for i in 0..shape.columns {
            reordered.push(values[mode.source_index(i, j, shape)]);
        }
    }
    values.copy_from_slice(&reordered);
    Ok(())
}
