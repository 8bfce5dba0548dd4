//! Grid session lifecycle: parameter resolution, coordinate
//! generation, scan-order alignment and traversal.

use grid_common::{
    apply_scan_order, CoordinateStore, GridResult, GridShape, ParameterSource, ScanMode,
};
use projection::{Datum, LambertConformalGrid, ProjectionParams};

use crate::cursor::{GridCursor, GridIterator, GridSample};

// GRIB-style parameter names resolved at initialization.
mod keys {
    pub const RADIUS: &str = "radius";
    pub const NI: &str = "Ni";
    pub const NJ: &str = "Nj";
    pub const LAT_FIRST: &str = "latitudeOfFirstGridPointInDegrees";
    pub const LON_FIRST: &str = "longitudeOfFirstGridPointInDegrees";
    pub const LAT_LAST: &str = "latitudeOfLastGridPointInDegrees";
    pub const LON_LAST: &str = "longitudeOfLastGridPointInDegrees";
    pub const LAD: &str = "LaDInDegrees";
    pub const LOV: &str = "LoVInDegrees";
    pub const LATIN1: &str = "Latin1InDegrees";
    pub const LATIN2: &str = "Latin2InDegrees";
    pub const DX: &str = "DxInMetres";
    pub const DY: &str = "DyInMetres";
    pub const EARTH_IS_OBLATE: &str = "earthIsOblate";
    pub const EARTH_MINOR_AXIS: &str = "earthMinorAxisInMetres";
    pub const EARTH_MAJOR_AXIS: &str = "earthMajorAxisInMetres";
    pub const I_SCANS_NEGATIVELY: &str = "iScansNegatively";
    pub const J_SCANS_POSITIVELY: &str = "jScansPositively";
    pub const J_POINTS_CONSECUTIVE: &str = "jPointsAreConsecutive";
    pub const ALTERNATIVE_ROW_SCANNING: &str = "alternativeRowScanning";
}

/// A fully initialized grid session.
///
/// Owns the coordinate store and the (scan-aligned) value array for one
/// grid. The session itself is a forward iterator; independent cursors
/// over the same data come from [`GridSession::cursor`]. Dropping the
/// session releases everything exactly once.
#[derive(Debug)]
pub struct GridSession {
    store: CoordinateStore,
    values: Vec<f64>,
    position: i64,
}

impl GridSession {
    /// Resolve all grid parameters, populate the coordinate store and
    /// align the value array with it.
    ///
    /// `values` is the sample array in producer scan order; its length
    /// is the declared total point count and must match the resolved
    /// grid shape. Any lookup, geometry or convergence failure aborts
    /// initialization; nothing partially constructed escapes.
    pub fn initialize(source: &dyn ParameterSource, mut values: Vec<f64>) -> GridResult<Self> {
        let columns = source.get_long(keys::NI)? as usize;
        let rows = source.get_long(keys::NJ)? as usize;
        let shape = GridShape::new(columns, rows);
        shape.validate_declared(values.len())?;

        let datum = if source.get_flag(keys::EARTH_IS_OBLATE)? {
            Datum::Oblate {
                semi_minor_axis: source.get_double(keys::EARTH_MINOR_AXIS)?,
                semi_major_axis: source.get_double(keys::EARTH_MAJOR_AXIS)?,
            }
        } else {
            Datum::Sphere {
                radius: source.get_double(keys::RADIUS)?,
            }
        };

        let mut params = ProjectionParams::from_degrees(
            source.get_double(keys::LAT_FIRST)?,
            source.get_double(keys::LON_FIRST)?,
            source.get_double(keys::LOV)?,
            source.get_double(keys::LAD)?,
            source.get_double(keys::LATIN1)?,
            source.get_double(keys::LATIN2)?,
            source.get_double(keys::DX)?,
            source.get_double(keys::DY)?,
        );
        if let (Some(lat_last), Some(lon_last)) = (
            source.get_optional_double(keys::LAT_LAST)?,
            source.get_optional_double(keys::LON_LAST)?,
        ) {
            params = params.with_last_point(lat_last, lon_last);
        }

        let scan = ScanMode {
            i_negative: source.get_flag(keys::I_SCANS_NEGATIVELY)?,
            j_positive: source.get_flag(keys::J_SCANS_POSITIVELY)?,
            j_consecutive: source.get_flag(keys::J_POINTS_CONSECUTIVE)?,
            alternating_rows: source.get_flag(keys::ALTERNATIVE_ROW_SCANNING)?,
        };

        tracing::debug!(
            columns,
            rows,
            oblate = datum.is_oblate(),
            "initializing grid session"
        );

        let store = LambertConformalGrid::new(shape, datum, params).populate()?;
        // The value array always goes through the scan transform, even
        // when the flags describe the canonical layout.
        apply_scan_order(&mut values, &shape, &scan)?;

        Ok(Self {
            store,
            values,
            position: -1,
        })
    }

    /// A fresh independent cursor over this session's grid.
    pub fn cursor(&self) -> GridCursor<'_> {
        GridCursor::new(&self.store, &self.values)
    }

    /// The populated coordinate store.
    pub fn store(&self) -> &CoordinateStore {
        &self.store
    }

    /// The scan-aligned sample values, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl GridIterator for GridSession {
    fn advance(&mut self) -> Option<GridSample> {
        if self.position >= self.store.len() as i64 - 1 {
            return None;
        }
        self.position += 1;
        let idx = self.position as usize;
        let (latitude, longitude) = self.store.get(idx);
        Some(GridSample {
            latitude,
            longitude,
            value: self.values[idx],
        })
    }

    fn position(&self) -> i64 {
        self.position
    }

    fn total_points(&self) -> i64 {
        self.store.len() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_common::{GridError, MapSource};

    fn spherical_source() -> MapSource {
        let mut source = MapSource::new();
        source
            .set_long(keys::NI, 3)
            .set_long(keys::NJ, 2)
            .set_flag(keys::EARTH_IS_OBLATE, false)
            .set_double(keys::RADIUS, 6_371_229.0)
            .set_double(keys::LAT_FIRST, 48.0)
            .set_double(keys::LON_FIRST, 5.0)
            .set_double(keys::LOV, 5.0)
            .set_double(keys::LAD, 48.0)
            .set_double(keys::LATIN1, 48.0)
            .set_double(keys::LATIN2, 48.0)
            .set_double(keys::DX, 10_000.0)
            .set_double(keys::DY, 10_000.0)
            .set_flag(keys::I_SCANS_NEGATIVELY, false)
            .set_flag(keys::J_SCANS_POSITIVELY, true)
            .set_flag(keys::J_POINTS_CONSECUTIVE, false)
            .set_flag(keys::ALTERNATIVE_ROW_SCANNING, false);
        source
    }

    #[test]
    fn test_shape_mismatch_is_fatal() {
        let source = spherical_source();
        // 3x2 grid with 5 declared values.
        let err = GridSession::initialize(&source, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, GridError::GridShapeMismatch { .. }));
    }

    #[test]
    fn test_missing_parameter_is_fatal() {
        let mut source = spherical_source();
        source.set_flag(keys::EARTH_IS_OBLATE, true); // axes never set
        let err = GridSession::initialize(&source, vec![0.0; 6]).unwrap_err();
        assert!(matches!(err, GridError::ParameterNotFound(_)));
    }

    #[test]
    fn test_session_advances_in_row_major_order() {
        let source = spherical_source();
        let values: Vec<f64> = (0..6).map(f64::from).collect();
        let mut session = GridSession::initialize(&source, values).unwrap();

        let first = session.advance().unwrap();
        assert!((first.latitude - 48.0).abs() < 1e-6);
        assert!((first.longitude - 5.0).abs() < 1e-6);
        assert_eq!(first.value, 0.0);

        let mut count = 1;
        while session.advance().is_some() {
            count += 1;
        }
        assert_eq!(count, 6);
        assert!(session.advance().is_none());
        assert_eq!(session.position(), 5);
    }

    #[test]
    fn test_scan_transform_reorders_values() {
        let mut source = spherical_source();
        source.set_flag(keys::I_SCANS_NEGATIVELY, true);
        // Rows stored east-to-west; the session flips them back.
        let values = vec![2.0, 1.0, 0.0, 5.0, 4.0, 3.0];
        let session = GridSession::initialize(&source, values).unwrap();
        assert_eq!(session.values(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_optional_last_point_resolved() {
        let mut source = spherical_source();
        source
            .set_double(keys::LAT_LAST, 48.2)
            .set_double(keys::LON_LAST, 5.3);
        let session = GridSession::initialize(&source, vec![0.0; 6]).unwrap();
        assert_eq!(session.store().len(), 6);
    }
}
