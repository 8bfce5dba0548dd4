//! Owned storage for a grid's latitude/longitude arrays.

use crate::{GridError, GridResult};

/// Latitude/longitude pairs for every point of a projected grid.
///
/// Both arrays live in one contiguous buffer (latitudes first, then
/// longitudes), indexed by the row-major point index
/// `col + row * columns`. Values are degrees. The store is populated
/// once by a projector and read-only afterwards; cursors borrow it as
/// slices, and dropping the store frees both arrays together.
#[derive(Debug)]
pub struct CoordinateStore {
    coords: Vec<f64>,
    points: usize,
}

impl CoordinateStore {
    /// Allocate a store for `points` grid points.
    ///
    /// Allocation failure is surfaced as `OutOfMemory` (after logging the
    /// requested byte count) rather than aborting the process.
    pub fn with_points(points: usize) -> GridResult<Self> {
        let mut coords = Vec::new();
        if coords.try_reserve_exact(2 * points).is_err() {
            let bytes = 2 * points * std::mem::size_of::<f64>();
            tracing::error!(bytes, "unable to allocate coordinate arrays");
            return Err(GridError::OutOfMemory { bytes });
        }
        coords.resize(2 * points, 0.0);
        Ok(Self { coords, points })
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points == 0
    }

    /// Latitudes in degrees, row-major point order.
    pub fn latitudes(&self) -> &[f64] {
        &self.coords[..self.points]
    }

    /// Longitudes in degrees, row-major point order.
    pub fn longitudes(&self) -> &[f64] {
        &self.coords[self.points..]
    }

    /// Store the coordinate pair for one point.
    pub fn set(&mut self, index: usize, lat_deg: f64, lon_deg: f64) {
        debug_assert!(index < self.points);
        self.coords[index] = lat_deg;
        self.coords[self.points + index] = lon_deg;
    }

    /// Coordinate pair for one point, `(lat, lon)` in degrees.
    pub fn get(&self, index: usize) -> (f64, f64) {
        (self.coords[index], self.coords[self.points + index])
    }

    /// Enclosing geographic box `(min_lon, min_lat, max_lon, max_lat)`.
    ///
    /// For conic projections the true outline is curved; this is the box
    /// around the computed points, good enough for coverage queries.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lon = f64::MAX;
        let mut max_lon = f64::MIN;
        for i in 0..self.points {
            let (lat, lon) = self.get(i);
            min_lat = min_lat.min(lat);
            max_lat = max_lat.max(lat);
            min_lon = min_lon.min(lon);
            max_lon = max_lon.max(lon);
        }
        (min_lon, min_lat, max_lon, max_lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let mut store = CoordinateStore::with_points(4).unwrap();
        store.set(0, 60.0, 350.0);
        store.set(3, -10.5, 42.25);
        assert_eq!(store.get(0), (60.0, 350.0));
        assert_eq!(store.get(3), (-10.5, 42.25));
        assert_eq!(store.latitudes().len(), 4);
        assert_eq!(store.longitudes().len(), 4);
        assert_eq!(store.latitudes()[3], -10.5);
        assert_eq!(store.longitudes()[0], 350.0);
    }

    #[test]
    fn test_bounds() {
        let mut store = CoordinateStore::with_points(2).unwrap();
        store.set(0, 10.0, 100.0);
        store.set(1, -20.0, 120.0);
        assert_eq!(store.bounds(), (100.0, -20.0, 120.0, 10.0));
    }

    #[test]
    fn test_empty_store() {
        let store = CoordinateStore::with_points(0).unwrap();
        assert!(store.is_empty());
        assert!(store.latitudes().is_empty());
    }
}
