//! Forward traversal over a populated coordinate store.

use grid_common::CoordinateStore;

/// One grid point paired with its sampled value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSample {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees, normalized to [0, 360)
    pub longitude: f64,
    /// The sampled field value at this point
    pub value: f64,
}

/// Capability set of a grid traversal.
///
/// Only `advance` is required; the optional operations come with
/// generic defaults so a forward-only cursor needs no extra state.
pub trait GridIterator {
    /// Step to the next point, yielding its coordinates and value.
    /// Returns `None` once the traversal is exhausted.
    fn advance(&mut self) -> Option<GridSample>;

    /// Index of the point most recently yielded, -1 before the first
    /// `advance`.
    fn position(&self) -> i64;

    /// Total number of points in the traversal.
    fn total_points(&self) -> i64;

    /// Whether another `advance` would yield a point.
    fn has_next(&self) -> bool {
        self.position() + 1 < self.total_points()
    }

    /// Step back to the previous point. Unsupported by default.
    fn previous(&mut self) -> Option<GridSample> {
        None
    }

    /// Rewind to the pre-traversal state. Returns false when the
    /// iterator does not support rewinding (the default).
    fn reset(&mut self) -> bool {
        false
    }
}

/// Forward-only cursor pairing coordinate-store entries with sample
/// values by row-major index.
///
/// The cursor borrows both arrays; several cursors may traverse one
/// store concurrently. It never loops and never seeks backward, and it
/// is invalidated (by lifetime) when the store goes away.
#[derive(Debug)]
pub struct GridCursor<'a> {
    position: i64,
    total: i64,
    store: &'a CoordinateStore,
    values: &'a [f64],
}

impl<'a> GridCursor<'a> {
    /// Pair a store with its sample array.
    ///
    /// Callers guarantee equal lengths; the session that builds both
    /// enforces it at initialization.
    pub fn new(store: &'a CoordinateStore, values: &'a [f64]) -> Self {
        debug_assert_eq!(store.len(), values.len());
        Self {
            position: -1,
            total: store.len() as i64,
            store,
            values,
        }
    }
}

impl GridIterator for GridCursor<'_> {
    fn advance(&mut self) -> Option<GridSample> {
        if self.position >= self.total - 1 {
            // terminal state, position stays put
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
        self.total
    }
}

impl Iterator for GridCursor<'_> {
    type Item = GridSample;

    fn next(&mut self) -> Option<GridSample> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - 1 - self.position).max(0) as usize;
        (remaining, Some(remaining))
    }
}
