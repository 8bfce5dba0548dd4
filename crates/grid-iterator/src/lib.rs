//! Grid session and cursor over projected-grid coordinates.
//!
//! A [`GridSession`] resolves its configuration from a
//! [`grid_common::ParameterSource`], generates the latitude/longitude of
//! every grid cell through the projectors in [`projection`], aligns the
//! sample array with the coordinate ordering, and then hands out
//! forward-only cursors pairing the two.

pub mod cursor;
pub mod session;

pub use cursor::{GridCursor, GridIterator, GridSample};
pub use session::GridSession;
