//! Map projection math for projected-grid coordinate generation.
//!
//! Implements the Snyder conformal conic formulas from scratch without
//! external geodesy dependencies.

pub mod lambert;
pub mod snyder;

pub use lambert::{cone_constant, Datum, LambertConformalGrid, ProjectionParams};
pub use snyder::{eccentricity, inverse_phi, small_m, small_t};
