//! Scalar building blocks from Snyder, "Map Projections — A Working
//! Manual" (USGS Professional Paper 1395, 1987).
//!
//! These are the eccentricity-aware helpers shared by the conformal
//! conic grid projectors: the forward constants small-t (eq. 15-9) and
//! small-m (eq. 14-15), and the iterative inverse that recovers a
//! geodetic latitude from a projected radial term (eq. 7-9).

use std::f64::consts::{FRAC_PI_2, PI};

use grid_common::{GridError, GridResult};

/// Convergence tolerance for the inverse-latitude iteration, radians.
pub const PHI_TOLERANCE: f64 = 1.0e-10;

/// Iteration cap for the inverse-latitude iteration.
pub const MAX_PHI_ITERATIONS: usize = 15;

/// Tolerance used when comparing latitudes against each other or
/// against the poles.
pub const EPSILON: f64 = 1.0e-10;

/// Eccentricity of a spheroid from its axes.
pub fn eccentricity(minor: f64, major: f64) -> f64 {
    let ratio = minor / major;
    (1.0 - ratio * ratio).sqrt()
}

/// Snyder eq. 14-15: radius of the parallel at `phi` divided by the
/// semi-major axis.
pub fn small_m(eccent: f64, sinphi: f64, cosphi: f64) -> f64 {
    let con = eccent * sinphi;
    cosphi / (1.0 - con * con).sqrt()
}

/// Snyder eq. 15-9: the forward constant small-t for latitude `phi`.
pub fn small_t(eccent: f64, phi: f64, sinphi: f64) -> f64 {
    let con = eccent * sinphi;
    let com = ((1.0 - con) / (1.0 + con)).powf(0.5 * eccent);
    (0.5 * (FRAC_PI_2 - phi)).tan() / com
}

/// Snyder eq. 7-9: recover geodetic latitude from small-t by
/// fixed-point iteration.
///
/// Seeds with the spherical solution `pi/2 - 2*atan(ts)` and refines
/// until the update drops below [`PHI_TOLERANCE`]. For a sphere
/// (`eccent == 0`) the first update is exactly zero and the seed is
/// returned unchanged. Exceeding [`MAX_PHI_ITERATIONS`] is surfaced as
/// an error, never truncated to the last iterate.
pub fn inverse_phi(eccent: f64, ts: f64) -> GridResult<f64> {
    let half_e = 0.5 * eccent;
    let mut phi = FRAC_PI_2 - 2.0 * ts.atan();
    for _ in 0..=MAX_PHI_ITERATIONS {
        let sinphi = phi.sin();
        let con = eccent * sinphi;
        let dphi =
            FRAC_PI_2 - 2.0 * (ts * ((1.0 - con) / (1.0 + con)).powf(half_e)).atan() - phi;
        phi += dphi;
        if dphi.abs() <= PHI_TOLERANCE {
            return Ok(phi);
        }
    }
    Err(GridError::SolverNonConvergence {
        iterations: MAX_PHI_ITERATIONS,
    })
}

/// Wrap a longitude in radians into (-pi, pi].
pub fn adjust_lon_radians(lon: f64) -> f64 {
    let mut lon = lon;
    if lon > PI {
        lon -= 2.0 * PI;
    }
    if lon < -PI {
        lon += 2.0 * PI;
    }
    lon
}

/// Normalize a longitude in degrees into [0, 360).
pub fn normalise_longitude_degrees(lon: f64) -> f64 {
    let mut lon = lon;
    while lon < 0.0 {
        lon += 360.0;
    }
    while lon >= 360.0 {
        lon -= 360.0;
    }
    lon
}
