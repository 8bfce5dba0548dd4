//! Lambert conformal conic grid generation.
//!
//! Given a grid description (shape, datum, projection parameters), the
//! projector walks every cell of the projected plane and inverts the
//! projection to geographic coordinates, producing a fully populated
//! [`CoordinateStore`]. Two datum paths exist: a closed-form inverse for
//! a spherical earth, and an ellipsoidal inverse that recovers each
//! latitude through the iterative solver in [`crate::snyder`].
//!
//! Formulas follow Snyder ch. 15 (Lambert conformal conic), spherical
//! case eqs. 15-1..15-5, ellipsoidal case eqs. 15-7..15-11 with the
//! inverse iteration of eq. 7-9.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use serde::{Deserialize, Serialize};

use grid_common::{CoordinateStore, GridError, GridResult, GridShape};

use crate::snyder::{
    adjust_lon_radians, eccentricity, inverse_phi, normalise_longitude_degrees, small_m, small_t,
    EPSILON,
};

/// Earth-shape model underlying a projection. Selected once per grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Datum {
    /// Perfect sphere of the given radius (metres).
    Sphere { radius: f64 },
    /// Oblate spheroid given by its polar and equatorial axes (metres).
    Oblate {
        semi_minor_axis: f64,
        semi_major_axis: f64,
    },
}

impl Datum {
    pub fn is_oblate(&self) -> bool {
        matches!(self, Datum::Oblate { .. })
    }
}

/// Angular and spacing parameters of a projected grid.
///
/// Inputs arrive in degrees and are converted exactly once here; all
/// stored angles are radians. Spacings are metres in the projected
/// plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Latitude of the first grid point
    pub lat_first: f64,
    /// Longitude of the first grid point
    pub lon_first: f64,
    /// Latitude/longitude of the last grid point, when declared
    pub last_point: Option<(f64, f64)>,
    /// Reference (central) latitude, LaD in GRIB terms
    pub lad: f64,
    /// Orientation / central meridian longitude, LoV in GRIB terms
    pub lov: f64,
    /// First standard parallel
    pub latin1: f64,
    /// Second standard parallel
    pub latin2: f64,
    /// Grid spacing along i (metres)
    pub dx: f64,
    /// Grid spacing along j (metres)
    pub dy: f64,
}

impl ProjectionParams {
    /// Build from degree-valued inputs, converting angles to radians.
    #[allow(clippy::too_many_arguments)]
    pub fn from_degrees(
        lat_first_deg: f64,
        lon_first_deg: f64,
        lov_deg: f64,
        lad_deg: f64,
        latin1_deg: f64,
        latin2_deg: f64,
        dx: f64,
        dy: f64,
    ) -> Self {
        Self {
            lat_first: lat_first_deg.to_radians(),
            lon_first: lon_first_deg.to_radians(),
            last_point: None,
            lad: lad_deg.to_radians(),
            lov: lov_deg.to_radians(),
            latin1: latin1_deg.to_radians(),
            latin2: latin2_deg.to_radians(),
            dx,
            dy,
        }
    }

    /// Record the declared last grid point (degrees).
    pub fn with_last_point(mut self, lat_deg: f64, lon_deg: f64) -> Self {
        self.last_point = Some((lat_deg.to_radians(), lon_deg.to_radians()));
        self
    }
}

/// Cone constant `n` for a spherical conformal conic.
///
/// Standard parallels closer than 1e-9 radians use the tangent-cone
/// limit `sin(latin1)`; otherwise the secant-cone log ratio.
pub fn cone_constant(latin1: f64, latin2: f64) -> f64 {
    if (latin1 - latin2).abs() < 1.0e-9 {
        latin1.sin()
    } else {
        (latin1.cos() / latin2.cos()).ln()
            / ((FRAC_PI_4 + latin2 / 2.0).tan() / (FRAC_PI_4 + latin1 / 2.0).tan()).ln()
    }
}

/// A Lambert conformal conic grid over a chosen datum.
#[derive(Debug, Clone)]
pub struct LambertConformalGrid {
    shape: GridShape,
    datum: Datum,
    params: ProjectionParams,
}

impl LambertConformalGrid {
    pub fn new(shape: GridShape, datum: Datum, params: ProjectionParams) -> Self {
        Self {
            shape,
            datum,
            params,
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Compute latitude/longitude for every grid cell.
    ///
    /// The store is populated in row-major order starting at the first
    /// grid point. On any failure the partially written store is dropped
    /// and never observed by callers.
    pub fn populate(&self) -> GridResult<CoordinateStore> {
        match self.datum {
            Datum::Sphere { radius } => self.populate_sphere(radius),
            Datum::Oblate {
                semi_minor_axis,
                semi_major_axis,
            } => self.populate_oblate(semi_minor_axis, semi_major_axis),
        }
    }

    /// Spherical inverse, Snyder eqs. 15-1..15-5.
    fn populate_sphere(&self, radius: f64) -> GridResult<CoordinateStore> {
        let p = &self.params;
        let n = cone_constant(p.latin1, p.latin2);
        let f = (p.latin1.cos() * (FRAC_PI_4 + p.latin1 / 2.0).tan().powf(n)) / n;
        let rho = radius * f * (FRAC_PI_4 + p.lat_first / 2.0).tan().powf(-n);
        let mut rho0 = radius * f * (FRAC_PI_4 + p.lad / 2.0).tan().powf(-n);
        if n < 0.0 {
            // southern hemisphere
            rho0 = -rho0;
        }

        let lon_diff = adjust_lon_radians(p.lon_first - p.lov);
        let angle = n * lon_diff;
        let x0 = rho * angle.sin();
        let y0 = rho0 - rho * angle.cos();
        // Dy keeps its sign: latitudes always increase from the first
        // grid point, scan direction is handled on the value array.

        let mut store = CoordinateStore::with_points(self.shape.total_points())?;
        for j in 0..self.shape.rows {
            let mut y = y0 + j as f64 * p.dy;
            if n < 0.0 {
                y = -y;
            }
            let tmp = rho0 - y;
            let tmp2 = tmp * tmp;
            for i in 0..self.shape.columns {
                let index = self.shape.index(i, j);
                let mut x = x0 + i as f64 * p.dx;
                if n < 0.0 {
                    x = -x;
                }
                let angle = x.atan2(tmp);
                let mut rho_cell = (x * x + tmp2).sqrt();
                if n <= 0.0 {
                    rho_cell = -rho_cell;
                }
                let lat_deg =
                    (2.0 * (radius * f / rho_cell).powf(1.0 / n).atan() - FRAC_PI_2).to_degrees();
                let lon_deg = normalise_longitude_degrees((p.lov + angle / n).to_degrees());
                store.set(index, lat_deg, lon_deg);
            }
        }
        Ok(store)
    }

    /// Ellipsoidal inverse, Snyder eqs. 15-7..15-11 plus the iterative
    /// latitude recovery of eq. 7-9.
    fn populate_oblate(&self, minor: f64, major: f64) -> GridResult<CoordinateStore> {
        let p = &self.params;
        let e = eccentricity(minor, major);

        // Forward constants from the standard parallels.
        let sin1 = p.latin1.sin();
        let ms1 = small_m(e, sin1, p.latin1.cos());
        let ts1 = small_t(e, p.latin1, sin1);
        let ms2 = small_m(e, p.latin2.sin(), p.latin2.cos());
        let ts2 = small_t(e, p.latin2, p.latin2.sin());
        let ts0 = small_t(e, p.lad, p.lad.sin());

        // Ratio of the angle between meridians to the longitude difference.
        let ns = if (p.latin1 - p.latin2).abs() > EPSILON {
            (ms1 / ms2).ln() / (ts1 / ts2).ln()
        } else {
            sin1
        };
        let big_f = ms1 / (ns * ts1.powf(ns));
        let rh = major * big_f * ts0.powf(ns);

        // The projection degenerates at the poles: small_t is 0 or
        // infinite there and no finite grid origin exists.
        if (p.lat_first.abs() - FRAC_PI_2).abs() <= EPSILON {
            tracing::error!("transformation cannot be computed at the poles");
            return Err(GridError::UndefinedAtPole);
        }

        // Project the first grid point, then negate both offsets to get
        // the false easting/northing of the grid origin.
        let ts_first = small_t(e, p.lat_first, p.lat_first.sin());
        let rh1_first = major * big_f * ts_first.powf(ns);
        let theta0 = ns * adjust_lon_radians(p.lon_first - p.lov);
        let false_easting = -(rh1_first * theta0.sin());
        let false_northing = -(rh - rh1_first * theta0.cos());

        let mut store = CoordinateStore::with_points(self.shape.total_points())?;
        for j in 0..self.shape.rows {
            let y = j as f64 * p.dy;
            for i in 0..self.shape.columns {
                let index = self.shape.index(i, j);
                let x = i as f64 * p.dx;

                // Inverse projection from plane offsets to lat/lon.
                let xp = x - false_easting;
                let yp = rh - y + false_northing;
                let mut rh1 = (xp * xp + yp * yp).sqrt();
                let mut con = 1.0;
                if ns <= 0.0 {
                    rh1 = -rh1;
                    con = -con;
                }
                let mut theta = 0.0;
                if rh1 != 0.0 {
                    theta = (con * xp).atan2(con * yp);
                }
                let lat_rad = if rh1 != 0.0 || ns > 0.0 {
                    let ts_cell = (rh1 / (major * big_f)).powf(1.0 / ns);
                    inverse_phi(e, ts_cell).map_err(|err| {
                        tracing::error!(
                            col = i,
                            row = j,
                            "failed to compute the inverse latitude angle"
                        );
                        err
                    })?
                } else {
                    -FRAC_PI_2
                };
                let lon_rad = adjust_lon_radians(theta / ns + p.lov);
                store.set(
                    index,
                    lat_rad.to_degrees(),
                    normalise_longitude_degrees(lon_rad.to_degrees()),
                );
            }
        }
        Ok(store)
    }
}
