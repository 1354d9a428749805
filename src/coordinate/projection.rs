//! Lambert Conformal Conic projection engine
//!
//! Implements the two-standard-parallel ellipsoidal form (Snyder,
//! "Map Projections - A Working Manual", eqs. 15-1..15-11) on the
//! GRS80 ellipsoid, which underlies every state-plane zone this tool
//! deals with. Forward maps longitude/latitude in degrees to grid
//! easting/northing in meters; inverse recovers longitude/latitude.
//!
//! NAD83, NAD83(HARN) and WGS 84 are treated as coincident here. Their
//! real-world separation is below the tolerance of the survey data this
//! tool reconciles, and the unit bookkeeping - not datum shifts - is
//! where the historical errors came from.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use super::errors::{SurveyError, SurveyResult};

/// GRS80 semi-major axis in meters
const GRS80_A: f64 = 6378137.0;
/// GRS80 inverse flattening
const GRS80_INV_F: f64 = 298.257222101;

/// Convergence tolerance for the inverse latitude iteration, radians
const LAT_ITER_TOLERANCE: f64 = 1e-12;
const LAT_ITER_MAX: usize = 16;

/// Parameters for a Lambert Conformal Conic (2SP) projection.
///
/// Angles are in degrees, false origin offsets in meters.
#[derive(Debug, Clone, Copy)]
pub struct LccParameters {
    pub standard_parallel_1: f64,
    pub standard_parallel_2: f64,
    pub latitude_of_origin: f64,
    pub central_meridian: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

/// A Lambert Conformal Conic projection with precomputed constants
#[derive(Debug, Clone, Copy)]
pub struct LambertConformalConic {
    params: LccParameters,
    /// Ellipsoid eccentricity
    e: f64,
    /// Cone constant
    n: f64,
    /// Mapping radius coefficient
    f: f64,
    /// Radius at the latitude of origin
    rho0: f64,
    /// Central meridian in radians
    lon0: f64,
}

impl LambertConformalConic {
    /// Build the projection, precomputing the cone constants
    pub fn new(params: LccParameters) -> Self {
        let flattening = 1.0 / GRS80_INV_F;
        let e2 = flattening * (2.0 - flattening);
        let e = e2.sqrt();

        let phi1 = params.standard_parallel_1.to_radians();
        let phi2 = params.standard_parallel_2.to_radians();
        let phi0 = params.latitude_of_origin.to_radians();

        let m1 = msfn(phi1, e);
        let m2 = msfn(phi2, e);
        let t1 = tsfn(phi1, e);
        let t2 = tsfn(phi2, e);
        let t0 = tsfn(phi0, e);

        let n = (m1.ln() - m2.ln()) / (t1.ln() - t2.ln());
        let f = m1 / (n * t1.powf(n));
        let rho0 = GRS80_A * f * t0.powf(n);

        LambertConformalConic {
            params,
            e,
            n,
            f,
            rho0,
            lon0: params.central_meridian.to_radians(),
        }
    }

    /// Forward projection: (longitude, latitude) in degrees to grid
    /// (easting, northing) in meters
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> SurveyResult<(f64, f64)> {
        let lat = lat_deg.to_radians();
        if lat.abs() >= FRAC_PI_2 {
            return Err(SurveyError::OutOfDomain(lon_deg, lat_deg));
        }

        let rho = GRS80_A * self.f * tsfn(lat, self.e).powf(self.n);
        let theta = self.n * (lon_deg.to_radians() - self.lon0);

        let easting = self.params.false_easting + rho * theta.sin();
        let northing = self.params.false_northing + self.rho0 - rho * theta.cos();
        Ok((easting, northing))
    }

    /// Inverse projection: grid (easting, northing) in meters to
    /// (longitude, latitude) in degrees
    pub fn inverse(&self, easting: f64, northing: f64) -> SurveyResult<(f64, f64)> {
        let dx = easting - self.params.false_easting;
        let dy = self.rho0 - (northing - self.params.false_northing);

        let mut rho = (dx * dx + dy * dy).sqrt();
        let theta;
        if self.n >= 0.0 {
            theta = dx.atan2(dy);
        } else {
            rho = -rho;
            theta = (-dx).atan2(-dy);
        }

        if rho == 0.0 {
            // At the apex of the cone the longitude is indeterminate;
            // report the pole on the central meridian.
            let pole = if self.n >= 0.0 { 90.0 } else { -90.0 };
            return Ok((self.params.central_meridian, pole));
        }

        let t = (rho / (GRS80_A * self.f)).powf(1.0 / self.n);
        let lat = self.latitude_from_t(t)?;
        let lon = theta / self.n + self.lon0;

        Ok((lon.to_degrees(), lat.to_degrees()))
    }

    /// Solve t(phi) = t for phi by fixed-point iteration
    fn latitude_from_t(&self, t: f64) -> SurveyResult<f64> {
        let half_e = self.e / 2.0;
        let mut lat = FRAC_PI_2 - 2.0 * t.atan();

        for _ in 0..LAT_ITER_MAX {
            let es = self.e * lat.sin();
            let next = FRAC_PI_2
                - 2.0 * (t * ((1.0 - es) / (1.0 + es)).powf(half_e)).atan();
            if (next - lat).abs() < LAT_ITER_TOLERANCE {
                return Ok(next);
            }
            lat = next;
        }

        Err(SurveyError::GenericError(
            "Inverse projection latitude iteration did not converge".to_string(),
        ))
    }
}

/// Snyder's m function: cos(phi) / sqrt(1 - e^2 sin^2 phi)
fn msfn(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    phi.cos() / (1.0 - es * es).sqrt()
}

/// Snyder's t function: tan(pi/4 - phi/2) / ((1 - e sin phi)/(1 + e sin phi))^(e/2)
fn tsfn(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}
