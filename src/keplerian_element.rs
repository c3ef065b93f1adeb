//! # Mean Keplerian elements
//!
//! Two-body view of a normalized [`OrbitalRecord`]: the classical element set
//! `(a, e, i, Ω, ω, M)` and its Cartesian state at epoch.
//!
//! ## Units
//!
//! - Lengths: **km**
//! - Angles: **radians**
//! - Epoch: **MJD** (UTC)
//!
//! The semi-major axis is recovered from the mean motion with the gravity model of the
//! record: `a = (xke / n)^(2/3)` Earth radii, `n` in radians/minute.
//!
//! ## See also
//!
//! - [`crate::two_body::TwoBodyInit`] – the initializer built on top of these elements.
use std::fmt;

use nalgebra::{Rotation3, Vector3};
use roots::{find_root_newton_raphson, SimpleConvergency};
use serde::Serialize;

use crate::{
    constants::{Kilometer, Radian, RAD2DEG, TWOPI},
    orbital_record::OrbitalRecord,
    tle_errors::TleError,
};

/// Normalize an angle to `[0, 2π)`.
pub(crate) fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(TWOPI)
}

/// Solve Kepler's equation `E − e·sin(E) = M` with Newton–Raphson.
///
/// Arguments
/// -----------------
/// * `eccentricity` – Orbit eccentricity, `0 ≤ e < 1`.
/// * `mean_anomaly` – Mean anomaly (radians).
///
/// Return
/// ----------
/// * The eccentric anomaly (radians), or [`TleError::KeplerSolver`] if the iteration did not
///   converge.
pub fn solve_kepler(eccentricity: f64, mean_anomaly: Radian) -> Result<Radian, TleError> {
    let mean_anomaly = principal_angle(mean_anomaly);

    let f = |e_anom: f64| e_anom - eccentricity * e_anom.sin() - mean_anomaly;
    let df = |e_anom: f64| 1.0 - eccentricity * e_anom.cos();

    // M is a good start for moderate eccentricities, π is safer close to 1
    let x0 = if eccentricity < 0.8 {
        mean_anomaly
    } else {
        std::f64::consts::PI
    };

    let mut tol = SimpleConvergency {
        eps: 1e-12,
        max_iter: 50,
    };

    Ok(find_root_newton_raphson(x0, &f, &df, &mut tol)?)
}

/// Mean Keplerian elements at the TLE epoch.
///
/// Units
/// -----
/// * `reference_epoch`: MJD
/// * `semi_major_axis`: km
/// * `eccentricity`: unitless
/// * angles: radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeplerianElements {
    pub reference_epoch: f64,
    pub semi_major_axis: Kilometer,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_argument: Radian,
    pub mean_anomaly: Radian,
}

impl KeplerianElements {
    /// Build the elements of a record already in internal units.
    ///
    /// The mean motion must be strictly positive, otherwise the semi-major axis is not finite.
    pub fn from_record(record: &OrbitalRecord) -> Self {
        let gravity = record.gravity_model().constants();
        let a_er = (gravity.xke / record.mean_motion()).powf(2.0 / 3.0);

        KeplerianElements {
            reference_epoch: record.mjd_epoch(),
            semi_major_axis: a_er * gravity.radius_earth_km,
            eccentricity: record.eccentricity(),
            inclination: record.inclination(),
            ascending_node_longitude: principal_angle(record.right_ascension()),
            periapsis_argument: principal_angle(record.argument_of_perigee()),
            mean_anomaly: principal_angle(record.mean_anomaly()),
        }
    }

    pub fn perigee(&self) -> Kilometer {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn apogee(&self) -> Kilometer {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Rotation from the perifocal frame to the frame of the elements.
    fn perifocal_rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), self.ascending_node_longitude)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), self.inclination)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.periapsis_argument)
    }

    /// Position and velocity at the reference epoch.
    ///
    /// Arguments
    /// -----------------
    /// * `mean_motion` – Mean motion (radians/minute) consistent with the semi-major axis.
    ///
    /// Return
    /// ----------
    /// * `(position [km], velocity [km/s])`, or the error of [`solve_kepler`].
    pub fn state_at_epoch(
        &self,
        mean_motion: f64,
    ) -> Result<(Vector3<f64>, Vector3<f64>), TleError> {
        let e = self.eccentricity;
        let a = self.semi_major_axis;
        let e_anom = solve_kepler(e, self.mean_anomaly)?;

        let (sin_e, cos_e) = e_anom.sin_cos();
        let sqrt_one_minus_e2 = (1.0 - e * e).sqrt();

        let position = Vector3::new(a * (cos_e - e), a * sqrt_one_minus_e2 * sin_e, 0.0);

        // km/min → km/s
        let speed_factor = mean_motion * a / (1.0 - e * cos_e) / 60.0;
        let velocity = Vector3::new(
            -speed_factor * sin_e,
            speed_factor * sqrt_one_minus_e2 * cos_e,
            0.0,
        );

        let rotation = self.perifocal_rotation();
        Ok((rotation * position, rotation * velocity))
    }
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Keplerian Elements @ epoch (MJD): {:.6}",
            self.reference_epoch
        )?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.3} km",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.7}",
            self.eccentricity
        )?;
        for (label, value) in [
            ("i   (inclination)          ", self.inclination),
            ("Ω   (longitude of node)    ", self.ascending_node_longitude),
            ("ω   (argument of perigee)  ", self.periapsis_argument),
        ] {
            writeln!(f, "  {label} = {value:.6} rad ({:.4}°)", value * RAD2DEG)?;
        }
        write!(
            f,
            "  M   (mean anomaly)          = {:.6} rad ({:.4}°)",
            self.mean_anomaly,
            self.mean_anomaly * RAD2DEG
        )
    }
}
