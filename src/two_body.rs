//! # Two-body reference initializer
//!
//! [`TwoBodyInit`] is a small [`PropagatorInit`] implementation that does **not** model any
//! perturbation. It is useful to sanity-check decoded element sets and as a reference for
//! writing a real initializer against the [`OrbitalRecord`] contract.
//!
//! ## Error codes
//!
//! Like a full propagator, it reports problems through the record error state instead of
//! failing the assembly:
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | `1`  | eccentricity outside `[0, 1)` or `a < 0.95` Earth radii   |
//! | `2`  | mean motion `≤ 0`                                         |
//! | `5`  | Kepler's equation did not converge                        |
//! | `6`  | perigee below the Earth surface (decayed orbit)           |
//!
//! When a code is set no coefficients are produced.
use nalgebra::Vector3;
use serde::Serialize;
use tracing::trace;

use crate::{
    constants::{Kilometer, TWOPI},
    keplerian_element::KeplerianElements,
    orbital_record::OrbitalRecord,
    propagator::{OpsMode, PropagatorInit},
};

/// Minimal semi-major axis accepted, in Earth radii.
const MIN_SEMI_MAJOR_AXIS_ER: f64 = 0.95;

pub const ERROR_ELEMENTS: i32 = 1;
pub const ERROR_MEAN_MOTION: i32 = 2;
pub const ERROR_KEPLER: i32 = 5;
pub const ERROR_DECAYED: i32 = 6;

/// Two-body initializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoBodyInit;

/// Epoch state of a two-body orbit.
///
/// Units
/// -----
/// * `position_km`: km
/// * `velocity_km_s`: km/s
/// * `period_minutes`: minutes
/// * `perigee_km`, `apogee_km`: km from the Earth center
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwoBodyCoefficients {
    pub elements: KeplerianElements,
    pub position_km: Vector3<f64>,
    pub velocity_km_s: Vector3<f64>,
    pub period_minutes: f64,
    pub perigee_km: Kilometer,
    pub apogee_km: Kilometer,
}

impl TwoBodyInit {
    fn compute(record: &OrbitalRecord) -> Result<TwoBodyCoefficients, i32> {
        let mean_motion = record.mean_motion();
        if mean_motion <= 0.0 {
            return Err(ERROR_MEAN_MOTION);
        }

        let radius_earth = record.gravity_model().constants().radius_earth_km;
        let elements = KeplerianElements::from_record(record);

        if !(0.0..1.0).contains(&elements.eccentricity)
            || elements.semi_major_axis < MIN_SEMI_MAJOR_AXIS_ER * radius_earth
        {
            return Err(ERROR_ELEMENTS);
        }

        let perigee_km = elements.perigee();
        if perigee_km < radius_earth {
            return Err(ERROR_DECAYED);
        }

        let (position_km, velocity_km_s) = elements
            .state_at_epoch(mean_motion)
            .map_err(|_| ERROR_KEPLER)?;

        Ok(TwoBodyCoefficients {
            elements,
            position_km,
            velocity_km_s,
            period_minutes: TWOPI / mean_motion,
            perigee_km,
            apogee_km: elements.apogee(),
        })
    }
}

impl PropagatorInit for TwoBodyInit {
    type Coefficients = Option<TwoBodyCoefficients>;

    fn initialize(
        &self,
        record: &mut OrbitalRecord,
        ops_mode: OpsMode,
        epoch_offset: f64,
    ) -> Option<TwoBodyCoefficients> {
        trace!(%ops_mode, epoch_offset, "two-body initialization");

        match Self::compute(record) {
            Ok(coefficients) => {
                record.set_error_state(0);
                Some(coefficients)
            }
            Err(code) => {
                record.set_error_state(code);
                None
            }
        }
    }
}
