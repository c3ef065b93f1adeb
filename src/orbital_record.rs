//! # Orbital record
//!
//! [`OrbitalRecord`] is the decoded, epoch-resolved form of one TLE pair, owned by the caller
//! that parsed it.
//!
//! ## Lifecycle
//! -----------------
//! 1. [`OrbitalRecord::from_tle`] validates, decodes and resolves the epoch. Values are in the
//!    **external units** of the format: degrees and revolutions/day.
//! 2. [`OrbitalRecord::normalize_units`] rescales them to the **internal units** of the
//!    propagator: radians and radians/minute.
//! 3. A [`PropagatorInit`](crate::propagator::PropagatorInit) initializes its coefficients and
//!    may set [`OrbitalRecord::error_state`].
//!
//! After step 3 only the error state may still change.
//!
//! ## Unit conversions
//! -----------------
//! | Field                     | External | Internal | Factor                |
//! |---------------------------|----------|----------|-----------------------|
//! | `mean_motion`             | rev/day  | rad/min  | `/ XPDOTP`            |
//! | `mean_motion_dot`         | rev/day² | rad/min² | `/ (XPDOTP · 1440)`   |
//! | `mean_motion_ddot`        | rev/day³ | rad/min³ | `/ (XPDOTP · 1440²)`  |
//! | angles                    | degrees  | radians  | `· DEG2RAD`           |
//! | `eccentricity`, `bstar`   | –        | –        | unchanged             |
//!
//! The normalization runs **exactly once** per record. Nothing prevents a second call and a
//! second call rescales again: [`OrbitalRecord::units`] only reports the current state.
use serde::Serialize;
use tracing::debug;

use crate::{
    constants::{
        CatalogNumber, Degree, JulianDate, RevPerDay, DEG2RAD, MINUTES_PER_DAY, MJD, XPDOTP,
    },
    gravity::GravityModel,
    time::{
        jd_to_epoch, jd_to_mjd, resolve_julian_epoch, CalendarDecomposer, JulianDayCalculator,
        UtcCalendar,
    },
    tle::{self, DecodedTle},
    tle_errors::TleError,
};

/// Unit system of the element fields of an [`OrbitalRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Degrees and revolutions/day, as written in the TLE
    External,
    /// Radians and radians/minute, as used by the propagator
    Internal,
}

/// Summary of the orbit in the external units of the TLE, captured before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Elements {
    pub mean_motion: RevPerDay,
    pub eccentricity: f64,
    pub inclination: Degree,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitalRecord {
    line1: String,
    line2: String,
    catalog_number: CatalogNumber,
    epoch_year: i32,
    epoch_days: f64,
    julian_epoch: JulianDate,
    mean_motion_dot: f64,
    mean_motion_ddot: f64,
    bstar: f64,
    inclination: f64,
    right_ascension: f64,
    eccentricity: f64,
    argument_of_perigee: f64,
    mean_anomaly: f64,
    mean_motion: f64,
    elements: Elements,
    gravity_model: GravityModel,
    units: Units,
    error_state: i32,
}

impl OrbitalRecord {
    /// Decode a TLE pair into a record in external units.
    ///
    /// The epoch is resolved with the default [`UtcCalendar`].
    ///
    /// Arguments
    /// -----------------
    /// * `line1`, `line2` – The two element lines.
    /// * `gravity_model` – Name of the gravity model (`"wgs72old"`, `"wgs72"`, `"wgs84"`).
    ///
    /// Return
    /// ----------
    /// * The decoded record, or the first [`TleError`] met. Line lengths are checked before the
    ///   gravity model name and before any field is read.
    ///
    /// See also
    /// ------------
    /// * [`OrbitalRecord::from_tle_with`] – Same with custom calendar collaborators.
    /// * [`Satellite::from_tle`](crate::propagator::Satellite::from_tle) – Decode, normalize
    ///   and initialize in one call.
    pub fn from_tle(line1: &str, line2: &str, gravity_model: &str) -> Result<Self, TleError> {
        Self::from_tle_with(line1, line2, gravity_model, &UtcCalendar)
    }

    /// Decode a TLE pair, resolving the epoch with the given calendar collaborator.
    pub fn from_tle_with<C>(
        line1: &str,
        line2: &str,
        gravity_model: &str,
        calendar: &C,
    ) -> Result<Self, TleError>
    where
        C: CalendarDecomposer + JulianDayCalculator + ?Sized,
    {
        tle::validate_lines(line1, line2)?;
        let gravity_model: GravityModel = gravity_model.parse()?;
        let decoded = tle::decode_fields(line1, line2)?;
        let epoch =
            resolve_julian_epoch(decoded.epoch_year, decoded.epoch_days, calendar, calendar)?;

        let DecodedTle {
            catalog_number,
            epoch_days,
            mean_motion_dot,
            mean_motion_ddot,
            bstar,
            inclination,
            right_ascension,
            eccentricity,
            argument_of_perigee,
            mean_anomaly,
            mean_motion,
            ..
        } = decoded;

        debug!(
            catalog_number,
            epoch_year = epoch.year,
            julian_epoch = epoch.julian_date,
            %gravity_model,
            "decoded orbital record"
        );

        Ok(OrbitalRecord {
            line1: line1.to_string(),
            line2: line2.to_string(),
            catalog_number,
            epoch_year: epoch.year,
            epoch_days,
            julian_epoch: epoch.julian_date,
            mean_motion_dot,
            mean_motion_ddot,
            bstar,
            inclination,
            right_ascension,
            eccentricity,
            argument_of_perigee,
            mean_anomaly,
            mean_motion,
            elements: Elements {
                mean_motion,
                eccentricity,
                inclination,
            },
            gravity_model,
            units: Units::External,
            error_state: 0,
        })
    }

    /// Rescale the element fields from external to internal units.
    ///
    /// The [`Elements`] snapshot is left untouched.
    ///
    /// # Caller contract
    /// Call once per record. A second call divides and multiplies again and silently corrupts
    /// the record; [`OrbitalRecord::units`] is not consulted.
    pub fn normalize_units(&mut self) {
        self.mean_motion /= XPDOTP;
        self.mean_motion_dot /= XPDOTP * MINUTES_PER_DAY;
        self.mean_motion_ddot /= XPDOTP * MINUTES_PER_DAY * MINUTES_PER_DAY;

        self.inclination *= DEG2RAD;
        self.right_ascension *= DEG2RAD;
        self.argument_of_perigee *= DEG2RAD;
        self.mean_anomaly *= DEG2RAD;

        self.units = Units::Internal;
    }

    /// Record an initializer status. `0` means no error; other codes belong to the initializer.
    pub fn set_error_state(&mut self, code: i32) {
        self.error_state = code;
    }

    pub fn line1(&self) -> &str {
        &self.line1
    }

    pub fn line2(&self) -> &str {
        &self.line2
    }

    pub fn catalog_number(&self) -> CatalogNumber {
        self.catalog_number
    }

    /// Four-digit epoch year.
    pub fn epoch_year(&self) -> i32 {
        self.epoch_year
    }

    /// Fractional day of year of the epoch (1.0 = January 1st, 00:00 UTC).
    pub fn epoch_days(&self) -> f64 {
        self.epoch_days
    }

    /// Julian date of the epoch (UTC).
    pub fn julian_epoch(&self) -> JulianDate {
        self.julian_epoch
    }

    /// Modified Julian date of the epoch (UTC).
    pub fn mjd_epoch(&self) -> MJD {
        jd_to_mjd(self.julian_epoch)
    }

    /// Epoch as a hifitime [`Epoch`](hifitime::Epoch).
    pub fn epoch(&self) -> hifitime::Epoch {
        jd_to_epoch(self.julian_epoch)
    }

    pub fn mean_motion_dot(&self) -> f64 {
        self.mean_motion_dot
    }

    pub fn mean_motion_ddot(&self) -> f64 {
        self.mean_motion_ddot
    }

    pub fn bstar(&self) -> f64 {
        self.bstar
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    pub fn right_ascension(&self) -> f64 {
        self.right_ascension
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn argument_of_perigee(&self) -> f64 {
        self.argument_of_perigee
    }

    pub fn mean_anomaly(&self) -> f64 {
        self.mean_anomaly
    }

    pub fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    /// Snapshot of mean motion, eccentricity and inclination in external units.
    pub fn elements(&self) -> Elements {
        self.elements
    }

    pub fn gravity_model(&self) -> GravityModel {
        self.gravity_model
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn error_state(&self) -> i32 {
        self.error_state
    }
}
