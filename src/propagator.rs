//! # Propagator hand-off
//!
//! The propagation engine is not part of this crate. It is reached through
//! [`PropagatorInit`], a single initialization call receiving the normalized record, the
//! operation mode, and the epoch as **days since 1950 Jan 0.0**, i.e. 1949-12-31 00:00 UTC
//! (`julian_epoch − 2433281.5`).
//!
//! [`Satellite::from_tle`] runs the whole pipeline:
//!
//! ```text
//! validate → decode → resolve epoch → normalize units → initialize
//! ```
//!
//! The initializer may store its own coefficients (returned as
//! [`PropagatorInit::Coefficients`]) and may write an error code with
//! [`OrbitalRecord::set_error_state`]. The satellite is returned whatever that code is; reading
//! it is up to the caller.
//!
//! ## Example
//!
//! ```rust
//! use tlekit::propagator::{OpsMode, Satellite};
//! use tlekit::two_body::TwoBodyInit;
//!
//! let line1 = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
//! let line2 = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";
//!
//! let sat = Satellite::from_tle(line1, line2, "wgs72", OpsMode::Improved, &TwoBodyInit).unwrap();
//! assert_eq!(sat.error_state(), 0);
//! ```
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    constants::JD_1950,
    orbital_record::OrbitalRecord,
    time::{CalendarDecomposer, JulianDayCalculator, UtcCalendar},
    tle_errors::TleError,
};

/// Operation mode handed to the propagator initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OpsMode {
    /// Legacy AFSPC behaviour
    #[serde(rename = "a")]
    Afspc,
    /// Improved behaviour
    #[default]
    #[serde(rename = "i")]
    Improved,
}

impl OpsMode {
    pub fn as_char(&self) -> char {
        match self {
            OpsMode::Afspc => 'a',
            OpsMode::Improved => 'i',
        }
    }
}

impl fmt::Display for OpsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OpsMode {
    type Err = TleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "afspc" => Ok(OpsMode::Afspc),
            "i" | "improved" => Ok(OpsMode::Improved),
            _ => Err(TleError::UnknownOpsMode(s.to_string())),
        }
    }
}

/// Initialization interface of an external propagator.
pub trait PropagatorInit {
    /// Propagation coefficients computed at initialization
    type Coefficients;

    /// Initialize from a record in internal units.
    ///
    /// Arguments
    /// -----------------
    /// * `record` – The normalized record; the initializer may set its error state.
    /// * `ops_mode` – Operation mode.
    /// * `epoch_offset` – Epoch in days since 1950 Jan 0.0 (1949-12-31 00:00 UTC).
    fn initialize(
        &self,
        record: &mut OrbitalRecord,
        ops_mode: OpsMode,
        epoch_offset: f64,
    ) -> Self::Coefficients;
}

/// A normalized record together with the coefficients of its propagator.
#[derive(Debug, Clone, PartialEq)]
pub struct Satellite<C> {
    record: OrbitalRecord,
    coefficients: C,
}

impl<C> Satellite<C> {
    /// Decode, normalize and initialize a TLE pair.
    ///
    /// Arguments
    /// -----------------
    /// * `line1`, `line2` – The two element lines.
    /// * `gravity_model` – Name of the gravity model (`"wgs72old"`, `"wgs72"`, `"wgs84"`).
    /// * `ops_mode` – Operation mode handed to the initializer.
    /// * `initializer` – The external propagator initializer.
    ///
    /// Return
    /// ----------
    /// * The initialized satellite, or the first decoding [`TleError`]. A non-zero error state
    ///   set by the initializer is **not** an error here.
    pub fn from_tle<P>(
        line1: &str,
        line2: &str,
        gravity_model: &str,
        ops_mode: OpsMode,
        initializer: &P,
    ) -> Result<Self, TleError>
    where
        P: PropagatorInit<Coefficients = C> + ?Sized,
    {
        Self::from_tle_with(line1, line2, gravity_model, ops_mode, initializer, &UtcCalendar)
    }

    /// Same as [`Satellite::from_tle`] with a custom calendar collaborator.
    pub fn from_tle_with<P, K>(
        line1: &str,
        line2: &str,
        gravity_model: &str,
        ops_mode: OpsMode,
        initializer: &P,
        calendar: &K,
    ) -> Result<Self, TleError>
    where
        P: PropagatorInit<Coefficients = C> + ?Sized,
        K: CalendarDecomposer + JulianDayCalculator + ?Sized,
    {
        let mut record = OrbitalRecord::from_tle_with(line1, line2, gravity_model, calendar)?;
        record.normalize_units();

        let epoch_offset = record.julian_epoch() - JD_1950;
        let coefficients = initializer.initialize(&mut record, ops_mode, epoch_offset);

        if record.error_state() != 0 {
            warn!(
                catalog_number = record.catalog_number(),
                error_state = record.error_state(),
                "propagator initialization reported an error"
            );
        } else {
            debug!(
                catalog_number = record.catalog_number(),
                epoch_offset,
                %ops_mode,
                "satellite initialized"
            );
        }

        Ok(Satellite {
            record,
            coefficients,
        })
    }

    pub fn record(&self) -> &OrbitalRecord {
        &self.record
    }

    pub fn coefficients(&self) -> &C {
        &self.coefficients
    }

    /// Error code left by the initializer (`0` = no error).
    pub fn error_state(&self) -> i32 {
        self.record.error_state()
    }

    pub fn into_parts(self) -> (OrbitalRecord, C) {
        (self.record, self.coefficients)
    }
}
