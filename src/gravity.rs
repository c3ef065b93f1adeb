//! # Gravity models
//!
//! The propagator needs a consistent set of Earth constants (gravitational parameter,
//! equatorial radius, zonal harmonics). A TLE does not say which set was used to fit it, so
//! the caller picks one by name when decoding:
//!
//! | Name        | Variant                      | Notes                                   |
//! |-------------|------------------------------|-----------------------------------------|
//! | `wgs72old`  | [`GravityModel::Wgs72Old`]   | legacy `xke`, kept for compatibility    |
//! | `wgs72`     | [`GravityModel::Wgs72`]      | the set element sets are generated with |
//! | `wgs84`     | [`GravityModel::Wgs84`]      |                                         |
//!
//! ```
//! use tlekit::gravity::GravityModel;
//!
//! let model: GravityModel = "wgs72".parse().unwrap();
//! assert_eq!(model.constants().radius_earth_km, 6378.135);
//! ```
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{constants::Kilometer, tle_errors::TleError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityModel {
    Wgs72Old,
    #[default]
    Wgs72,
    Wgs84,
}

/// Physical constants of a gravity model.
///
/// Units
/// -----
/// * `mu`: km³/s²
/// * `radius_earth_km`: km
/// * `xke`: sqrt(mu) expressed in Earth radii³ / minute², i.e. `60 / sqrt(r³ / mu)`
/// * `tumin`: minutes per time unit, `1 / xke`
/// * `j2`, `j3`, `j4`, `j3oj2`: unitless
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityConstants {
    pub mu: f64,
    pub radius_earth_km: Kilometer,
    pub xke: f64,
    pub tumin: f64,
    pub j2: f64,
    pub j3: f64,
    pub j4: f64,
    pub j3oj2: f64,
}

impl GravityConstants {
    fn new(mu: f64, radius_earth_km: Kilometer, j2: f64, j3: f64, j4: f64) -> Self {
        let xke = 60.0 / (radius_earth_km.powi(3) / mu).sqrt();
        Self::with_xke(mu, radius_earth_km, xke, j2, j3, j4)
    }

    fn with_xke(mu: f64, radius_earth_km: Kilometer, xke: f64, j2: f64, j3: f64, j4: f64) -> Self {
        GravityConstants {
            mu,
            radius_earth_km,
            xke,
            tumin: 1.0 / xke,
            j2,
            j3,
            j4,
            j3oj2: j3 / j2,
        }
    }
}

impl GravityModel {
    pub fn name(&self) -> &'static str {
        match self {
            GravityModel::Wgs72Old => "wgs72old",
            GravityModel::Wgs72 => "wgs72",
            GravityModel::Wgs84 => "wgs84",
        }
    }

    pub fn constants(&self) -> GravityConstants {
        match self {
            GravityModel::Wgs72Old => GravityConstants::with_xke(
                398600.79964,
                6378.135,
                0.0743669161,
                0.001082616,
                -0.00000253881,
                -0.00000165597,
            ),
            GravityModel::Wgs72 => GravityConstants::new(
                398600.8,
                6378.135,
                0.001082616,
                -0.00000253881,
                -0.00000165597,
            ),
            GravityModel::Wgs84 => GravityConstants::new(
                398600.5,
                6378.137,
                0.00108262998905,
                -0.00000253215306,
                -0.00000161098761,
            ),
        }
    }
}

impl fmt::Display for GravityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GravityModel {
    type Err = TleError;

    /// Parse a gravity model name (case-insensitive, surrounding blanks ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wgs72old" => Ok(GravityModel::Wgs72Old),
            "wgs72" => Ok(GravityModel::Wgs72),
            "wgs84" => Ok(GravityModel::Wgs84),
            _ => Err(TleError::UnknownGravityModel(s.to_string())),
        }
    }
}

impl TryFrom<&str> for GravityModel {
    type Error = TleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
