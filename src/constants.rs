//! # Constants and type definitions for tlekit
//!
//! This module centralizes the **conversion factors**, **reference epochs**, and **common type
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, revolutions/day ↔ radians/minute)
//! - Julian date reference points (1950 Jan 0.0, MJD origin)
//! - Core type aliases used across the crate
//!
//! Every value here is a plain `const`: nothing in the crate holds mutable global state.

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const TWOPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const DEG2RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees
pub const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;

/// Number of minutes in a day
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Minutes per day over radians per revolution.
///
/// Dividing a mean motion in revolutions/day by `XPDOTP` yields radians/minute.
pub const XPDOTP: f64 = MINUTES_PER_DAY / TWOPI;

// -------------------------------------------------------------------------------------------------
// Reference epochs
// -------------------------------------------------------------------------------------------------

/// Julian date of 1950 Jan 0.0 (1949-12-31 00:00 UTC), origin of the propagator time argument
pub const JD_1950: f64 = 2_433_281.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2_400_000.5;

/// Two-digit epoch years strictly below this hinge belong to the 21st century
pub const EPOCH_YEAR_HINGE: i64 = 57;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Mean motion in revolutions per day
pub type RevPerDay = f64;
/// Julian Date (days)
pub type JulianDate = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
/// NORAD catalog number of a satellite
pub type CatalogNumber = u32;
