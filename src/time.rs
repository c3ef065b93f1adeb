//! # Epoch resolution
//!
//! A TLE stores its epoch as a two-digit year and a fractional day of year
//! (`1.0` = January 1st, 00:00 UTC). This module turns it into a four-digit year and a
//! Julian date.
//!
//! ## Overview
//! -----------------
//! * [`resolve_epoch_year`] – the `57` hinge: `yy < 57 → 20yy`, otherwise `19yy`.
//! * [`CalendarDecomposer`] – `(year, day of year) → (month, day, hour, minute, second)`.
//! * [`JulianDayCalculator`] – `(year, month, day, hour, minute, second) → Julian date`.
//! * [`resolve_julian_epoch`] – wires the two collaborators together without doing any
//!   calendar arithmetic itself; their errors are returned unchanged.
//! * [`UtcCalendar`] – the default collaborator for both traits, backed by
//!   [hifitime](https://docs.rs/hifitime). The Julian date is computed from whole seconds:
//!   the fractional part of the second is truncated.
use hifitime::{Epoch, Unit};

use crate::{
    constants::{JulianDate, EPOCH_YEAR_HINGE, JDTOMJD, MJD},
    tle_errors::TleError,
};

/// Calendar date and time of day within a known year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDate {
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

/// Splits a fractional day of year into a calendar date.
pub trait CalendarDecomposer {
    fn decompose(&self, year: i32, day_of_year: f64) -> Result<CalendarDate, TleError>;
}

/// Computes the Julian date of a calendar date.
pub trait JulianDayCalculator {
    fn julian_day(&self, year: i32, date: &CalendarDate) -> Result<JulianDate, TleError>;
}

/// Resolved TLE epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEpoch {
    /// Four-digit year
    pub year: i32,
    /// Julian date (UTC)
    pub julian_date: JulianDate,
}

/// Expand a two-digit TLE epoch year.
///
/// ```
/// use tlekit::time::resolve_epoch_year;
///
/// assert_eq!(resolve_epoch_year(56), 2056);
/// assert_eq!(resolve_epoch_year(57), 1957);
/// ```
pub fn resolve_epoch_year(two_digit_year: i64) -> i32 {
    let century = if two_digit_year < EPOCH_YEAR_HINGE {
        2000
    } else {
        1900
    };
    (century + two_digit_year) as i32
}

/// Resolve a TLE epoch into a four-digit year and a Julian date.
///
/// Arguments
/// -----------------
/// * `two_digit_year` – The epoch year as found in columns `18..20` of line 1.
/// * `day_of_year` – The fractional day of year (columns `20..32`).
/// * `decomposer` – Collaborator splitting the day of year into a calendar date.
/// * `calculator` – Collaborator computing the Julian date of that calendar date.
///
/// Return
/// ----------
/// * A [`ResolvedEpoch`], or the first collaborator error, unchanged.
pub fn resolve_julian_epoch<D, J>(
    two_digit_year: i64,
    day_of_year: f64,
    decomposer: &D,
    calculator: &J,
) -> Result<ResolvedEpoch, TleError>
where
    D: CalendarDecomposer + ?Sized,
    J: JulianDayCalculator + ?Sized,
{
    let year = resolve_epoch_year(two_digit_year);
    let date = decomposer.decompose(year, day_of_year)?;
    let julian_date = calculator.julian_day(year, &date)?;

    Ok(ResolvedEpoch { year, julian_date })
}

/// Default calendar collaborator (UTC, proleptic Gregorian).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UtcCalendar;

impl CalendarDecomposer for UtcCalendar {
    /// Split `day_of_year` into month, day, hour, minute and fractional second.
    ///
    /// Return
    /// ----------
    /// * [`TleError::DayOfYearOutOfRange`] when the day is not within `[1, days in year + 1)`
    ///   (NaN included).
    fn decompose(&self, year: i32, day_of_year: f64) -> Result<CalendarDate, TleError> {
        // TAI has no leap seconds, so adding days to it is plain calendar arithmetic
        let new_year = Epoch::maybe_from_gregorian_tai(year, 1, 1, 0, 0, 0, 0)?;
        let next_new_year = Epoch::maybe_from_gregorian_tai(year + 1, 1, 1, 0, 0, 0, 0)?;
        let days_in_year = (next_new_year - new_year).to_unit(Unit::Day);

        if !(1.0..days_in_year + 1.0).contains(&day_of_year) {
            return Err(TleError::DayOfYearOutOfRange { year, day_of_year });
        }

        let (_, month, day, hour, minute, second, nanos) =
            (new_year + Unit::Day * (day_of_year - 1.0)).to_gregorian_tai();

        Ok(CalendarDate {
            month,
            day,
            hour,
            minute,
            second: f64::from(second) + f64::from(nanos) * 1e-9,
        })
    }
}

impl JulianDayCalculator for UtcCalendar {
    /// Julian date (UTC) of `date`, with the fractional second truncated.
    fn julian_day(&self, year: i32, date: &CalendarDate) -> Result<JulianDate, TleError> {
        let epoch = Epoch::maybe_from_gregorian_utc(
            year,
            date.month,
            date.day,
            date.hour,
            date.minute,
            date.second.trunc() as u8,
            0,
        )?;

        Ok(epoch.to_jde_utc_days())
    }
}

/// Transformation from Julian date (UTC) to a hifitime [`Epoch`]
pub fn jd_to_epoch(jd: JulianDate) -> Epoch {
    Epoch::from_jde_utc(jd)
}

/// Transformation from Julian date (JD) to modified julian date (MJD)
pub fn jd_to_mjd(jd: JulianDate) -> MJD {
    jd - JDTOMJD
}
