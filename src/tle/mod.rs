//! # Two-Line Element decoding
//!
//! Utilities to validate a TLE pair and decode its fixed-width columns into raw numeric values
//! expressed in the **external units** of the format (degrees, revolutions/day).
//!
//! ## Overview
//! -----------------
//! * [`validate_lines`] – the only structural gate: line 1 must hold at least
//!   [`LINE1_MIN_LENGTH`] bytes and line 2 at least [`LINE2_MIN_LENGTH`]. Nothing else is
//!   checked here; a bad character inside a column is reported by the numeric parse of that
//!   column.
//! * [`decode_lines`] – validation followed by the per-field decoding of [`fields`].
//! * [`catalog`] – splitting of a multi-entry text block into TLE sets.
//!
//! Decoding stops at the first failing field, in column order, and no partial result is
//! returned.
pub mod catalog;
pub mod fields;

use tracing::debug;

use crate::{
    constants::{CatalogNumber, Degree, RevPerDay},
    tle_errors::TleError,
};
use fields::{decode_field, TleField};

/// Minimum length of line 1: end of the bstar columns.
pub const LINE1_MIN_LENGTH: usize = 61;
/// Minimum length of line 2: end of the mean motion columns.
pub const LINE2_MIN_LENGTH: usize = 63;

/// Raw content of a TLE pair, in the units of the format.
///
/// Units
/// -----
/// * `epoch_year`: two-digit year, as written
/// * `epoch_days`: fractional day of year
/// * `mean_motion_dot`: rev/day²  (already divided by 2 in the format)
/// * `mean_motion_ddot`: rev/day³ (already divided by 6 in the format)
/// * `bstar`: 1 / Earth radii
/// * angles: degrees
/// * `mean_motion`: rev/day
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTle {
    pub catalog_number: CatalogNumber,
    pub epoch_year: i64,
    pub epoch_days: f64,
    pub mean_motion_dot: f64,
    pub mean_motion_ddot: f64,
    pub bstar: f64,
    pub inclination: Degree,
    pub right_ascension: Degree,
    pub eccentricity: f64,
    pub argument_of_perigee: Degree,
    pub mean_anomaly: Degree,
    pub mean_motion: RevPerDay,
}

/// Check the minimal lengths of a TLE pair.
///
/// Return
/// ----------
/// * [`TleError::Format`] naming the first line that is too short.
pub fn validate_lines(line1: &str, line2: &str) -> Result<(), TleError> {
    for (number, line, required) in [(1, line1, LINE1_MIN_LENGTH), (2, line2, LINE2_MIN_LENGTH)] {
        if line.len() < required {
            return Err(TleError::Format {
                line: number,
                length: line.len(),
                required,
            });
        }
    }
    Ok(())
}

/// Validate then decode a TLE pair.
///
/// Arguments
/// -----------------
/// * `line1` – First element line (`"1 NNNNNC ..."`).
/// * `line2` – Second element line (`"2 NNNNN ..."`).
///
/// Return
/// ----------
/// * The [`DecodedTle`] in external units, [`TleError::Format`] if a line is too short, or the
///   [`TleError::FieldParse`] of the first field that fails.
pub fn decode_lines(line1: &str, line2: &str) -> Result<DecodedTle, TleError> {
    validate_lines(line1, line2)?;
    decode_fields(line1, line2)
}

/// Decode every field, in column order. Callers validate the lengths first.
pub(crate) fn decode_fields(line1: &str, line2: &str) -> Result<DecodedTle, TleError> {
    let decoded = DecodedTle {
        catalog_number: decode_field(line1, TleField::CatalogNumber)?,
        epoch_year: decode_field(line1, TleField::EpochYear)?,
        epoch_days: decode_field(line1, TleField::EpochDays)?,
        mean_motion_dot: decode_field(line1, TleField::MeanMotionDot)?,
        mean_motion_ddot: decode_field(line1, TleField::MeanMotionDdot)?,
        bstar: decode_field(line1, TleField::Bstar)?,
        inclination: decode_field(line2, TleField::Inclination)?,
        right_ascension: decode_field(line2, TleField::RightAscension)?,
        eccentricity: decode_field(line2, TleField::Eccentricity)?,
        argument_of_perigee: decode_field(line2, TleField::ArgumentOfPerigee)?,
        mean_anomaly: decode_field(line2, TleField::MeanAnomaly)?,
        mean_motion: decode_field(line2, TleField::MeanMotion)?,
    };

    debug!(
        catalog_number = decoded.catalog_number,
        epoch_year = decoded.epoch_year,
        epoch_days = decoded.epoch_days,
        "decoded TLE fields"
    );
    Ok(decoded)
}

#[cfg(test)]
mod tle_test {
    use super::*;
    use fields::{LINE1_FIELDS, LINE2_FIELDS};

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn test_min_lengths_match_column_tables() {
        let end = |table: &[fields::FieldSpec]| table.iter().map(|s| s.columns.end).max();
        assert_eq!(end(&LINE1_FIELDS[..]), Some(LINE1_MIN_LENGTH));
        assert_eq!(end(&LINE2_FIELDS[..]), Some(LINE2_MIN_LENGTH));
    }

    #[test]
    fn test_validate_lines() {
        assert_eq!(validate_lines(ISS_LINE1, ISS_LINE2), Ok(()));
        assert_eq!(
            validate_lines(&ISS_LINE1[..61], &ISS_LINE2[..63]),
            Ok(())
        );
        assert_eq!(
            validate_lines(&ISS_LINE1[..60], ISS_LINE2),
            Err(TleError::Format {
                line: 1,
                length: 60,
                required: 61
            })
        );
        assert_eq!(
            validate_lines(ISS_LINE1, &ISS_LINE2[..62]),
            Err(TleError::Format {
                line: 2,
                length: 62,
                required: 63
            })
        );
    }

    #[test]
    fn test_validate_only_checks_length() {
        let garbage1 = "x".repeat(61);
        let garbage2 = "y".repeat(63);
        assert_eq!(validate_lines(&garbage1, &garbage2), Ok(()));
        assert_eq!(
            decode_lines(&garbage1, &garbage2),
            Err(TleError::FieldParse {
                field: TleField::CatalogNumber,
                raw: "xxxxx".into()
            })
        );
    }

    #[test]
    fn test_short_line_is_rejected_before_any_field() {
        // the catalog number is invalid as well, the length error must win
        let line1 = "1 ABCDEU 98067A   08264.51782528 -.00002182  00000-0";
        assert_eq!(
            decode_lines(line1, ISS_LINE2),
            Err(TleError::Format {
                line: 1,
                length: line1.len(),
                required: 61
            })
        );
    }

    #[test]
    fn test_decode_iss() {
        let decoded = decode_lines(ISS_LINE1, ISS_LINE2).unwrap();
        assert_eq!(
            decoded,
            DecodedTle {
                catalog_number: 25544,
                epoch_year: 8,
                epoch_days: 264.51782528,
                mean_motion_dot: -0.00002182,
                mean_motion_ddot: 0.0,
                bstar: -0.11606e-4,
                inclination: 51.6416,
                right_ascension: 247.4627,
                eccentricity: 0.0006703,
                argument_of_perigee: 130.5360,
                mean_anomaly: 325.0288,
                mean_motion: 15.72125391,
            }
        );
    }

    #[test]
    fn test_decode_is_deterministic() {
        assert_eq!(
            decode_lines(ISS_LINE1, ISS_LINE2),
            decode_lines(ISS_LINE1, ISS_LINE2)
        );
    }

    #[test]
    fn test_first_failing_field_wins() {
        let line1 = "1 25544U 98067A   08264.5178252x -.0000218x  00000-0 -11606-4 0  2927";
        assert_eq!(
            decode_lines(line1, ISS_LINE2),
            Err(TleError::FieldParse {
                field: TleField::EpochDays,
                raw: "264.5178252x".into()
            })
        );
    }

    #[test]
    fn test_blank_line2_field() {
        let line2 = "2 25544  51.6416 247.4627 0006703 130.5360          15.72125391563537";
        assert_eq!(
            decode_lines(ISS_LINE1, line2),
            Err(TleError::FieldParse {
                field: TleField::MeanAnomaly,
                raw: "        ".into()
            })
        );
    }
}
