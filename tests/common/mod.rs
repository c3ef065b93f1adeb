#![allow(dead_code)]

use std::ops::Range;

use approx::assert_relative_eq;
use tlekit::orbital_record::OrbitalRecord;

pub const ISS_LINE1: &str =
    "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
pub const ISS_LINE2: &str =
    "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

/// Synthetic sun-synchronous set with its epoch on 2024-01-01 00:00 UTC.
pub const SSO_LINE1: &str =
    "1 58013U 23157A   24001.00000000  .00012345  12345-5  34567-3 0  9995";
pub const SSO_LINE2: &str =
    "2 58013  97.4012  10.5000 0012345  90.0000 270.0000 15.21345678 12343";

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/data/{name}")).unwrap()
}

/// Overwrite some columns of a line, keeping every other column in place.
pub fn with_columns(line: &str, columns: Range<usize>, replacement: &str) -> String {
    assert_eq!(columns.len(), replacement.len());
    format!(
        "{}{}{}",
        &line[..columns.start],
        replacement,
        &line[columns.end..]
    )
}

/// Compare the numeric content of two records.
pub fn assert_record_close(actual: &OrbitalRecord, expected: &OrbitalRecord, max_relative: f64) {
    assert_eq!(actual.catalog_number(), expected.catalog_number());
    assert_eq!(actual.epoch_year(), expected.epoch_year());
    assert_eq!(actual.units(), expected.units());
    assert_relative_eq!(
        actual.julian_epoch(),
        expected.julian_epoch(),
        max_relative = max_relative
    );
    for (a, e) in [
        (actual.mean_motion(), expected.mean_motion()),
        (actual.mean_motion_dot(), expected.mean_motion_dot()),
        (actual.mean_motion_ddot(), expected.mean_motion_ddot()),
        (actual.bstar(), expected.bstar()),
        (actual.inclination(), expected.inclination()),
        (actual.right_ascension(), expected.right_ascension()),
        (actual.eccentricity(), expected.eccentricity()),
        (actual.argument_of_perigee(), expected.argument_of_perigee()),
        (actual.mean_anomaly(), expected.mean_anomaly()),
    ] {
        assert_relative_eq!(a, e, max_relative = max_relative);
    }
}
