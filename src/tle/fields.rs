//! # Fixed-column field lexer
//!
//! Each TLE field is described once, in [`LINE1_FIELDS`] and [`LINE2_FIELDS`], by a
//! [`FieldSpec`]: the field name, the half-open **byte** column range (0-based, end-exclusive),
//! and the [`DecodeRule`] turning the raw columns into parseable text.
//!
//! ## Decode rules
//! -----------------
//! * [`DecodeRule::Integer`] / [`DecodeRule::Float`] – surrounding blanks are trimmed.
//! * [`DecodeRule::SpacesStripped`] – at most two spaces are removed anywhere in the field.
//! * [`DecodeRule::ImpliedExponent`] – `sign(1) + mantissa(5) + exponent(2)` is rebuilt as
//!   `sign + "." + mantissa + "e" + exponent` by [`implied_exponent`].
//! * [`DecodeRule::ImpliedLeadingZero`] – the digits are prefixed with `"0."`.
//!
//! There is no default value: a blank field, or a sign without digits, is a
//! [`TleError::FieldParse`] carrying the field name and the raw columns.
use std::{borrow::Cow, fmt, ops::Range, str::FromStr};

use tracing::trace;

use crate::tle_errors::TleError;

/// Every field decoded from a TLE pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TleField {
    CatalogNumber,
    EpochYear,
    EpochDays,
    MeanMotionDot,
    MeanMotionDdot,
    Bstar,
    Inclination,
    RightAscension,
    Eccentricity,
    ArgumentOfPerigee,
    MeanAnomaly,
    MeanMotion,
}

impl TleField {
    pub fn name(&self) -> &'static str {
        match self {
            TleField::CatalogNumber => "catalog number",
            TleField::EpochYear => "epoch year",
            TleField::EpochDays => "epoch day of year",
            TleField::MeanMotionDot => "mean motion first derivative",
            TleField::MeanMotionDdot => "mean motion second derivative",
            TleField::Bstar => "bstar drag term",
            TleField::Inclination => "inclination",
            TleField::RightAscension => "right ascension of the ascending node",
            TleField::Eccentricity => "eccentricity",
            TleField::ArgumentOfPerigee => "argument of perigee",
            TleField::MeanAnomaly => "mean anomaly",
            TleField::MeanMotion => "mean motion",
        }
    }

    /// Column layout of this field.
    pub fn spec(&self) -> &'static FieldSpec {
        match self {
            TleField::CatalogNumber => &LINE1_FIELDS[0],
            TleField::EpochYear => &LINE1_FIELDS[1],
            TleField::EpochDays => &LINE1_FIELDS[2],
            TleField::MeanMotionDot => &LINE1_FIELDS[3],
            TleField::MeanMotionDdot => &LINE1_FIELDS[4],
            TleField::Bstar => &LINE1_FIELDS[5],
            TleField::Inclination => &LINE2_FIELDS[0],
            TleField::RightAscension => &LINE2_FIELDS[1],
            TleField::Eccentricity => &LINE2_FIELDS[2],
            TleField::ArgumentOfPerigee => &LINE2_FIELDS[3],
            TleField::MeanAnomaly => &LINE2_FIELDS[4],
            TleField::MeanMotion => &LINE2_FIELDS[5],
        }
    }
}

impl fmt::Display for TleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the raw columns of a field are turned into parseable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeRule {
    Integer,
    Float,
    SpacesStripped,
    ImpliedExponent,
    ImpliedLeadingZero,
}

/// Column layout of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: TleField,
    pub line: u8,
    pub columns: Range<usize>,
    pub rule: DecodeRule,
}

/// Field layout of line 1.
pub static LINE1_FIELDS: [FieldSpec; 6] = [
    FieldSpec {
        field: TleField::CatalogNumber,
        line: 1,
        columns: 2..7,
        rule: DecodeRule::Integer,
    },
    FieldSpec {
        field: TleField::EpochYear,
        line: 1,
        columns: 18..20,
        rule: DecodeRule::Integer,
    },
    FieldSpec {
        field: TleField::EpochDays,
        line: 1,
        columns: 20..32,
        rule: DecodeRule::Float,
    },
    FieldSpec {
        field: TleField::MeanMotionDot,
        line: 1,
        columns: 33..43,
        rule: DecodeRule::SpacesStripped,
    },
    FieldSpec {
        field: TleField::MeanMotionDdot,
        line: 1,
        columns: 44..52,
        rule: DecodeRule::ImpliedExponent,
    },
    FieldSpec {
        field: TleField::Bstar,
        line: 1,
        columns: 53..61,
        rule: DecodeRule::ImpliedExponent,
    },
];

/// Field layout of line 2.
pub static LINE2_FIELDS: [FieldSpec; 6] = [
    FieldSpec {
        field: TleField::Inclination,
        line: 2,
        columns: 8..16,
        rule: DecodeRule::Float,
    },
    FieldSpec {
        field: TleField::RightAscension,
        line: 2,
        columns: 17..25,
        rule: DecodeRule::Float,
    },
    FieldSpec {
        field: TleField::Eccentricity,
        line: 2,
        columns: 26..33,
        rule: DecodeRule::ImpliedLeadingZero,
    },
    FieldSpec {
        field: TleField::ArgumentOfPerigee,
        line: 2,
        columns: 34..42,
        rule: DecodeRule::Float,
    },
    FieldSpec {
        field: TleField::MeanAnomaly,
        line: 2,
        columns: 43..51,
        rule: DecodeRule::Float,
    },
    FieldSpec {
        field: TleField::MeanMotion,
        line: 2,
        columns: 52..63,
        rule: DecodeRule::Float,
    },
];

/// Sub-columns of an implied-exponent field, relative to the field start.
const IMPLIED_SIGN: Range<usize> = 0..1;
const IMPLIED_MANTISSA: Range<usize> = 1..6;
const IMPLIED_EXPONENT: Range<usize> = 6..8;

/// Maximum number of blanks removed by the space-stripping rules (the two optional signs).
const MAX_STRIPPED_SPACES: usize = 2;

/// Extract the raw columns of a field.
///
/// Arguments
/// -----------------
/// * `line` – The TLE line holding the field (already length-checked).
/// * `spec` – The field layout.
///
/// Return
/// ----------
/// * The raw sub-slice, or a [`TleError::FieldParse`] if the range is out of bounds or
///   splits a multi-byte character.
pub fn column<'a>(line: &'a str, spec: &FieldSpec) -> Result<&'a str, TleError> {
    line.get(spec.columns.clone()).ok_or_else(|| {
        let bytes = line.as_bytes().get(spec.columns.clone()).unwrap_or_default();
        TleError::field(spec.field, &String::from_utf8_lossy(bytes))
    })
}

/// Rebuild an implied-decimal, implied-exponent number.
///
/// The three parts are joined as `sign + "." + mantissa + "e" + exponent` and at most two
/// spaces are removed, so a blank sign (positive value) or a blank exponent sign is tolerated.
///
/// ```
/// use tlekit::tle::fields::implied_exponent;
///
/// assert_eq!(implied_exponent("-", "11606", "-4"), "-.11606e-4");
/// assert_eq!(implied_exponent(" ", "12345", "-5"), ".12345e-5");
/// ```
pub fn implied_exponent(sign: &str, mantissa: &str, exponent: &str) -> String {
    format!("{sign}.{mantissa}e{exponent}").replacen(' ', "", MAX_STRIPPED_SPACES)
}

impl DecodeRule {
    /// Turn the raw columns of `field` into the text handed to the numeric parser.
    fn prepare<'a>(&self, field: TleField, raw: &'a str) -> Result<Cow<'a, str>, TleError> {
        Ok(match self {
            DecodeRule::Integer | DecodeRule::Float => Cow::Borrowed(raw.trim()),
            DecodeRule::SpacesStripped => Cow::Owned(raw.replacen(' ', "", MAX_STRIPPED_SPACES)),
            DecodeRule::ImpliedExponent => {
                let part = |range: Range<usize>| {
                    raw.get(range).ok_or_else(|| TleError::field(field, raw))
                };
                Cow::Owned(implied_exponent(
                    part(IMPLIED_SIGN)?,
                    part(IMPLIED_MANTISSA)?,
                    part(IMPLIED_EXPONENT)?,
                ))
            }
            DecodeRule::ImpliedLeadingZero => Cow::Owned(format!("0.{raw}")),
        })
    }
}

/// A number a TLE field can decode to.
///
/// `f64::from_str` accepts `"inf"`, `"NaN"` and exponents that overflow to infinity
/// (`"0.1e99999"`); none of them is a valid element value, so floats must be finite.
pub trait FieldValue: FromStr {
    fn is_valid(&self) -> bool {
        true
    }
}

impl FieldValue for u32 {}

impl FieldValue for i64 {}

impl FieldValue for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

/// Decode one field of a TLE line.
///
/// Arguments
/// -----------------
/// * `line` – The TLE line holding the field.
/// * `spec` – The field layout, taken from [`LINE1_FIELDS`] or [`LINE2_FIELDS`].
///
/// Return
/// ----------
/// * The parsed value, or [`TleError::FieldParse`] with the field name and the raw columns
///   when the prepared text is not a valid number (blank, stray sign, extra characters,
///   infinite or NaN…).
pub fn decode<T: FieldValue>(line: &str, spec: &FieldSpec) -> Result<T, TleError> {
    let raw = column(line, spec)?;
    let text = spec.rule.prepare(spec.field, raw)?;
    trace!(field = %spec.field, raw, text = %text, "decoding TLE field");
    text.parse::<T>()
        .ok()
        .filter(|value| value.is_valid())
        .ok_or_else(|| TleError::field(spec.field, raw))
}

/// Decode a field by name.
pub fn decode_field<T: FieldValue>(line: &str, field: TleField) -> Result<T, TleError> {
    decode(line, field.spec())
}

#[cfg(test)]
mod fields_test {
    use super::*;
    use approx::assert_relative_eq;

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn test_column_slices() {
        assert_eq!(column(ISS_LINE1, TleField::CatalogNumber.spec()), Ok("25544"));
        assert_eq!(column(ISS_LINE1, TleField::EpochDays.spec()), Ok("264.51782528"));
        assert_eq!(column(ISS_LINE1, TleField::Bstar.spec()), Ok("-11606-4"));
        assert_eq!(column(ISS_LINE2, TleField::Inclination.spec()), Ok(" 51.6416"));
        assert_eq!(column(ISS_LINE2, TleField::MeanMotion.spec()), Ok("15.72125391"));
    }

    #[test]
    fn test_column_out_of_range() {
        assert_eq!(
            column("1 255", TleField::CatalogNumber.spec()),
            Err(TleError::FieldParse {
                field: TleField::CatalogNumber,
                raw: "".into()
            })
        );
    }

    #[test]
    fn test_column_multibyte_boundary() {
        // 'é' occupies bytes 6..8, the catalog number range 2..7 ends inside it
        let line = "1 2554é";
        assert!(matches!(
            column(line, TleField::CatalogNumber.spec()),
            Err(TleError::FieldParse {
                field: TleField::CatalogNumber,
                ..
            })
        ));
    }

    #[test]
    fn test_implied_exponent() {
        assert_eq!(implied_exponent("-", "12345", "-2"), "-.12345e-2");
        assert_eq!(implied_exponent(" ", "12345", "-2"), ".12345e-2");
        assert_eq!(implied_exponent("+", "12345", " 2"), "+.12345e2");
        assert_eq!(implied_exponent(" ", "00000", "+0"), ".00000e+0");

        let value: f64 = implied_exponent("-", "12345", "-2").parse().unwrap();
        assert_relative_eq!(value, -0.12345e-2);
        let value: f64 = implied_exponent(" ", "12345", "-2").parse().unwrap();
        assert_relative_eq!(value, 0.12345e-2);
    }

    #[test]
    fn test_decode_iss_fields() {
        assert_eq!(decode_field::<u32>(ISS_LINE1, TleField::CatalogNumber), Ok(25544));
        assert_eq!(decode_field::<i64>(ISS_LINE1, TleField::EpochYear), Ok(8));
        assert_eq!(
            decode_field::<f64>(ISS_LINE1, TleField::EpochDays),
            Ok(264.51782528)
        );
        assert_eq!(
            decode_field::<f64>(ISS_LINE1, TleField::MeanMotionDot),
            Ok(-0.00002182)
        );
        assert_eq!(decode_field::<f64>(ISS_LINE1, TleField::MeanMotionDdot), Ok(0.0));
        assert_eq!(decode_field::<f64>(ISS_LINE1, TleField::Bstar), Ok(-0.11606e-4));

        assert_eq!(decode_field::<f64>(ISS_LINE2, TleField::Inclination), Ok(51.6416));
        assert_eq!(
            decode_field::<f64>(ISS_LINE2, TleField::RightAscension),
            Ok(247.4627)
        );
        assert_eq!(
            decode_field::<f64>(ISS_LINE2, TleField::Eccentricity),
            Ok(0.0006703)
        );
        assert_eq!(
            decode_field::<f64>(ISS_LINE2, TleField::ArgumentOfPerigee),
            Ok(130.5360)
        );
        assert_eq!(decode_field::<f64>(ISS_LINE2, TleField::MeanAnomaly), Ok(325.0288));
        assert_eq!(
            decode_field::<f64>(ISS_LINE2, TleField::MeanMotion),
            Ok(15.72125391)
        );
    }

    #[test]
    fn test_eccentricity_leading_zero() {
        let line = "2 25544  51.6416 247.4627 1234567 130.5360 325.0288 15.72125391563537";
        assert_eq!(decode_field::<f64>(line, TleField::Eccentricity), Ok(0.1234567));
    }

    #[test]
    fn test_eccentricity_with_blank_is_rejected() {
        let line = "2 25544  51.6416 247.4627  006703 130.5360 325.0288 15.72125391563537";
        assert_eq!(
            decode_field::<f64>(line, TleField::Eccentricity),
            Err(TleError::FieldParse {
                field: TleField::Eccentricity,
                raw: " 006703".into()
            })
        );
    }

    #[test]
    fn test_blank_field_is_an_error() {
        let line = "1 25544U 98067A   08264.51782528           00000-0 -11606-4 0  2927";
        assert_eq!(
            decode_field::<f64>(line, TleField::MeanMotionDot),
            Err(TleError::FieldParse {
                field: TleField::MeanMotionDot,
                raw: "          ".into()
            })
        );

        let line = "1 25544U 98067A   08264.51782528 -.00002182          -11606-4 0  2927";
        assert_eq!(
            decode_field::<f64>(line, TleField::MeanMotionDdot),
            Err(TleError::FieldParse {
                field: TleField::MeanMotionDdot,
                raw: "        ".into()
            })
        );
    }

    #[test]
    fn test_stray_sign_is_an_error() {
        let line = "1 25544U 98067A   08264.51782528 -          00000-0 -11606-4 0  2927";
        assert!(matches!(
            decode_field::<f64>(line, TleField::MeanMotionDot),
            Err(TleError::FieldParse {
                field: TleField::MeanMotionDot,
                ..
            })
        ));

        let line = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -     -4 0  2927";
        assert!(matches!(
            decode_field::<f64>(line, TleField::Bstar),
            Err(TleError::FieldParse {
                field: TleField::Bstar,
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_float_is_an_error() {
        let line = "2 25544  51.6416 247.4627 1e99999 130.5360 325.0288 15.72125391563537";
        assert_eq!(
            decode_field::<f64>(line, TleField::Eccentricity),
            Err(TleError::FieldParse {
                field: TleField::Eccentricity,
                raw: "1e99999".into()
            })
        );

        let line = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 1e400      563537";
        assert_eq!(
            decode_field::<f64>(line, TleField::MeanMotion),
            Err(TleError::FieldParse {
                field: TleField::MeanMotion,
                raw: "1e400      ".into()
            })
        );

        let line = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 NaN        563537";
        assert!(matches!(
            decode_field::<f64>(line, TleField::MeanMotion),
            Err(TleError::FieldParse {
                field: TleField::MeanMotion,
                ..
            })
        ));

        let line = "2 25544  51.6416      inf 0006703 130.5360 325.0288 15.72125391563537";
        assert!(matches!(
            decode_field::<f64>(line, TleField::RightAscension),
            Err(TleError::FieldParse {
                field: TleField::RightAscension,
                ..
            })
        ));
    }

    #[test]
    fn test_spec_lookup_matches_field() {
        for spec in LINE1_FIELDS.iter().chain(LINE2_FIELDS.iter()) {
            assert_eq!(spec.field.spec(), spec);
        }
    }

    #[test]
    fn test_tables_are_disjoint_and_ordered() {
        for table in [&LINE1_FIELDS, &LINE2_FIELDS] {
            for pair in table.windows(2) {
                assert!(pair[0].columns.end <= pair[1].columns.start);
            }
        }
        assert!(LINE1_FIELDS.iter().all(|spec| spec.line == 1));
        assert!(LINE2_FIELDS.iter().all(|spec| spec.line == 2));
    }
}
