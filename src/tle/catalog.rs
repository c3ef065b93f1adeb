//! # TLE catalogs
//!
//! Element sets are usually distributed as text blocks holding many entries, each one
//! made of an optional name line followed by the two element lines:
//!
//! ```text
//! ISS (ZARYA)
//! 1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
//! 2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537
//! 0 VANGUARD 1
//! 1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753
//! 2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667
//! ```
//!
//! A `"0 "` prefix on the name line (three-line element format) is dropped. Blank lines
//! between entries are ignored. Element lines are kept verbatim so that the column positions
//! are untouched. A name line may not start with `"1 "` or `"2 "`.
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{line_ending, multispace0, not_line_ending},
    combinator::{eof, map, not, opt, recognize},
    error::Error,
    multi::many0,
    sequence::{preceded, terminated},
    IResult, Parser,
};
use tracing::debug;

use crate::{orbital_record::OrbitalRecord, tle_errors::TleError};

/// One entry of a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TleSet {
    pub name: Option<String>,
    pub line1: String,
    pub line2: String,
}

impl TleSet {
    /// Decode this entry with [`OrbitalRecord::from_tle`].
    pub fn decode(&self, gravity_model: &str) -> Result<OrbitalRecord, TleError> {
        OrbitalRecord::from_tle(&self.line1, &self.line2, gravity_model)
    }
}

fn end_of_line(input: &str) -> IResult<&str, &str> {
    alt((line_ending, eof)).parse(input)
}

/// An element line, kept verbatim without its line ending.
fn element_line<'a>(
    number: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = Error<&'a str>> {
    terminated(recognize(preceded(tag(number), not_line_ending)), end_of_line)
}

/// A name line never starts like an element line.
fn name_line(input: &str) -> IResult<&str, &str> {
    terminated(
        map(
            preceded(
                not(alt((tag("1 "), tag("2 ")))),
                preceded(opt(tag("0 ")), not_line_ending),
            ),
            str::trim,
        ),
        line_ending,
    )
    .parse(input)
}

fn tle_set(input: &str) -> IResult<&str, TleSet> {
    map(
        (opt(name_line), element_line("1 "), element_line("2 ")),
        |(name, line1, line2)| TleSet {
            name: name.map(str::to_string),
            line1: line1.to_string(),
            line2: line2.to_string(),
        },
    )
    .parse(input)
}

/// Split a text block into its TLE entries.
///
/// Arguments
/// -----------------
/// * `text` – The catalog content. Both `\n` and `\r\n` line endings are accepted.
///
/// Return
/// ----------
/// * Every entry, in the order of the text, or [`TleError::CatalogParsing`] naming the first
///   line that does not fit the `[name] / 1 / 2` pattern (a stray line 2, a dangling name or
///   a line 1 at the end of the text included).
///
/// Only the line prefixes are checked; the lines themselves are validated when decoded.
pub fn split_catalog(text: &str) -> Result<Vec<TleSet>, TleError> {
    let (remaining, sets) = terminated(many0(preceded(multispace0, tle_set)), multispace0)
        .parse(text)
        .map_err(|err| TleError::CatalogParsing(err.to_string()))?;

    if let Some(line) = remaining.lines().next() {
        return Err(TleError::CatalogParsing(format!(
            "unexpected line at entry {}: {line}",
            sets.len() + 1
        )));
    }

    debug!(entries = sets.len(), "split TLE catalog");
    Ok(sets)
}

/// Split then decode a whole catalog.
///
/// Arguments
/// -----------------
/// * `text` – The catalog content.
/// * `gravity_model` – Gravity model name used for every entry.
///
/// Return
/// ----------
/// * The records in external units, or the first error met (splitting or decoding).
pub fn parse_catalog(text: &str, gravity_model: &str) -> Result<Vec<OrbitalRecord>, TleError> {
    split_catalog(text)?
        .iter()
        .map(|set| set.decode(gravity_model))
        .collect()
}
