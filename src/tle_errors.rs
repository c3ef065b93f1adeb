use thiserror::Error;

use crate::tle::fields::TleField;

#[derive(Error, Debug)]
pub enum TleError {
    #[error("Line {line} too short: {length} characters, at least {required} required")]
    Format {
        line: u8,
        length: usize,
        required: usize,
    },

    #[error("Unable to parse field {field}: {raw:?}")]
    FieldParse { field: TleField, raw: String },

    #[error("Invalid gravity model: {0}")]
    UnknownGravityModel(String),

    #[error("Invalid operation mode: {0}")]
    UnknownOpsMode(String),

    #[error("Day of year {day_of_year} is out of range for year {year}")]
    DayOfYearOutOfRange { year: i32, day_of_year: f64 },

    #[error("Calendar conversion error: {0}")]
    Calendar(#[from] hifitime::HifitimeError),

    #[error("Error during the nom parsing of a TLE catalog: {0}")]
    CatalogParsing(String),

    #[error("Kepler equation solver error: {0}")]
    KeplerSolver(#[from] roots::SearchError),
}

impl TleError {
    pub(crate) fn field(field: TleField, raw: &str) -> Self {
        TleError::FieldParse {
            field,
            raw: raw.to_string(),
        }
    }
}

impl PartialEq for TleError {
    fn eq(&self, other: &Self) -> bool {
        use TleError::*;
        match (self, other) {
            (
                Format {
                    line: l1,
                    length: n1,
                    required: r1,
                },
                Format {
                    line: l2,
                    length: n2,
                    required: r2,
                },
            ) => l1 == l2 && n1 == n2 && r1 == r2,
            (FieldParse { field: f1, raw: r1 }, FieldParse { field: f2, raw: r2 }) => {
                f1 == f2 && r1 == r2
            }
            (UnknownGravityModel(a), UnknownGravityModel(b)) => a == b,
            (UnknownOpsMode(a), UnknownOpsMode(b)) => a == b,
            (
                DayOfYearOutOfRange {
                    year: y1,
                    day_of_year: d1,
                },
                DayOfYearOutOfRange {
                    year: y2,
                    day_of_year: d2,
                },
            ) => y1 == y2 && d1 == d2,
            (CatalogParsing(a), CatalogParsing(b)) => a == b,
            (KeplerSolver(a), KeplerSolver(b)) => a == b,

            // foreign error without a meaningful equality: same variant is enough
            (Calendar(_), Calendar(_)) => true,

            _ => false,
        }
    }
}
