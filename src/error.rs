use thiserror::Error;

use crate::types::SeriesKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Site configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid instant: {0:?} is not a recognised timestamp")]
    InvalidInstant(String),

    #[error("Date range spans multiple years: {start_year} to {end_year}")]
    DateRangeSpansMultipleYears { start_year: i32, end_year: i32 },

    #[error("Invalid observation window: start {start} is after end {end}")]
    InvalidWindow { start: String, end: String },

    #[error("Degenerate tracker geometry at azimuth {azimuth:.3}, elevation {elevation:.3}")]
    DegenerateGeometry { azimuth: f64, elevation: f64 },

    #[error("Division near zero deriving DNI at zenith {zenith:.3}")]
    DivisionNearZero { zenith: f64 },

    #[error("Invalid location: {field} = {value} ({reason})")]
    InvalidLocation {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Reference curve line {line}: {value:?} is not a number")]
    InvalidReferenceValue { line: usize, value: String },

    #[error("Reference curve has {0} entries, expected 365, 366, 8760 or 8784")]
    ReferenceCurveSize(usize),

    #[error("{kind:?} sample has {got} channels, expected {expected}")]
    ChannelCount {
        kind: SeriesKind,
        expected: usize,
        got: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
