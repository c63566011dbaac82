//! Dataset load error types.

use std::fmt;
use std::path::PathBuf;

use crate::domain::{InvalidCoordinates, InvalidStationCode, StationCode};

/// Which input table a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Stations,
    Edges,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Stations => f.write_str("station"),
            Table::Edges => f.write_str("edge"),
        }
    }
}

/// The input tables cannot be turned into a graph.
///
/// Fatal at load time. Rows are numbered from 1 in input order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedInput {
    /// A required field is absent or blank
    #[error("{table} row {row}: missing required field `{field}`")]
    MissingField {
        table: Table,
        row: usize,
        field: &'static str,
    },

    /// A station code failed validation
    #[error("{table} row {row}: {source}")]
    InvalidCode {
        table: Table,
        row: usize,
        #[source]
        source: InvalidStationCode,
    },

    /// Latitude/longitude out of range
    #[error("station {code}: {source}")]
    InvalidCoordinates {
        code: StationCode,
        #[source]
        source: InvalidCoordinates,
    },

    /// Same code, different data
    #[error("station {0} is defined more than once with different data")]
    ConflictingStation(StationCode),

    /// An edge endpoint is not in the station table
    #[error("edge {from} -> {to} references unknown station {missing}")]
    DanglingEdge {
        from: StationCode,
        to: StationCode,
        missing: StationCode,
    },

    /// Negative or non-finite weight
    #[error("edge {from} -> {to} has invalid weight {weight} km (must be finite and non-negative)")]
    InvalidWeight {
        from: StationCode,
        to: StationCode,
        weight: f64,
    },

    /// A row could not be decoded at all
    #[error("{table} table: {message}")]
    Unparseable { table: Table, message: String },
}

/// Errors from reading the dataset files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The contents are malformed
    #[error("malformed input: {0}")]
    Malformed(#[from] MalformedInput),
}
