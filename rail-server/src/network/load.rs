//! CSV readers for the station and edge tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::error::{LoadError, MalformedInput, Table};
use super::records::{EdgeRecord, StationRecord};

/// Read station rows (`code,name,city,lat,long`) from a CSV file.
pub fn read_stations(path: &Path) -> Result<Vec<StationRecord>, LoadError> {
    read_table(path, Table::Stations)
}

/// Read edge rows (`source,target,distance`) from a CSV file.
pub fn read_edges(path: &Path) -> Result<Vec<EdgeRecord>, LoadError> {
    read_table(path, Table::Edges)
}

fn read_table<T: DeserializeOwned>(path: &Path, table: Table) -> Result<Vec<T>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_table(file, table).map_err(|e| match e {
        ParseFailure::Io(source) => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Malformed(m) => LoadError::Malformed(m),
    })
}

enum ParseFailure {
    Io(std::io::Error),
    Malformed(MalformedInput),
}

/// Decode every row of a headed CSV table.
fn parse_table<T: DeserializeOwned, R: Read>(
    reader: R,
    table: Table,
) -> Result<Vec<T>, ParseFailure> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result.map_err(|e| {
            let message = e.to_string();
            match e.into_kind() {
                csv::ErrorKind::Io(source) => ParseFailure::Io(source),
                _ => ParseFailure::Malformed(MalformedInput::Unparseable { table, message }),
            }
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Parse station rows from any reader (e.g. an in-memory string).
pub fn parse_stations<R: Read>(reader: R) -> Result<Vec<StationRecord>, LoadError> {
    parse_in_memory(reader, Table::Stations)
}

/// Parse edge rows from any reader.
pub fn parse_edges<R: Read>(reader: R) -> Result<Vec<EdgeRecord>, LoadError> {
    parse_in_memory(reader, Table::Edges)
}

fn parse_in_memory<T: DeserializeOwned, R: Read>(
    reader: R,
    table: Table,
) -> Result<Vec<T>, LoadError> {
    parse_table(reader, table).map_err(|e| match e {
        ParseFailure::Io(source) => LoadError::Io {
            path: "<reader>".into(),
            source,
        },
        ParseFailure::Malformed(m) => LoadError::Malformed(m),
    })
}
