//! Raw input rows for the station and edge tables.
//!
//! Field names follow the dataset's CSV headers (`code,name,city,lat,long`
//! and `source,target,distance`). Everything optional here is checked when
//! the graph is built, not when the row is read.

use serde::{Deserialize, Serialize};

/// One row of the station table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub code: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub lat: Option<f64>,

    #[serde(default, rename = "long", alias = "lon")]
    pub lon: Option<f64>,
}

impl StationRecord {
    /// A fully populated station row.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            city: Some(city.into()),
            lat: Some(lat),
            lon: Some(lon),
        }
    }
}

/// One row of the edge table: a directed connection.
///
/// A missing `distance` means "derive it from the endpoint coordinates".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,

    #[serde(default)]
    pub distance: Option<f64>,
}

impl EdgeRecord {
    /// A directed edge with an explicit weight in kilometres.
    pub fn new(source: impl Into<String>, target: impl Into<String>, distance_km: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            distance: Some(distance_km),
        }
    }

    /// A directed edge whose weight is the great-circle distance between
    /// its endpoints.
    pub fn unweighted(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            distance: None,
        }
    }
}
