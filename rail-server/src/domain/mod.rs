//! Domain types for the rail route planner.
//!
//! This module contains the validated building blocks of the network:
//! station codes, coordinates and city keys. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity.

mod city;
mod location;
mod station;

pub use city::CityKey;
pub use location::{Coordinates, InvalidCoordinates};
pub use station::{InvalidStationCode, Station, StationCode};
