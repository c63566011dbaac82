//! City-to-city rail route planner.
//!
//! Loads a rail network from station and edge tables, then answers: "what
//! is the best way from city A to city B?", either by shortest distance or
//! by fewest legs, over a JSON HTTP API.

pub mod config;
pub mod domain;
pub mod geo;
pub mod network;
pub mod planner;
pub mod web;
