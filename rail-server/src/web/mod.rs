//! Web layer for the rail route planner.
//!
//! Provides JSON endpoints for listing cities and stations and for finding
//! the best route between cities or stations.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
