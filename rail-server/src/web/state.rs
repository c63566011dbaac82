//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::network::Network;
use crate::planner::{EstimateConfig, RoutePlanner};

/// Shared application state.
///
/// The network is loaded once at startup and only read afterwards, so
/// handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded rail network
    pub network: Arc<Network>,

    /// Fare and travel-time parameters
    pub estimates: Arc<EstimateConfig>,

    /// Upper bound on a single route query
    pub query_timeout: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, estimates: EstimateConfig, query_timeout: Duration) -> Self {
        Self {
            network: Arc::new(network),
            estimates: Arc::new(estimates),
            query_timeout,
        }
    }

    /// A planner borrowing this state.
    pub fn planner(&self) -> RoutePlanner<'_> {
        RoutePlanner::new(&self.network, &self.estimates)
    }
}
