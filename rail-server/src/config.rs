//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the station table.
pub const STATIONS_CSV_VAR: &str = "RAIL_STATIONS_CSV";
/// Environment variable naming the edge table.
pub const EDGES_CSV_VAR: &str = "RAIL_EDGES_CSV";
/// Environment variable holding the listen address.
pub const BIND_ADDR_VAR: &str = "RAIL_BIND_ADDR";
/// Environment variable holding the per-query timeout in milliseconds.
pub const QUERY_TIMEOUT_VAR: &str = "RAIL_QUERY_TIMEOUT_MS";

/// A configuration value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Path to the station CSV (`code,name,city,lat,long`)
    pub stations_path: PathBuf,

    /// Path to the edge CSV (`source,target,distance`)
    pub edges_path: PathBuf,

    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// Upper bound on a single route query
    pub query_timeout: Duration,
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to defaults for
    /// unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(STATIONS_CSV_VAR) {
            config.stations_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(EDGES_CSV_VAR) {
            config.edges_path = PathBuf::from(path);
        }
        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = value.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError {
                    var: BIND_ADDR_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(value) = lookup(QUERY_TIMEOUT_VAR) {
            let millis: u64 = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError {
                    var: QUERY_TIMEOUT_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            config.query_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn with_data(mut self, stations: impl Into<PathBuf>, edges: impl Into<PathBuf>) -> Self {
        self.stations_path = stations.into();
        self.edges_path = edges.into();
        self
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            stations_path: PathBuf::from("data/stations_with_city.csv"),
            edges_path: PathBuf::from("data/edges.csv"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            query_timeout: Duration::from_secs(5),
        }
    }
}
