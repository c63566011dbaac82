use rail_server::config::ServerConfig;
use rail_server::network::Network;
use rail_server::planner::EstimateConfig;
use rail_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    // Fail fast: the server is useless without a network
    let network = match Network::load(&config.stations_path, &config.edges_path) {
        Ok(network) => network,
        Err(e) => {
            error!(error = %e, "Failed to load rail network");
            std::process::exit(1);
        }
    };

    let state = AppState::new(network, EstimateConfig::default(), config.query_timeout);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.bind_addr, "Rail route planner listening");
    info!("  GET  /health                      - Health check");
    info!("  GET  /api/stats                   - Network statistics");
    info!("  GET  /api/cities                  - List cities");
    info!("  GET  /api/cities/:city/stations   - List a city's stations");
    info!("  GET  /api/route                   - Best route between cities");
    info!("  POST /api/route                   - Same, from a JSON body");
    info!("  GET  /api/route/stations          - Best route between stations");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
