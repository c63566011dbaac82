//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, warn};

use crate::network::NetworkStats;
use crate::planner::{CostMode, RouteError, RoutePlanner};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/stats", get(stats))
        .route("/api/cities", get(list_cities))
        .route("/api/cities/:city/stations", get(list_city_stations))
        .route("/api/route", get(find_route).post(find_route_json))
        .route("/api/route/stations", get(find_station_route))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Network summary counts.
async fn stats(State(state): State<AppState>) -> Json<NetworkStats> {
    Json(state.network.statistics())
}

/// All city names, sorted.
async fn list_cities(State(state): State<AppState>) -> Json<CitiesResponse> {
    let cities = state
        .planner()
        .list_cities()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(CitiesResponse { cities })
}

/// Stations of one city.
async fn list_city_stations(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<CityStationsResponse>, AppError> {
    let planner = state.planner();
    let stations = planner
        .list_stations_for_city(&city)?
        .into_iter()
        .map(StationResult::from_station)
        .collect();

    // Report the canonical spelling rather than the request's
    let city = state
        .network
        .cities()
        .get(&city)
        .map_or(city, |c| c.name.clone());

    Ok(Json(CityStationsResponse { city, stations }))
}

/// Best route between two cities, from query parameters.
async fn find_route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<ItineraryResult>, AppError> {
    route_between_cities(&state, req).await
}

/// Best route between two cities, from a JSON body.
async fn find_route_json(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ItineraryResult>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: RouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid route request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;
    route_between_cities(&state, req).await
}

async fn route_between_cities(
    state: &AppState,
    req: RouteRequest,
) -> Result<Json<ItineraryResult>, AppError> {
    let mode = parse_mode(req.mode.as_deref())?;
    let RouteRequest {
        origin,
        destination,
        ..
    } = req;

    let result = run_query(state, move |planner| {
        planner
            .find_best_route(&origin, &destination, mode)
            .map(|itinerary| ItineraryResult::from_itinerary(&itinerary))
    })
    .await?;

    Ok(Json(result))
}

/// Best route between two stations.
async fn find_station_route(
    State(state): State<AppState>,
    Query(req): Query<StationRouteRequest>,
) -> Result<Json<ItineraryResult>, AppError> {
    let mode = parse_mode(req.mode.as_deref())?;
    let StationRouteRequest { from, to, .. } = req;

    let result = run_query(&state, move |planner| {
        planner
            .find_station_route(&from, &to, mode)
            .map(|itinerary| ItineraryResult::from_itinerary(&itinerary))
    })
    .await?;

    Ok(Json(result))
}

/// Parse an optional mode parameter; absent or blank means distance.
fn parse_mode(raw: Option<&str>) -> Result<CostMode, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(CostMode::Distance),
        Some(s) => s.parse().map_err(|e: crate::planner::InvalidCostMode| {
            AppError::BadRequest {
                message: e.to_string(),
            }
        }),
    }
}

/// Run a planner query on the blocking pool, bounded by the configured
/// timeout.
///
/// Searches are CPU-bound, so they must not run on the async workers.
async fn run_query<T, F>(state: &AppState, query: F) -> Result<T, AppError>
where
    F: FnOnce(RoutePlanner<'_>) -> Result<T, RouteError> + Send + 'static,
    T: Send + 'static,
{
    let task_state = state.clone();
    let task = tokio::task::spawn_blocking(move || query(task_state.planner()));

    match tokio::time::timeout(state.query_timeout, task).await {
        Ok(Ok(result)) => result.map_err(AppError::from),
        Ok(Err(e)) => Err(AppError::Internal {
            message: format!("Query task failed: {e}"),
        }),
        Err(_) => Err(AppError::Timeout {
            message: format!("Query exceeded {} ms", state.query_timeout.as_millis()),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    Internal { message: String },
    Timeout { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let message = e.to_string();
        match e {
            RouteError::UnknownCity(_) | RouteError::UnknownStation(_) => {
                AppError::NotFound { message }
            }
            RouteError::NoRoute { .. } => AppError::Unprocessable { message },
            RouteError::Itinerary(_) => AppError::Internal { message },
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Unprocessable { message }
            | AppError::Internal { message }
            | AppError::Timeout { message } => message,
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
