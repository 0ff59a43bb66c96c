//! API route handlers.
//!
//! Every data route follows the same contract: run one query against the
//! store, then map store error -> opaque 500, empty result -> 404 with a
//! route-specific message, rows -> 200 JSON array. Lookups that address a
//! single entity still return an array; nothing unwraps single-row results.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

use crate::storage::{Query, RaceStore};
use crate::types::{ErrorResponse, HealthResponse};

/// Application state shared across handlers.
pub struct AppState {
    pub store: Arc<dyn RaceStore>,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Run a query and apply the uniform response contract.
async fn fetch_rows(
    state: &AppState,
    query: Query,
    not_found: &str,
) -> Result<Json<Vec<Value>>, ApiError> {
    let rows = state.store.fetch(&query).await.map_err(|e| {
        tracing::error!(table = query.table, error = %e, "database query failed");
        ApiError::internal()
    })?;

    if rows.is_empty() {
        return Err(ApiError::not_found(not_found));
    }

    Ok(Json(rows))
}

/// True when both bounds parse as integers and the range is inverted.
/// Non-numeric bounds skip the check and are passed to the store as-is.
fn range_inverted(start: &str, end: &str) -> bool {
    match (start.parse::<i64>(), end.parse::<i64>()) {
        (Ok(start), Ok(end)) => start > end,
        _ => false,
    }
}

const RANGE_ERROR: &str = "Cannot have a starting year greater than ending year.";

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Returns all seasons covered by the dataset.
pub async fn seasons(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Value>>, ApiError> {
    fetch_rows(&state, Query::from("seasons"), "No seasons found.").await
}

/// Returns all circuits.
pub async fn circuits(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Value>>, ApiError> {
    fetch_rows(&state, Query::from("circuits"), "No circuits found.").await
}

/// Returns the circuits raced in a given season, in round order.
pub async fn circuits_for_season(
    State(state): State<Arc<AppState>>,
    Path(year): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("races")
        .select("circuits!inner(name,location,country)")
        .eq("year", year)
        .order_asc("round");
    fetch_rows(&state, query, "No seasons found for that year.").await
}

/// Returns the circuit with the given reference string.
pub async fn circuit_by_ref(
    State(state): State<Arc<AppState>>,
    Path(circuit_ref): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("circuits").eq("circuitRef", circuit_ref);
    fetch_rows(&state, query, "No circuits found.").await
}

/// Returns all constructors.
pub async fn constructors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Value>>, ApiError> {
    fetch_rows(&state, Query::from("constructors"), "No constructors found.").await
}

/// Returns the constructor with the given reference string.
pub async fn constructor_by_ref(
    State(state): State<Arc<AppState>>,
    Path(constructor_ref): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("constructors").eq("constructorRef", constructor_ref);
    fetch_rows(&state, query, "No constructors found.").await
}

/// Returns all drivers.
pub async fn drivers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Value>>, ApiError> {
    fetch_rows(&state, Query::from("drivers"), "No drivers found.").await
}

/// Returns the driver with the given reference string.
pub async fn driver_by_ref(
    State(state): State<Arc<AppState>>,
    Path(driver_ref): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("drivers").eq("driverRef", driver_ref);
    fetch_rows(&state, query, "No driver found.").await
}

/// Returns drivers whose surname starts with the given prefix,
/// case-insensitively, ordered by surname.
pub async fn search_drivers(
    State(state): State<Arc<AppState>>,
    Path(prefix): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("drivers")
        .ilike_prefix("surname", prefix.to_lowercase())
        .order_asc("surname");
    fetch_rows(
        &state,
        query,
        "No drivers found with the specified surname prefix",
    )
    .await
}

/// Returns the drivers who qualified for a given race.
pub async fn drivers_for_race(
    State(state): State<Arc<AppState>>,
    Path(race_id): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("qualifying")
        .select("raceId,drivers!inner(forename,surname)")
        .eq("raceId", race_id);
    fetch_rows(
        &state,
        query,
        "No race with the provided race ID to return driver data.",
    )
    .await
}

/// Returns a single race, with its circuit's name, location and country
/// in place of the circuit foreign key.
pub async fn race_by_id(
    State(state): State<Arc<AppState>>,
    Path(race_id): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("races")
        .select("name,circuits!inner(name,location,country)")
        .eq("raceId", race_id);
    fetch_rows(
        &state,
        query,
        "No race with the provided race ID to return race data.",
    )
    .await
}

/// Returns the races in a season, in round order.
pub async fn races_for_season(
    State(state): State<Arc<AppState>>,
    Path(year): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("races")
        .select("name")
        .eq("year", year)
        .order_asc("round");
    fetch_rows(
        &state,
        query,
        "No race with the provided race ID to return race data.",
    )
    .await
}

/// Returns the race at a specific round of a season.
pub async fn race_by_season_round(
    State(state): State<Arc<AppState>>,
    Path((year, round)): Path<(String, String)>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("races")
        .select("name")
        .eq("year", year)
        .eq("round", round);
    fetch_rows(&state, query, "No data found with the provided year and round.").await
}

/// Returns every race held at a circuit, oldest season first.
pub async fn races_for_circuit(
    State(state): State<Arc<AppState>>,
    Path(circuit_ref): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("races")
        .select("name,year,circuits!inner(name,location,country,circuitRef)")
        .eq("circuits.circuitRef", circuit_ref)
        .order_asc("year");
    fetch_rows(
        &state,
        query,
        "No data found with the provided circuit reference.",
    )
    .await
}

/// Returns the races held at a circuit between two seasons inclusive.
pub async fn races_for_circuit_between(
    State(state): State<Arc<AppState>>,
    Path((circuit_ref, start, end)): Path<(String, String, String)>,
) -> Result<Json<Vec<Value>>, ApiError> {
    if range_inverted(&start, &end) {
        return Err(ApiError::not_found(RANGE_ERROR));
    }

    let query = Query::from("races")
        .select("name,year,circuits!inner(name,location,country,circuitRef)")
        .eq("circuits.circuitRef", circuit_ref)
        .gte("year", start)
        .lte("year", end);
    fetch_rows(
        &state,
        query,
        "No data found with the provided years or circuit reference.",
    )
    .await
}

/// Returns the results of a race in grid order, with driver, race and
/// constructor details embedded.
pub async fn results_for_race(
    State(state): State<Arc<AppState>>,
    Path(race_id): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("results")
        .select(
            "grid,drivers(driverRef,code,forename,surname),races(name,round,year,date),\
             constructors(name,constructorRef,nationality)",
        )
        .eq("raceId", race_id)
        .order_asc("grid");
    fetch_rows(
        &state,
        query,
        "No race with the provided race ID to return data.",
    )
    .await
}

/// Returns every result for a driver across their career.
pub async fn results_for_driver(
    State(state): State<Arc<AppState>>,
    Path(driver_ref): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("results")
        .select(
            "races!inner(name),number,grid,position,positionText,positionOrder,points,laps,\
             time,fastestLap,rank,fastestLapTime,fastestLapSpeed,drivers!inner(driverRef)",
        )
        .eq("drivers.driverRef", driver_ref);
    fetch_rows(
        &state,
        query,
        "No driver with the provided driver reference ID to return data.",
    )
    .await
}

/// Returns a driver's results between two seasons inclusive.
pub async fn results_for_driver_between(
    State(state): State<Arc<AppState>>,
    Path((driver_ref, start, end)): Path<(String, String, String)>,
) -> Result<Json<Vec<Value>>, ApiError> {
    if range_inverted(&start, &end) {
        return Err(ApiError::not_found(RANGE_ERROR));
    }

    let query = Query::from("results")
        .select(
            "races!inner(year),number,grid,position,positionText,positionOrder,points,laps,\
             time,fastestLap,rank,fastestLapTime,fastestLapSpeed,drivers!inner(driverRef,driverId)",
        )
        .eq("drivers.driverRef", driver_ref)
        .gte("races.year", start)
        .lte("races.year", end);
    fetch_rows(
        &state,
        query,
        "No data found with the provided years or driver reference.",
    )
    .await
}

/// Returns the qualifying results of a race in position order.
pub async fn qualifying_for_race(
    State(state): State<Arc<AppState>>,
    Path(race_id): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("results")
        .select(
            "grid,drivers(driverRef,code,forename,surname),races(name,round,year,date),\
             constructors(name,constructorRef,nationality),qualifying!inner(raceId)",
        )
        .eq("raceId", race_id)
        .order_asc("positionOrder");
    fetch_rows(&state, query, "No data found for the provided race ID").await
}

/// Returns the driver standings as of a given race.
pub async fn driver_standings(
    State(state): State<Arc<AppState>>,
    Path(race_id): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("driverStandings")
        .select("raceId,drivers(driverRef,code,forename,surname),races!inner(raceId)")
        .eq("races.raceId", race_id)
        .order_asc("position");
    fetch_rows(&state, query, "No data found for the provided race ID").await
}

/// Returns the constructor standings as of a given race.
pub async fn constructor_standings(
    State(state): State<Arc<AppState>>,
    Path(race_id): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = Query::from("constructorStandings")
        .select("raceId,constructors(name,constructorRef,nationality),races!inner(raceId)")
        .eq("races.raceId", race_id)
        .order_asc("position");
    fetch_rows(&state, query, "No data found for the provided race ID").await
}

/// Build the router. Middleware layers are added by the caller.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/seasons", get(seasons))
        .route("/api/circuits", get(circuits))
        .route("/api/circuits/season/{year}", get(circuits_for_season))
        .route("/api/circuits/{ref}", get(circuit_by_ref))
        .route("/api/constructors", get(constructors))
        .route("/api/constructors/{ref}", get(constructor_by_ref))
        .route("/api/drivers", get(drivers))
        .route("/api/drivers/search/{prefix}", get(search_drivers))
        .route("/api/drivers/race/{race_id}", get(drivers_for_race))
        .route("/api/drivers/{ref}", get(driver_by_ref))
        .route("/api/races/season/{year}", get(races_for_season))
        .route("/api/races/season/{year}/{round}", get(race_by_season_round))
        .route("/api/races/circuits/{ref}", get(races_for_circuit))
        .route(
            "/api/races/circuits/{ref}/seasons/{start}/{end}",
            get(races_for_circuit_between),
        )
        .route("/api/races/{race_id}", get(race_by_id))
        .route("/api/results/driver/{ref}", get(results_for_driver))
        .route(
            "/api/results/driver/{ref}/seasons/{start}/{end}",
            get(results_for_driver_between),
        )
        .route("/api/results/{race_id}", get(results_for_race))
        .route("/api/qualifying/{race_id}", get(qualifying_for_race))
        .route("/api/standings/{race_id}/drivers", get(driver_standings))
        .route(
            "/api/standings/{race_id}/constructors",
            get(constructor_standings),
        )
        .with_state(state)
}
