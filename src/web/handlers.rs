use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to ACEest Fitness Web API";
pub const ADDED_MESSAGE: &str = "Workout added successfully";

pub async fn home() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// Stores the posted JSON as is. Bodies that aren't JSON are answered with the extractor's own
/// client error status and never reach the store.
pub async fn add_workout(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let record = match payload {
        Ok(Json(record)) => record,
        Err(rejection) => {
            warn!("Rejected workout body: {}", rejection.body_text());
            return (
                rejection.status(),
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    debug!("Adding workout {record}");
    let mut store = state.store.write().await;
    store.append(record);
    info!("Stored workout, {} in total", store.len());

    (StatusCode::CREATED, Json(json!({ "message": ADDED_MESSAGE }))).into_response()
}

pub async fn view_workouts(State(state): State<AppState>) -> Json<Vec<Value>> {
    let store = state.store.read().await;
    Json(store.records().cloned().collect())
}
