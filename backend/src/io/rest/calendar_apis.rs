//! # REST API for the Calendar Feed

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use crate::io::rest::error::ApiError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/calendar", get(calendar_events))
}

pub async fn calendar_events(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /calendar");

    match state.calendar_service.events().await {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
