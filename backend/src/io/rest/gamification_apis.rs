//! # REST API for Gamification

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::CompleteTaskRequest;
use tracing::info;

use crate::io::rest::error::{ApiError, ApiJson};
use crate::io::rest::mappers::GamificationMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(status))
        .route("/complete-task", post(complete_task))
        .route("/tasks", get(tasks))
        .route("/task-types", get(task_types))
}

pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /gamification/status");

    let current = state.gamification_service.status().await;
    (StatusCode::OK, Json(GamificationMapper::to_status_dto(&current))).into_response()
}

pub async fn complete_task(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CompleteTaskRequest>,
) -> impl IntoResponse {
    info!("POST /gamification/complete-task - request: {:?}", request);

    let command = GamificationMapper::to_complete_task_command(request);
    match state.gamification_service.complete_task(command).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn tasks(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /gamification/tasks");

    match state.gamification_service.tasks().await {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn task_types(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /gamification/task-types");
    (StatusCode::OK, Json(state.gamification_service.task_types())).into_response()
}
