//! # REST API for Reminders

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use shared::ReminderSweepResponse;
use tracing::info;

use crate::io::rest::error::{ApiError, ApiQuery};
use crate::io::rest::mappers::ReminderMapper;
use crate::AppState;

const DEFAULT_LIST_LIMIT: u32 = 100;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reminders))
        .route("/sweep", post(sweep))
}

#[derive(Debug, Deserialize)]
pub struct SweepQuery {
    pub days_ahead: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReminderListQuery {
    pub limit: Option<u32>,
}

pub async fn sweep(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SweepQuery>,
) -> impl IntoResponse {
    let days_ahead = query.days_ahead.unwrap_or(state.reminder_days_ahead);
    info!("POST /reminders/sweep - days_ahead: {}", days_ahead);

    match state.reminder_service.send_due_bill_reminders(days_ahead).await {
        Ok(reminders_sent) => {
            (StatusCode::OK, Json(ReminderSweepResponse { reminders_sent })).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn list_reminders(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReminderListQuery>,
) -> impl IntoResponse {
    info!("GET /reminders - query: {:?}", query);

    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    match state.reminder_service.list_reminders(limit).await {
        Ok(reminders) => (StatusCode::OK, Json(ReminderMapper::to_dto_list(reminders))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
