//! # REST API Interface Layer
//!
//! One `*_apis` module per resource, each exposing a `router()`. The combined
//! router is served both at the root and under `/api`.

pub mod bill_apis;
pub mod budget_apis;
pub mod calendar_apis;
pub mod error;
pub mod gamification_apis;
pub mod ingest_apis;
pub mod mappers;
pub mod pay_period_apis;
pub mod paycheck_apis;
pub mod reminder_apis;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use shared::ApiInfo;

use crate::AppState;

pub use error::{ApiError, ApiJson, ApiPath, ApiQuery};

/// Every route of the API, relative to its mount point
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(api_info))
        .nest("/bills", bill_apis::router())
        .nest("/payperiods", pay_period_apis::router())
        .nest("/paychecks", paycheck_apis::router())
        .nest("/gamification", gamification_apis::router())
        .nest("/reminders", reminder_apis::router())
        .merge(budget_apis::router())
        .merge(calendar_apis::router())
        .merge(ingest_apis::router())
}

pub async fn api_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiInfo {
            ok: true,
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
