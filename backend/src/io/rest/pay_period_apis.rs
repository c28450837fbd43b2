//! # REST API for Pay Periods
//!
//! Pay period listing, per-period bills and the pay-period summary.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use crate::io::rest::error::{ApiError, ApiPath};
use crate::io::rest::mappers::{BillMapper, PayPeriodMapper};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pay_periods))
        .route("/:pp/bills", get(bills_for_pay_period))
        .route("/:pp/summary", get(pay_period_summary))
}

pub async fn list_pay_periods(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /payperiods");

    match state.bill_service.list_pay_periods().await {
        Ok(periods) => (StatusCode::OK, Json(PayPeriodMapper::to_dto_list(periods))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn bills_for_pay_period(
    State(state): State<AppState>,
    ApiPath(pp): ApiPath<i64>,
) -> impl IntoResponse {
    info!("GET /payperiods/{}/bills", pp);

    match state.bill_service.bills_for_pay_period(pp).await {
        Ok(bills) => (StatusCode::OK, Json(BillMapper::to_dto_list(bills))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn pay_period_summary(
    State(state): State<AppState>,
    ApiPath(pp): ApiPath<i64>,
) -> impl IntoResponse {
    info!("GET /payperiods/{}/summary", pp);

    match state.budget_service.pay_period_summary(pp).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
