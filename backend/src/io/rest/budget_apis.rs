//! # REST API for Budget Views
//!
//! Debt snowball, unlock suggestions and transaction reconciliation.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{ReconcileRequest, SnowballRequest};
use std::str::FromStr;
use tracing::info;

use crate::domain::commands::snowball::SnowballCommand;
use crate::io::rest::error::{ApiError, ApiJson, ApiQuery};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/debts/snowball", get(snowball_from_bills).post(snowball))
        .route("/unlocks", get(unlocks))
        .route("/reconcile", post(reconcile))
}

#[derive(Debug, Deserialize)]
pub struct SnowballQuery {
    pub monthly_payment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnlocksQuery {
    #[serde(default)]
    pub include_bills: bool,
}

pub async fn snowball_from_bills(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SnowballQuery>,
) -> impl IntoResponse {
    info!("GET /debts/snowball - query: {:?}", query);

    let monthly_payment = match query.monthly_payment.as_deref().map(str::trim) {
        Some(raw) => match Decimal::from_str(raw) {
            Ok(payment) => Some(payment),
            Err(_) => {
                return ApiError::bad_request(format!("Invalid monthly_payment '{}'", raw)).into_response()
            }
        },
        None => None,
    };

    match state.budget_service.snowball_from_bills(monthly_payment).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn snowball(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SnowballRequest>,
) -> impl IntoResponse {
    info!("POST /debts/snowball - {} debts", request.debts.len());

    let entries = state.budget_service.snowball(SnowballCommand {
        debts: request.debts,
        monthly_payment: request.monthly_payment,
    });
    (StatusCode::OK, Json(entries)).into_response()
}

pub async fn unlocks(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UnlocksQuery>,
) -> impl IntoResponse {
    info!("GET /unlocks - query: {:?}", query);

    match state.budget_service.unlocks(query.include_bills).await {
        Ok(suggestions) => (StatusCode::OK, Json(suggestions)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn reconcile(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ReconcileRequest>,
) -> impl IntoResponse {
    let transactions = request.transactions.unwrap_or_default();
    info!("POST /reconcile - {} transactions", transactions.len());

    match state.budget_service.reconcile(transactions).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
