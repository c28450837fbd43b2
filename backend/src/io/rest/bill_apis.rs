//! # REST API for Bills
//!
//! CRUD endpoints plus the paid toggle.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{CreateBillRequest, UpdateBillRequest};
use tracing::info;

use crate::io::rest::error::{ApiError, ApiJson, ApiPath};
use crate::io::rest::mappers::BillMapper;
use crate::AppState;

/// Create a router for bill related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bills).post(create_bill))
        .route("/:id", get(get_bill).put(update_bill).delete(delete_bill))
        .route("/:id/toggle-paid", post(toggle_paid))
}

pub async fn list_bills(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /bills");

    match state.bill_service.list_bills().await {
        Ok(bills) => (StatusCode::OK, Json(BillMapper::to_dto_list(bills))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_bill(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> impl IntoResponse {
    info!("GET /bills/{}", id);

    match state.bill_service.get_bill(id).await {
        Ok(bill) => (StatusCode::OK, Json(BillMapper::to_dto(bill))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn create_bill(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateBillRequest>,
) -> impl IntoResponse {
    info!("POST /bills - request: {:?}", request);

    let command = BillMapper::to_create_command(request);
    match state.bill_service.create_bill(command).await {
        Ok(bill) => (StatusCode::CREATED, Json(BillMapper::to_dto(bill))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_bill(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateBillRequest>,
) -> impl IntoResponse {
    info!("PUT /bills/{} - request: {:?}", id, request);

    let command = BillMapper::to_update_command(request);
    match state.bill_service.update_bill(id, command).await {
        Ok(bill) => (StatusCode::OK, Json(BillMapper::to_dto(bill))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_bill(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> impl IntoResponse {
    info!("DELETE /bills/{}", id);

    match state.bill_service.delete_bill(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn toggle_paid(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> impl IntoResponse {
    info!("POST /bills/{}/toggle-paid", id);

    match state.bill_service.toggle_paid(id).await {
        Ok(bill) => (StatusCode::OK, Json(BillMapper::to_dto(bill))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
