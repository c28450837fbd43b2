//! # REST API for Paychecks

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{CreatePaycheckRequest, UpdatePaycheckRequest};
use tracing::info;

use crate::io::rest::error::{ApiError, ApiJson, ApiPath};
use crate::io::rest::mappers::PaycheckMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_paychecks).post(create_paycheck))
        .route("/:id", get(get_paycheck).put(update_paycheck).delete(delete_paycheck))
}

pub async fn list_paychecks(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /paychecks");

    match state.paycheck_service.list_paychecks().await {
        Ok(paychecks) => (StatusCode::OK, Json(PaycheckMapper::to_dto_list(paychecks))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_paycheck(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> impl IntoResponse {
    info!("GET /paychecks/{}", id);

    match state.paycheck_service.get_paycheck(id).await {
        Ok(paycheck) => (StatusCode::OK, Json(PaycheckMapper::to_dto(paycheck))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn create_paycheck(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreatePaycheckRequest>,
) -> impl IntoResponse {
    info!("POST /paychecks - request: {:?}", request);

    let command = PaycheckMapper::to_create_command(request);
    match state.paycheck_service.create_paycheck(command).await {
        Ok(paycheck) => (StatusCode::CREATED, Json(PaycheckMapper::to_dto(paycheck))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_paycheck(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdatePaycheckRequest>,
) -> impl IntoResponse {
    info!("PUT /paychecks/{} - request: {:?}", id, request);

    let command = PaycheckMapper::to_update_command(request);
    match state.paycheck_service.update_paycheck(id, command).await {
        Ok(paycheck) => (StatusCode::OK, Json(PaycheckMapper::to_dto(paycheck))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_paycheck(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> impl IntoResponse {
    info!("DELETE /paychecks/{}", id);

    match state.paycheck_service.delete_paycheck(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
