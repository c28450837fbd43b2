//! # REST API for CSV Ingestion
//!
//! Accepts the bills CSV either as the raw request body or as a file field of
//! a `multipart/form-data` upload.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use tracing::info;

use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::BillMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/ingest/bills", post(ingest_bills))
}

pub async fn ingest_bills(State(state): State<AppState>, request: Request) -> impl IntoResponse {
    info!("POST /ingest/bills");

    let text = match read_csv_upload(request).await {
        Ok(text) => text,
        Err(e) => return e.into_response(),
    };

    match state.bill_service.ingest_csv(&text).await {
        Ok(result) => (StatusCode::OK, Json(BillMapper::to_ingest_response(result))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

async fn read_csv_upload(request: Request) -> Result<String, ApiError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("multipart/form-data"));

    let bytes = if is_multipart {
        read_multipart_file(request).await?
    } else {
        Bytes::from_request(request, &())
            .await
            .map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?
    };

    String::from_utf8(bytes.to_vec()).map_err(|_| ApiError::bad_request("CSV upload must be UTF-8 text"))
}

/// Contents of the `file` field, or of the first field carrying a file name
async fn read_multipart_file(request: Request) -> Result<Bytes, ApiError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() == Some("file") || field.file_name().is_some() {
            return field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(e.to_string()));
        }
    }

    Err(ApiError::bad_request("missing file"))
}
