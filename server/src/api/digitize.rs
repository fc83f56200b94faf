use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::SharedState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use skillet_core::ocr::{digitize, OcrError};
use skillet_core::{RecipeContent, TagHints};
use utoipa::OpenApi;

use super::generate::DEFAULT_LATITUDE;

/// Digitize a photographed or scanned paper recipe into canonical content.
/// Nothing is persisted; the caller reviews the result and saves it
/// explicitly.
#[utoipa::path(
    post,
    path = "/api/digitize",
    tag = "digitize",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Digitized recipe content", body = RecipeContent),
        (status = 400, description = "Missing or unreadable image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Digitization failed", body = ErrorResponse),
        (status = 503, description = "OCR not configured", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn digitize_recipe(
    AuthUser(_user): AuthUser,
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut image: Option<Vec<u8>> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("image") {
            match field.bytes().await {
                Ok(bytes) => image = Some(bytes.to_vec()),
                Err(_) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse {
                            error: "Failed to read image".to_string(),
                        }),
                    )
                        .into_response()
                }
            }
        }
    }

    let image = match image {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "An image field is required".to_string(),
                }),
            )
                .into_response()
        }
    };

    let hints = TagHints::new(DEFAULT_LATITUDE, Utc::now().date_naive());

    match digitize(state.ocr.as_ref(), state.ai.as_ref(), &image, &hints).await {
        Ok(content) => (StatusCode::OK, Json(content)).into_response(),
        Err(OcrError::NotConfigured) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Digitization is not configured".to_string(),
            }),
        )
            .into_response(),
        Err(OcrError::EmptyText) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No text could be read from the image".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Digitization failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Digitization failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[derive(OpenApi)]
#[openapi(paths(digitize_recipe))]
pub struct ApiDoc;
