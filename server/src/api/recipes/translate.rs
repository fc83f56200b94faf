use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use skillet_core::translate::{translate_recipe as translate_content, TranslateError};
use skillet_core::RecipeContent;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TranslateRequest {
    /// Target language code, e.g. "de"
    pub lang: String,
}

/// Translate a recipe for display. The stored recipe is untouched; the
/// translated content is returned to the caller only.
#[utoipa::path(
    post,
    path = "/api/recipes/{id}/translate",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Translated recipe content", body = RecipeContent),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Recipe is private", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 502, description = "Translation failed", body = ErrorResponse),
        (status = 503, description = "Translation not configured", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn translate_recipe(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TranslateRequest>,
) -> impl IntoResponse {
    if request.lang.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Target language is required".to_string(),
            }),
        )
            .into_response();
    }

    let recipe: Recipe = {
        let mut conn = get_conn!(state.pool);
        match recipes::table
            .find(id)
            .select(Recipe::as_select())
            .first(&mut conn)
        {
            Ok(r) => r,
            Err(diesel::NotFound) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: "Recipe not found".to_string(),
                    }),
                )
                    .into_response()
            }
            Err(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to fetch recipe".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    };

    if recipe.user_id != Some(user.id) && !recipe.is_public {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Recipe is private".to_string(),
            }),
        )
            .into_response();
    }

    match translate_content(state.translator.as_ref(), &recipe.content(), &request.lang).await {
        Ok(translated) => (StatusCode::OK, Json(translated)).into_response(),
        Err(TranslateError::NotConfigured) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Translation is not configured".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Translation failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Translation failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}
