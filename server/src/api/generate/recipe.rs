use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use skillet_core::ai::generate_recipe;
use skillet_core::{normalize_recipe, RecipeContent};
use utoipa::ToSchema;

use super::{generate_error_response, ConstraintParams};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateRecipeRequest {
    /// Chosen dish title (usually one of the generated ideas)
    pub title: String,
    #[serde(flatten)]
    pub constraints: ConstraintParams,
}

/// Generate a full recipe for a chosen title. The provider payload is
/// normalized into canonical content before it reaches the caller; nothing is
/// persisted until the caller saves it.
#[utoipa::path(
    post,
    path = "/api/generate/recipe",
    tag = "generate",
    request_body = GenerateRecipeRequest,
    responses(
        (status = 200, description = "Generated recipe content", body = RecipeContent),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Generation failed", body = ErrorResponse),
        (status = 503, description = "AI not configured", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn generate_full_recipe(
    AuthUser(_user): AuthUser,
    State(state): State<SharedState>,
    Json(request): Json<GenerateRecipeRequest>,
) -> impl IntoResponse {
    let options = request.constraints.to_options();

    let payload = match generate_recipe(state.ai.as_ref(), &request.title, &options).await {
        Ok(p) => p,
        Err(e) => return generate_error_response(e),
    };

    let content = normalize_recipe(&payload, &request.constraints.tag_hints());

    (StatusCode::OK, Json(content)).into_response()
}
