use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use skillet_core::ai::generate_dish_ideas;
use utoipa::ToSchema;

use super::{generate_error_response, ConstraintParams};

const DEFAULT_NUM_IDEAS: usize = 5;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IdeasRequest {
    #[serde(flatten)]
    pub constraints: ConstraintParams,
    /// Number of ideas to generate (default 5, capped at 20)
    pub num_ideas: Option<usize>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IdeasResponse {
    pub dish_ideas: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/generate/ideas",
    tag = "generate",
    request_body = IdeasRequest,
    responses(
        (status = 200, description = "Dish title ideas", body = IdeasResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Generation failed", body = ErrorResponse),
        (status = 503, description = "AI not configured", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn generate_ideas(
    AuthUser(_user): AuthUser,
    State(state): State<SharedState>,
    Json(request): Json<IdeasRequest>,
) -> impl IntoResponse {
    let options = request.constraints.to_options();
    let num_ideas = request.num_ideas.unwrap_or(DEFAULT_NUM_IDEAS);

    match generate_dish_ideas(state.ai.as_ref(), &options, num_ideas).await {
        Ok(dish_ideas) => (StatusCode::OK, Json(IdeasResponse { dish_ideas })).into_response(),
        Err(e) => generate_error_response(e),
    }
}
