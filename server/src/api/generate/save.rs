use crate::api::recipes::create::insert_recipe;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::NewRecipe;
use crate::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use skillet_core::RecipeContent;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaveRecipeRequest {
    /// The canonical content returned by the generate or digitize endpoints
    pub recipe: RecipeContent,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaveRecipeResponse {
    pub recipe_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/generate/save",
    tag = "generate",
    request_body = SaveRecipeRequest,
    responses(
        (status = 201, description = "Generated recipe saved", body = SaveRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn save_generated_recipe(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Json(request): Json<SaveRecipeRequest>,
) -> impl IntoResponse {
    if request.recipe.title.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Title cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(state.pool);

    let new_recipe = NewRecipe::from_content(user.id, &request.recipe, request.is_public);

    match insert_recipe(&mut conn, new_recipe) {
        Ok(recipe_id) => (
            StatusCode::CREATED,
            Json(SaveRecipeResponse { recipe_id }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to save generated recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to save recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
