use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::schema::recipes;
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use diesel::prelude::*;
use serde::Deserialize;
use skillet_core::{encode_ingredients, encode_optional_steps, encode_steps, IngredientMap};
use utoipa::ToSchema;
use uuid::Uuid;

/// Full-replacement update: every content field is taken from the request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub servings: Option<i32>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub ingredients: IngredientMap,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_public: Option<bool>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    if request.title.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Title cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(state.pool);

    let servings = request
        .servings
        .filter(|s| *s > 0)
        .unwrap_or(skillet_core::DEFAULT_SERVINGS);

    let result = diesel::update(
        recipes::table
            .find(id)
            .filter(recipes::user_id.eq(user.id)),
    )
    .set((
        recipes::title.eq(&request.title),
        recipes::description.eq(&request.description),
        recipes::servings.eq(servings),
        recipes::ingredients.eq(encode_ingredients(&request.ingredients)),
        recipes::instructions.eq(encode_steps(&request.instructions)),
        recipes::notes.eq(encode_optional_steps(&request.notes)),
        recipes::tags.eq(encode_optional_steps(&request.tags)),
        recipes::is_public.eq(request.is_public.unwrap_or(false)),
        recipes::updated_at.eq(Utc::now()),
    ))
    .execute(&mut conn);

    match result {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::error!("Failed to update recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
