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
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use skillet_core::IngredientMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub servings: i32,
    #[schema(value_type = Object)]
    pub ingredients: IngredientMap,
    pub instructions: Vec<String>,
    pub notes: Vec<String>,
    pub tags: Vec<String>,
    pub image_filename: Option<String>,
    pub is_public: bool,
    /// Whether the requesting user owns this recipe.
    pub is_own: bool,
    /// Whether the requesting user already copied this recipe.
    pub already_copied: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeResponse {
    pub fn from_row(recipe: &Recipe, is_own: bool, already_copied: bool) -> Self {
        let content = recipe.content();
        RecipeResponse {
            id: recipe.id,
            title: content.title,
            description: content.description,
            servings: content.servings,
            ingredients: content.ingredients,
            instructions: content.instructions,
            notes: content.notes,
            tags: content.tags,
            image_filename: recipe.image_filename.clone(),
            is_public: recipe.is_public,
            is_own,
            already_copied,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Recipe is private", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_recipe(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let recipe: Recipe = match recipes::table
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
    };

    let is_own = recipe.user_id == Some(user.id);
    if !is_own && !recipe.is_public {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Recipe is private".to_string(),
            }),
        )
            .into_response();
    }

    // For public recipes, tell the viewer whether their collection already
    // holds a copy from the same lineage.
    let already_copied = if is_own {
        false
    } else if let Some(original_id) = recipe.original_id {
        diesel::select(diesel::dsl::exists(
            recipes::table
                .filter(recipes::user_id.eq(user.id))
                .filter(recipes::original_id.eq(original_id)),
        ))
        .get_result(&mut conn)
        .unwrap_or(false)
    } else {
        false
    };

    (
        StatusCode::OK,
        Json(RecipeResponse::from_row(&recipe, is_own, already_copied)),
    )
        .into_response()
}
