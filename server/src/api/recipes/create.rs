use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::NewRecipe;
use crate::schema::recipes;
use crate::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use skillet_core::{IngredientMap, RecipeContent, DEFAULT_SERVINGS};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
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
    #[serde(default)]
    pub is_public: bool,
}

impl CreateRecipeRequest {
    pub fn into_content(self) -> RecipeContent {
        RecipeContent {
            title: self.title,
            description: self.description,
            servings: self.servings.filter(|s| *s > 0).unwrap_or(DEFAULT_SERVINGS),
            ingredients: self.ingredients,
            instructions: self.instructions,
            notes: self.notes,
            tags: self.tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
}

/// Insert a recipe and stamp its lineage root to its own id, atomically.
/// Every recipe row ends up with a non-null original_id.
pub fn insert_recipe(
    conn: &mut PgConnection,
    mut new_recipe: NewRecipe,
) -> Result<Uuid, diesel::result::Error> {
    conn.transaction(|conn| {
        new_recipe.original_id = None;

        let recipe_id: Uuid = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(recipes::id)
            .get_result(conn)?;

        diesel::update(recipes::table.find(recipe_id))
            .set(recipes::original_id.eq(recipe_id))
            .execute(conn)?;

        Ok(recipe_id)
    })
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Json(request): Json<CreateRecipeRequest>,
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

    let is_public = request.is_public;
    let content = request.into_content();
    let new_recipe = NewRecipe::from_content(user.id, &content, is_public);

    match insert_recipe(&mut conn, new_recipe) {
        Ok(recipe_id) => (
            StatusCode::CREATED,
            Json(CreateRecipeResponse { id: recipe_id }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
