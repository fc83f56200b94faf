use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::images::delete_recipe_images;
use crate::schema::recipes;
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let image_filename: Option<String> = match recipes::table
        .find(id)
        .filter(recipes::user_id.eq(user.id))
        .select(recipes::image_filename)
        .first(&mut conn)
    {
        Ok(f) => f,
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

    if let Err(e) = diesel::delete(
        recipes::table
            .find(id)
            .filter(recipes::user_id.eq(user.id)),
    )
    .execute(&mut conn)
    {
        tracing::error!("Failed to delete recipe: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to delete recipe".to_string(),
            }),
        )
            .into_response();
    }

    // Image cleanup happens after the row is gone; leftover files are logged,
    // not surfaced.
    if let Some(filename) = image_filename {
        delete_recipe_images(&state.upload_dir, &filename);
    }

    StatusCode::NO_CONTENT.into_response()
}
