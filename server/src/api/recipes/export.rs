use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
use crate::SharedState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use skillet_core::pdf::cookbook_outline;

/// Download the user's whole collection as a cookbook document.
#[utoipa::path(
    get,
    path = "/api/recipes/export",
    tag = "recipes",
    responses(
        (status = 200, description = "Rendered cookbook document", content_type = "application/octet-stream"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No recipes to export", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn export_cookbook(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let rows: Vec<Recipe> = match recipes::table
        .filter(recipes::user_id.eq(user.id))
        .order(recipes::title.asc())
        .select(Recipe::as_select())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response()
        }
    };

    if rows.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No recipes to export".to_string(),
            }),
        )
            .into_response();
    }

    let sections: Vec<_> = rows
        .iter()
        .map(|row| (row.content(), row.image_filename.clone()))
        .collect();

    let title = format!("{}'s Cookbook", user.username);
    let outline = cookbook_outline(&title, &sections);
    let body = state.renderer.render(&outline);

    let filename = format!("cookbook.{}", state.renderer.file_extension());

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, state.renderer.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}
