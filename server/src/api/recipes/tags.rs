use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::schema::recipes;
use crate::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use skillet_core::decode_steps;
use std::collections::BTreeSet;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagsResponse {
    /// List of distinct tags used across user's recipes, sorted alphabetically
    pub tags: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/tags",
    tag = "recipes",
    responses(
        (status = 200, description = "List of distinct tags", body = TagsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_tags(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let stored: Vec<Option<String>> = match recipes::table
        .filter(recipes::user_id.eq(user.id))
        .select(recipes::tags)
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch tags".to_string(),
                }),
            )
                .into_response()
        }
    };

    let distinct: BTreeSet<String> = stored
        .iter()
        .flat_map(|tags| decode_steps(tags.as_deref()))
        .collect();

    let response = TagsResponse {
        tags: distinct.into_iter().collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
