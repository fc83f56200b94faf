use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::{NewRecipe, Recipe};
use crate::schema::recipes;
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CopyRecipeResponse {
    pub id: Uuid,
}

/// Why a copy request is refused, checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyRefusal {
    OwnRecipe,
    Private,
    Untracked,
    AlreadyCopied,
}

/// Decide whether `user_id` may copy `source`, before touching the database
/// again. On success, returns the lineage root the copy will share.
fn copy_precheck(source: &Recipe, user_id: Uuid) -> Result<Uuid, CopyRefusal> {
    if source.user_id == Some(user_id) {
        return Err(CopyRefusal::OwnRecipe);
    }
    if !source.is_public {
        return Err(CopyRefusal::Private);
    }
    // Rows predating lineage stamping carry no original_id and cannot be
    // tracked for duplicate copies.
    source.original_id.ok_or(CopyRefusal::Untracked)
}

/// Build the copy row: stored text verbatim, the copier's user_id, the
/// source's lineage root, private, and without the source's image.
fn copy_row(source: &Recipe, user_id: Uuid, original_id: Uuid) -> NewRecipe {
    NewRecipe {
        user_id: Some(user_id),
        title: source.title.clone(),
        description: source.description.clone(),
        servings: source.servings,
        ingredients: source.ingredients.clone(),
        instructions: source.instructions.clone(),
        notes: source.notes.clone(),
        tags: source.tags.clone(),
        image_filename: None,
        is_public: false,
        original_id: Some(original_id),
    }
}

fn refusal_response(refusal: CopyRefusal) -> axum::response::Response {
    let (status, message) = match refusal {
        CopyRefusal::OwnRecipe => (StatusCode::CONFLICT, "You cannot copy your own recipe"),
        CopyRefusal::Private => (StatusCode::FORBIDDEN, "Recipe is private"),
        CopyRefusal::Untracked => (StatusCode::CONFLICT, "Recipe cannot be copied"),
        CopyRefusal::AlreadyCopied => (StatusCode::CONFLICT, "You already copied this recipe"),
    };
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/copy",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID to copy")
    ),
    responses(
        (status = 201, description = "Recipe copied into the user's collection", body = CopyRecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Recipe is private", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Recipe cannot be copied", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn copy_recipe(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let source: Recipe = match recipes::table
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

    let original_id = match copy_precheck(&source, user.id) {
        Ok(oid) => oid,
        Err(refusal) => return refusal_response(refusal),
    };

    // Duplicate check and insert in one transaction.
    let result: Result<Option<Uuid>, diesel::result::Error> = conn.transaction(|conn| {
        let already_copied = diesel::select(diesel::dsl::exists(
            recipes::table
                .filter(recipes::user_id.eq(user.id))
                .filter(recipes::original_id.eq(original_id)),
        ))
        .get_result(conn)?;

        if already_copied {
            return Ok(None);
        }

        let copy_id: Uuid = diesel::insert_into(recipes::table)
            .values(copy_row(&source, user.id, original_id))
            .returning(recipes::id)
            .get_result(conn)?;

        Ok(Some(copy_id))
    });

    match result {
        Ok(Some(copy_id)) => (
            StatusCode::CREATED,
            Json(CopyRecipeResponse { id: copy_id }),
        )
            .into_response(),
        Ok(None) => refusal_response(CopyRefusal::AlreadyCopied),
        Err(e) => {
            tracing::error!("Failed to copy recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to copy recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
