use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
use crate::SharedState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use skillet_core::{has_tag, matches_text};
use utoipa::{IntoParams, ToSchema};

use super::list::RecipeSummary;

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-insensitive substring matched against every text attribute
    pub q: Option<String>,
    /// Exact (case-sensitive) tag match; takes precedence over `q`
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    pub recipes: Vec<RecipeSummary>,
}

/// Apply the search predicates to loaded rows, preserving their order. A tag
/// filter takes precedence over a text query.
fn filter_rows(rows: &[Recipe], tag: Option<&str>, q: Option<&str>) -> Vec<RecipeSummary> {
    rows.iter()
        .filter(|row| {
            let content = row.content();
            match (tag, q) {
                (Some(tag), _) => has_tag(&content, tag),
                (None, Some(q)) => matches_text(&content, q),
                (None, None) => false,
            }
        })
        .map(RecipeSummary::from)
        .collect()
}

/// Search scans the user's whole collection: rows are decoded and matched in
/// memory against the stored text's decoded form, not its raw JSON.
#[utoipa::path(
    get,
    path = "/api/recipes/search",
    tag = "recipes",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching recipes", body = SearchResponse),
        (status = 400, description = "Missing search parameter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_recipes(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    if params.tag.is_none() && params.q.as_deref().map_or(true, |q| q.trim().is_empty()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Provide a search query or a tag".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(state.pool);

    let rows: Vec<Recipe> = match recipes::table
        .filter(recipes::user_id.eq(user.id))
        .order(recipes::updated_at.desc())
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

    let matches = filter_rows(&rows, params.tag.as_deref(), params.q.as_deref());

    (
        StatusCode::OK,
        Json(SearchResponse { recipes: matches }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skillet_core::{encode_ingredients, encode_steps, IngredientMap};

    fn row(title: &str, tags: &[&str]) -> Recipe {
        let mut ingredients = IngredientMap::new();
        ingredients.insert("Eggs".to_string(), "4 large".to_string());
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        Recipe {
            id: uuid::Uuid::new_v4(),
            user_id: Some(uuid::Uuid::new_v4()),
            title: title.to_string(),
            description: "Poached eggs in tomato sauce".to_string(),
            servings: 4,
            ingredients: encode_ingredients(&ingredients),
            instructions: encode_steps(&["Simmer the sauce.".to_string()]),
            notes: None,
            tags: if tags.is_empty() {
                None
            } else {
                Some(encode_steps(&tags))
            },
            image_filename: None,
            is_public: false,
            original_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn text_query_matches_decoded_fields_case_insensitively() {
        let rows = vec![row("Shakshuka", &[]), row("Granola", &[])];
        let found = filter_rows(&rows, None, Some("shak"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Shakshuka");

        // Ingredient keys are part of the searched text.
        let found = filter_rows(&rows, None, Some("egg"));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn tag_filter_is_exact_and_case_sensitive() {
        let rows = vec![row("Soup", &["vegan"]), row("Stew", &["Vegan"])];
        let found = filter_rows(&rows, Some("vegan"), None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Soup");
    }

    #[test]
    fn tag_filter_takes_precedence_over_query() {
        let rows = vec![row("Soup", &["vegan"]), row("Vegan Stew", &[])];
        let found = filter_rows(&rows, Some("vegan"), Some("stew"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Soup");
    }
}
