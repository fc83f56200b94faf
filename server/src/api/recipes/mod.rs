pub mod copy;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod list;
pub mod search;
pub mod tags;
pub mod translate;
pub mod update;

use crate::SharedState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/tags", get(tags::list_tags))
        .route("/search", get(search::search_recipes))
        .route("/export", get(export::export_cookbook))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/copy", post(copy::copy_recipe))
        .route("/{id}/translate", post(translate::translate_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        copy::copy_recipe,
        search::search_recipes,
        tags::list_tags,
        translate::translate_recipe,
        export::export_cookbook,
    ),
    components(schemas(
        create::CreateRecipeRequest,
        create::CreateRecipeResponse,
        list::ListRecipesResponse,
        list::RecipeSummary,
        get::RecipeResponse,
        update::UpdateRecipeRequest,
        copy::CopyRecipeResponse,
        search::SearchResponse,
        tags::TagsResponse,
        translate::TranslateRequest,
    ))
)]
pub struct ApiDoc;
