pub mod ideas;
pub mod recipe;
pub mod save;

use crate::SharedState;
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use skillet_core::ai::{GenerateOptions, PromptMode};
use skillet_core::{Difficulty, TagHints};
use utoipa::{OpenApi, ToSchema};

/// Latitude used for the seasonal tag when the client does not send one.
pub const DEFAULT_LATITUDE: f64 = 49.5;

/// Generation constraints shared by the ideas and recipe endpoints.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ConstraintParams {
    #[serde(default)]
    pub mode: PromptMode,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub use_only: bool,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub seasonal: bool,
    pub allergies: Option<String>,
    /// "easy", "medium", or "hard"; anything else is ignored
    pub difficulty: Option<String>,
    pub location: Option<String>,
    /// Signed degrees, used only for the seasonal tag
    pub latitude: Option<f64>,
}

impl ConstraintParams {
    pub fn to_options(&self) -> GenerateOptions {
        GenerateOptions {
            mode: self.mode,
            ingredients: self.ingredients.clone(),
            description: self.description.clone(),
            use_only: self.use_only,
            vegetarian: self.vegetarian,
            vegan: self.vegan,
            seasonal: self.seasonal,
            allergies: self.allergies.clone(),
            difficulty: self.difficulty.as_deref().and_then(Difficulty::parse),
            location: self.location.clone(),
        }
    }

    pub fn tag_hints(&self) -> TagHints {
        self.to_options().tag_hints(
            self.latitude.unwrap_or(DEFAULT_LATITUDE),
            chrono::Utc::now().date_naive(),
        )
    }
}

/// Map a generation failure to a response: validation problems are the
/// caller's (400), an unconfigured provider is 503, everything else from the
/// provider is 502.
pub(crate) fn generate_error_response(e: skillet_core::ai::GenerateError) -> axum::response::Response {
    use axum::response::IntoResponse;
    use skillet_core::ai::{AiError, GenerateError};

    let (status, message) = match &e {
        GenerateError::NoIngredients | GenerateError::NoDescription | GenerateError::NoTitle => {
            (axum::http::StatusCode::BAD_REQUEST, e.to_string())
        }
        GenerateError::Ai(AiError::NotConfigured(_)) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            "AI generation is not configured".to_string(),
        ),
        GenerateError::Ai(inner) => {
            tracing::error!("AI generation failed: {}", inner);
            (
                axum::http::StatusCode::BAD_GATEWAY,
                "Recipe generation failed".to_string(),
            )
        }
    };

    (status, axum::Json(crate::api::ErrorResponse { error: message })).into_response()
}

/// Returns the router for /api/generate endpoints (mounted at /api/generate)
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/ideas", post(ideas::generate_ideas))
        .route("/recipe", post(recipe::generate_full_recipe))
        .route("/save", post(save::save_generated_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        ideas::generate_ideas,
        recipe::generate_full_recipe,
        save::save_generated_recipe,
    ),
    components(schemas(
        ConstraintParams,
        ideas::IdeasRequest,
        ideas::IdeasResponse,
        recipe::GenerateRecipeRequest,
        save::SaveRecipeRequest,
        save::SaveRecipeResponse,
    ))
)]
pub struct ApiDoc;
