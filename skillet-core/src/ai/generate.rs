//! Recipe generation operations: dish ideas and full recipes.
//!
//! Validation happens before any external call; a single failed call fails
//! the operation. The full-recipe path returns the raw parsed payload so the
//! caller can run it through the normalizer.

use serde_json::Value;
use thiserror::Error;

use super::client::{AiClient, AiError};
use super::prompts;
use super::types::{ChatMessage, ChatRequest};
use crate::normalize::{Difficulty, TagHints};

/// Upper bound on dish ideas per request.
pub const MAX_DISH_IDEAS: usize = 20;

/// Fields every generated recipe payload must carry.
const REQUIRED_FIELDS: [&str; 4] = ["title", "description", "ingredients", "instructions"];

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Please enter at least one ingredient")]
    NoIngredients,

    #[error("Please enter a description")]
    NoDescription,

    #[error("Dish title is required")]
    NoTitle,

    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Generation mode: seed the prompt from an ingredient list or a free-text
/// description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    #[default]
    Ingredients,
    Description,
}

/// Prompt context for both generation operations.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub mode: PromptMode,
    pub ingredients: Vec<String>,
    pub description: String,
    pub use_only: bool,
    pub vegetarian: bool,
    pub vegan: bool,
    pub seasonal: bool,
    pub allergies: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Human-readable location, only used to phrase the seasonal constraint.
    pub location: Option<String>,
}

impl GenerateOptions {
    fn validate(&self) -> Result<(), GenerateError> {
        match self.mode {
            PromptMode::Ingredients if self.ingredients.iter().all(|i| i.trim().is_empty()) => {
                Err(GenerateError::NoIngredients)
            }
            PromptMode::Description if self.description.trim().is_empty() => {
                Err(GenerateError::NoDescription)
            }
            _ => Ok(()),
        }
    }

    fn ingredients_for_prompt(&self) -> &[String] {
        match self.mode {
            PromptMode::Ingredients => &self.ingredients,
            PromptMode::Description => &[],
        }
    }

    /// Tag hints matching these constraints, for the normalization step.
    pub fn tag_hints(&self, latitude: f64, today: chrono::NaiveDate) -> TagHints {
        TagHints {
            vegetarian: self.vegetarian,
            vegan: self.vegan,
            seasonal: self.seasonal,
            allergies: self.allergies.clone(),
            difficulty: self.difficulty,
            latitude,
            today,
        }
    }
}

/// Strip Markdown code fences and parse the remainder as JSON.
///
/// Providers asked for JSON still occasionally wrap the object in
/// ```` ```json ```` fences.
pub fn parse_fenced_json(text: &str) -> Result<Value, AiError> {
    let mut s = text.trim();

    if let Some(rest) = s
        .strip_prefix("```json")
        .or_else(|| s.strip_prefix("```JSON"))
        .or_else(|| s.strip_prefix("```"))
    {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }

    serde_json::from_str(s.trim()).map_err(|e| AiError::ParseError(e.to_string()))
}

#[derive(serde::Deserialize)]
struct DishIdeasResponse {
    #[serde(default)]
    dish_ideas: Vec<String>,
}

/// Generate dish title ideas. `num_ideas` is capped at [`MAX_DISH_IDEAS`].
pub async fn generate_dish_ideas(
    ai: &dyn AiClient,
    options: &GenerateOptions,
    num_ideas: usize,
) -> Result<Vec<String>, GenerateError> {
    options.validate()?;

    let num_ideas = num_ideas.clamp(1, MAX_DISH_IDEAS);
    let prompt = prompts::render_ideas_prompt(
        num_ideas,
        options.ingredients_for_prompt(),
        &options.description,
        options.use_only,
        options.vegetarian,
        options.vegan,
        options.seasonal,
        options.allergies.as_deref(),
        options.difficulty,
        options.location.as_deref(),
    );

    let request = ChatRequest {
        messages: vec![
            ChatMessage::system(prompts::DISH_IDEAS_SYSTEM),
            ChatMessage::user(prompt),
        ],
        temperature: Some(0.7),
        json_response: true,
        ..Default::default()
    };

    let response = ai.complete(request).await?;
    let mut parsed: DishIdeasResponse =
        serde_json::from_value(parse_fenced_json(&response.content)?)
            .map_err(|e| AiError::ParseError(e.to_string()))?;

    // Providers sometimes ignore the requested count.
    parsed.dish_ideas.truncate(num_ideas);

    Ok(parsed.dish_ideas)
}

/// Generate a full recipe payload for a chosen title.
///
/// The payload is verified to carry the required fields (the missing field is
/// named in the error) and returned raw for
/// [`crate::normalize::normalize_recipe`].
pub async fn generate_recipe(
    ai: &dyn AiClient,
    title: &str,
    options: &GenerateOptions,
) -> Result<Value, GenerateError> {
    if title.trim().is_empty() {
        return Err(GenerateError::NoTitle);
    }
    options.validate()?;

    let prompt = prompts::render_recipe_prompt(
        title,
        options.ingredients_for_prompt(),
        &options.description,
        options.use_only,
        options.vegetarian,
        options.vegan,
        options.seasonal,
        options.allergies.as_deref(),
        options.difficulty,
        options.location.as_deref(),
    );

    let request = ChatRequest {
        messages: vec![
            ChatMessage::system(prompts::CREATE_RECIPE_SYSTEM),
            ChatMessage::user(prompt),
        ],
        temperature: Some(0.7),
        json_response: true,
        ..Default::default()
    };

    let response = ai.complete(request).await?;
    let payload = parse_fenced_json(&response.content)?;

    for field in REQUIRED_FIELDS {
        if payload.get(field).is_none() {
            return Err(AiError::MissingField(field.to_string()).into());
        }
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;
    use serde_json::json;

    const RECIPE_JSON: &str = r#"{
        "title": "Chickpea Curry",
        "description": "A quick weeknight curry.",
        "ingredients": {"servings": 4, "items": {"chickpeas": "1 can"}},
        "instructions": ["Simmer everything."],
        "notes": ["Freezes well."]
    }"#;

    fn ingredient_options() -> GenerateOptions {
        GenerateOptions {
            ingredients: vec!["chickpeas".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(parse_fenced_json(fenced).unwrap(), json!({"a": 1}));
        assert_eq!(parse_fenced_json("{\"a\": 1}").unwrap(), json!({"a": 1}));
        assert!(parse_fenced_json("not json").is_err());
    }

    #[tokio::test]
    async fn ingredient_mode_requires_ingredients() {
        let ai = FakeAiClient::default();
        let options = GenerateOptions::default();
        let err = generate_dish_ideas(&ai, &options, 5).await.unwrap_err();
        assert!(matches!(err, GenerateError::NoIngredients));
    }

    #[tokio::test]
    async fn description_mode_requires_description() {
        let ai = FakeAiClient::default();
        let options = GenerateOptions {
            mode: PromptMode::Description,
            ..Default::default()
        };
        let err = generate_dish_ideas(&ai, &options, 5).await.unwrap_err();
        assert!(matches!(err, GenerateError::NoDescription));
    }

    #[tokio::test]
    async fn dish_ideas_parse_from_response() {
        let ai = FakeAiClient::with_response(
            "recipe ideas",
            r#"{"dish_ideas": ["Chana Masala", "Falafel Bowls"]}"#,
        );
        let ideas = generate_dish_ideas(&ai, &ingredient_options(), 2)
            .await
            .unwrap();
        assert_eq!(ideas, vec!["Chana Masala", "Falafel Bowls"]);
    }

    #[tokio::test]
    async fn overdelivered_dish_ideas_are_capped_at_the_requested_count() {
        let ai = FakeAiClient::with_response(
            "recipe ideas",
            r#"{"dish_ideas": ["Chana Masala", "Falafel Bowls", "Hummus Plates", "Chickpea Stew"]}"#,
        );
        let ideas = generate_dish_ideas(&ai, &ingredient_options(), 2)
            .await
            .unwrap();
        assert_eq!(ideas, vec!["Chana Masala", "Falafel Bowls"]);
    }

    #[tokio::test]
    async fn recipe_generation_requires_title() {
        let ai = FakeAiClient::default();
        let err = generate_recipe(&ai, "  ", &ingredient_options())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::NoTitle));
    }

    #[tokio::test]
    async fn recipe_payload_is_returned_raw() {
        let ai = FakeAiClient::with_response("detailed recipe", RECIPE_JSON);
        let payload = generate_recipe(&ai, "Chickpea Curry", &ingredient_options())
            .await
            .unwrap();
        assert_eq!(payload["title"], "Chickpea Curry");
        assert_eq!(payload["ingredients"]["servings"], 4);
    }

    #[tokio::test]
    async fn missing_field_is_named() {
        let ai = FakeAiClient::with_response(
            "detailed recipe",
            r#"{"title": "X", "description": "Y", "ingredients": {}}"#,
        );
        let err = generate_recipe(&ai, "X", &ingredient_options())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("instructions"));
    }
}
