//! End-to-end tests for the AI generation path: prompt -> raw payload ->
//! normalized canonical recipe, exercising the payload shapes real providers
//! have been observed to emit.

use chrono::NaiveDate;
use skillet_core::ai::{generate_recipe, FakeAiClient, GenerateOptions};
use skillet_core::normalize::{normalize_recipe, AI_GENERATED_TAG};
use skillet_core::{Difficulty, DEFAULT_SERVINGS};

fn options() -> GenerateOptions {
    GenerateOptions {
        ingredients: vec!["eggs".to_string(), "spinach".to_string()],
        ..Default::default()
    }
}

fn july_hints() -> skillet_core::TagHints {
    skillet_core::TagHints::new(49.5, NaiveDate::from_ymd_opt(2026, 7, 15).unwrap())
}

async fn run(payload: &str) -> skillet_core::RecipeContent {
    let ai = FakeAiClient::with_response("detailed recipe", payload);
    let raw = generate_recipe(&ai, "Green Shakshuka", &options())
        .await
        .unwrap();
    normalize_recipe(&raw, &july_hints())
}

#[tokio::test]
async fn documented_shape_normalizes_cleanly() {
    let recipe = run(r#"{
        "title": "Green Shakshuka",
        "description": "Eggs poached in garlicky greens.",
        "notes": ["Use a lid to set the whites."],
        "ingredients": {"servings": 2, "items": {"eggs": "4", "spinach": "300 g"}},
        "instructions": ["Wilt the spinach.", "Crack in the eggs.", "Cover and cook."]
    }"#)
    .await;

    assert_eq!(recipe.title, "Green Shakshuka");
    assert_eq!(recipe.servings, 2);
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.instructions.len(), 3);
    assert_eq!(recipe.notes, vec!["Use a lid to set the whites."]);
    assert_eq!(recipe.tags, vec![AI_GENERATED_TAG]);
}

#[tokio::test]
async fn pair_shape_from_drifting_provider() {
    let recipe = run(r#"{
        "title": "Green Shakshuka",
        "description": "",
        "ingredients": [4, {"eggs": "4", "spinach": "300 g"}],
        "instructions": ["Cook."]
    }"#)
    .await;

    assert_eq!(recipe.servings, 4);
    assert_eq!(
        recipe.ingredients.get("spinach").map(String::as_str),
        Some("300 g")
    );
}

#[tokio::test]
async fn fenced_response_still_normalizes() {
    let recipe = run(
        "```json\n{\"title\": \"Green Shakshuka\", \"description\": \"d\", \
         \"ingredients\": {\"list\": {\"eggs\": \"4\"}}, \"instructions\": [\"Cook.\"]}\n```",
    )
    .await;

    // Mapping nested under a single foreign key, default servings.
    assert_eq!(recipe.servings, DEFAULT_SERVINGS);
    assert_eq!(recipe.ingredients.get("eggs").map(String::as_str), Some("4"));
}

#[tokio::test]
async fn constraint_tags_are_synthesized_not_copied() {
    let ai = FakeAiClient::with_response(
        "detailed recipe",
        r#"{
            "title": "Green Shakshuka",
            "description": "d",
            "tags": ["provider-tag-that-must-not-leak"],
            "ingredients": {"servings": 2, "items": {"eggs": "4"}},
            "instructions": ["Cook."]
        }"#,
    );

    let opts = GenerateOptions {
        vegetarian: true,
        seasonal: true,
        difficulty: Difficulty::parse("easy"),
        allergies: Some("tree nuts".to_string()),
        ..options()
    };
    let raw = generate_recipe(&ai, "Green Shakshuka", &opts).await.unwrap();
    let recipe = normalize_recipe(&raw, &opts.tag_hints(49.5, NaiveDate::from_ymd_opt(2026, 7, 15).unwrap()));

    assert_eq!(
        recipe.tags,
        vec!["AI-generated", "vegetarian", "summer", "easy", "allergy-aware"]
    );
}
