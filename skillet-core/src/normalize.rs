//! Normalizer for AI- and OCR-produced recipe payloads.
//!
//! The generation service promises the shape documented in
//! [`crate::ai::prompts::CREATE_RECIPE_SYSTEM`], but in practice the
//! `ingredients` field arrives in several shapes: a `[servings, {..}]` pair,
//! a bare mapping, a `{servings, items}` object, or an object nested under
//! some other key. [`classify_ingredients`] inspects the runtime shape and
//! maps it deterministically to one of the enumerated cases; every
//! unrecognized shape degrades to a safe default. Normalization never fails.

use chrono::NaiveDate;
use serde_json::Value;

use crate::recipe::{IngredientMap, RecipeContent, DEFAULT_SERVINGS};
use crate::season::season_for;

/// Marker tag attached to every normalized recipe.
pub const AI_GENERATED_TAG: &str = "AI-generated";

/// Tag attached when an allergy-exclusion string was supplied upstream.
pub const ALLERGY_AWARE_TAG: &str = "allergy-aware";

/// Title used when the payload carries none.
pub const UNTITLED: &str = "Untitled Recipe";

/// Difficulty constraint passed to the generation service. Only these three
/// levels produce a tag; anything else (the UI also sends "indifferent") is
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Caller-supplied context for tag synthesis. Tags are synthesized from the
/// request constraints, never copied from the AI payload.
#[derive(Debug, Clone)]
pub struct TagHints {
    pub vegetarian: bool,
    pub vegan: bool,
    pub seasonal: bool,
    pub allergies: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Signed degrees, positive = Northern Hemisphere.
    pub latitude: f64,
    pub today: NaiveDate,
}

impl TagHints {
    pub fn new(latitude: f64, today: NaiveDate) -> Self {
        Self {
            vegetarian: false,
            vegan: false,
            seasonal: false,
            allergies: None,
            difficulty: None,
            latitude,
            today,
        }
    }
}

/// The observed shapes of the `ingredients` field, in disambiguation
/// precedence order.
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientsShape {
    /// `[servings, {name: quantity}]` — anything past index 1 is ignored.
    Pair { servings: i32, items: IngredientMap },
    /// `[{name: quantity}]` — mapping only, default servings.
    ItemsOnly(IngredientMap),
    /// `[servings]` — count only, no ingredients.
    ServingsOnly(i32),
    /// `{"servings": n, "items": {..}}`, or a mapping nested under exactly
    /// one non-`servings` key, or a bare mapping under `items`.
    Keyed { servings: i32, items: IngredientMap },
    /// Empty sequence or unrecognized type.
    Unrecognized,
}

fn as_servings(value: &Value) -> Option<i32> {
    let n = value.as_i64()?;
    if n > 0 {
        i32::try_from(n).ok()
    } else {
        None
    }
}

fn as_ingredient_map(value: &Value) -> Option<IngredientMap> {
    let obj = value.as_object()?;
    let mut map = IngredientMap::new();
    for (k, v) in obj {
        // Tolerate non-string quantities (some providers emit numbers).
        let quantity = match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        map.insert(k.clone(), quantity);
    }
    Some(map)
}

/// Disambiguate the polymorphic `ingredients` field by runtime inspection.
pub fn classify_ingredients(value: Option<&Value>) -> IngredientsShape {
    match value {
        Some(Value::Array(arr)) if arr.len() >= 2 => {
            let servings = as_servings(&arr[0]).unwrap_or(DEFAULT_SERVINGS);
            let items = as_ingredient_map(&arr[1]).unwrap_or_default();
            IngredientsShape::Pair { servings, items }
        }
        Some(Value::Array(arr)) if arr.len() == 1 => {
            if let Some(items) = as_ingredient_map(&arr[0]) {
                IngredientsShape::ItemsOnly(items)
            } else if let Some(servings) = as_servings(&arr[0]) {
                IngredientsShape::ServingsOnly(servings)
            } else {
                IngredientsShape::Unrecognized
            }
        }
        Some(Value::Object(obj)) => {
            let servings = obj
                .get("servings")
                .and_then(as_servings)
                .unwrap_or(DEFAULT_SERVINGS);

            let items = match obj.get("items").and_then(as_ingredient_map) {
                Some(items) => items,
                None => {
                    // Tolerate providers that nest the mapping under a
                    // different key: exactly one key besides `servings`.
                    let others: Vec<&Value> = obj
                        .iter()
                        .filter(|(k, _)| k.as_str() != "servings" && k.as_str() != "items")
                        .map(|(_, v)| v)
                        .collect();
                    match others.as_slice() {
                        [only] => as_ingredient_map(only).unwrap_or_default(),
                        _ => IngredientMap::new(),
                    }
                }
            };

            IngredientsShape::Keyed { servings, items }
        }
        _ => IngredientsShape::Unrecognized,
    }
}

impl IngredientsShape {
    fn into_parts(self) -> (i32, IngredientMap) {
        match self {
            IngredientsShape::Pair { servings, items }
            | IngredientsShape::Keyed { servings, items } => (servings, items),
            IngredientsShape::ItemsOnly(items) => (DEFAULT_SERVINGS, items),
            IngredientsShape::ServingsOnly(servings) => (servings, IngredientMap::new()),
            IngredientsShape::Unrecognized => (DEFAULT_SERVINGS, IngredientMap::new()),
        }
    }
}

fn string_sequence(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        // A few providers return one newline-joined blob instead of a list.
        Some(Value::String(s)) => s
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Synthesize the output tags from the request constraints.
///
/// Vegan and vegetarian are mutually exclusive; vegan takes precedence.
pub fn synthesize_tags(hints: &TagHints) -> Vec<String> {
    let mut tags = vec![AI_GENERATED_TAG.to_string()];

    if hints.vegan {
        tags.push("vegan".to_string());
    } else if hints.vegetarian {
        tags.push("vegetarian".to_string());
    }

    if hints.seasonal {
        tags.push(season_for(hints.latitude, hints.today).as_str().to_string());
    }

    if let Some(difficulty) = hints.difficulty {
        tags.push(difficulty.as_str().to_string());
    }

    if hints
        .allergies
        .as_deref()
        .is_some_and(|a| !a.trim().is_empty())
    {
        tags.push(ALLERGY_AWARE_TAG.to_string());
    }

    tags
}

/// Convert a raw AI/OCR payload into the canonical recipe shape.
///
/// Tolerant by construction: every missing or unrecognized field degrades to
/// its empty/default value.
pub fn normalize_recipe(raw: &Value, hints: &TagHints) -> RecipeContent {
    let shape = classify_ingredients(raw.get("ingredients"));
    if matches!(shape, IngredientsShape::Unrecognized) {
        tracing::debug!(
            shape = %raw.get("ingredients").map(value_kind).unwrap_or("absent"),
            "unrecognized ingredients shape, using defaults"
        );
    }
    let (servings, ingredients) = shape.into_parts();

    RecipeContent {
        title: raw
            .get("title")
            .and_then(|v| v.as_str())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(UNTITLED)
            .to_string(),
        description: raw
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string(),
        servings,
        ingredients,
        instructions: string_sequence(raw.get("instructions")),
        notes: string_sequence(raw.get("notes")),
        tags: synthesize_tags(hints),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hints() -> TagHints {
        TagHints::new(49.5, NaiveDate::from_ymd_opt(2026, 7, 15).unwrap())
    }

    #[test]
    fn pair_shape_extracts_servings_and_items() {
        let raw = json!({ "ingredients": [4, {"flour": "2 cups"}] });
        let recipe = normalize_recipe(&raw, &hints());
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.ingredients.get("flour").map(String::as_str), Some("2 cups"));
    }

    #[test]
    fn keyed_shape_extracts_servings_and_items() {
        let raw = json!({ "ingredients": {"servings": 2, "items": {"egg": "1"}} });
        let recipe = normalize_recipe(&raw, &hints());
        assert_eq!(recipe.servings, 2);
        assert_eq!(recipe.ingredients.get("egg").map(String::as_str), Some("1"));
    }

    #[test]
    fn single_other_key_falls_back_to_its_mapping() {
        let raw = json!({ "ingredients": {"stuff": {"egg": "1"}} });
        let recipe = normalize_recipe(&raw, &hints());
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
        assert_eq!(recipe.ingredients.get("egg").map(String::as_str), Some("1"));
    }

    #[test]
    fn two_extra_keys_do_not_guess() {
        let raw = json!({ "ingredients": {"a": {"egg": "1"}, "b": {"ham": "2"}} });
        let recipe = normalize_recipe(&raw, &hints());
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
    }

    #[test]
    fn singleton_list_with_mapping() {
        let raw = json!({ "ingredients": [{"butter": "1 tbsp"}] });
        let recipe = normalize_recipe(&raw, &hints());
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
        assert_eq!(recipe.ingredients.len(), 1);
    }

    #[test]
    fn singleton_list_with_integer() {
        let raw = json!({ "ingredients": [8] });
        let recipe = normalize_recipe(&raw, &hints());
        assert_eq!(recipe.servings, 8);
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn missing_ingredients_never_raises() {
        let recipe = normalize_recipe(&json!({"title": "Toast"}), &hints());
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.title, "Toast");
    }

    #[test]
    fn empty_list_and_garbage_degrade_to_defaults() {
        for raw in [
            json!({ "ingredients": [] }),
            json!({ "ingredients": "flour, eggs" }),
            json!({ "ingredients": 3.5 }),
            json!({ "ingredients": null }),
        ] {
            let recipe = normalize_recipe(&raw, &hints());
            assert_eq!(recipe.servings, DEFAULT_SERVINGS);
            assert!(recipe.ingredients.is_empty());
        }
    }

    #[test]
    fn non_positive_servings_falls_back() {
        let raw = json!({ "ingredients": [0, {"flour": "2 cups"}] });
        let recipe = normalize_recipe(&raw, &hints());
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
        assert_eq!(recipe.ingredients.len(), 1);
    }

    #[test]
    fn missing_title_gets_placeholder() {
        let recipe = normalize_recipe(&json!({}), &hints());
        assert_eq!(recipe.title, UNTITLED);
    }

    #[test]
    fn instructions_accept_list_or_blob() {
        let raw = json!({ "instructions": ["Mix.", " Bake. ", ""] });
        let recipe = normalize_recipe(&raw, &hints());
        assert_eq!(recipe.instructions, vec!["Mix.", "Bake."]);

        let raw = json!({ "instructions": "Mix.\nBake.\n" });
        let recipe = normalize_recipe(&raw, &hints());
        assert_eq!(recipe.instructions, vec!["Mix.", "Bake."]);
    }

    #[test]
    fn always_tagged_ai_generated() {
        let recipe = normalize_recipe(&json!({}), &hints());
        assert_eq!(recipe.tags, vec![AI_GENERATED_TAG]);
    }

    #[test]
    fn vegan_takes_precedence_over_vegetarian() {
        let mut h = hints();
        h.vegan = true;
        h.vegetarian = true;
        let tags = synthesize_tags(&h);
        assert!(tags.contains(&"vegan".to_string()));
        assert!(!tags.contains(&"vegetarian".to_string()));
    }

    #[test]
    fn seasonal_tag_follows_latitude() {
        let mut h = hints();
        h.seasonal = true;
        assert!(synthesize_tags(&h).contains(&"summer".to_string()));
        h.latitude = -49.5;
        assert!(synthesize_tags(&h).contains(&"winter".to_string()));
    }

    #[test]
    fn difficulty_and_allergy_tags() {
        let mut h = hints();
        h.difficulty = Difficulty::parse("medium");
        h.allergies = Some("peanuts".to_string());
        let tags = synthesize_tags(&h);
        assert!(tags.contains(&"medium".to_string()));
        assert!(tags.contains(&ALLERGY_AWARE_TAG.to_string()));

        // "indifferent" is not a difficulty level and blank allergies do not
        // count as an exclusion.
        h.difficulty = Difficulty::parse("indifferent");
        h.allergies = Some("  ".to_string());
        let tags = synthesize_tags(&h);
        assert_eq!(tags, vec![AI_GENERATED_TAG]);
    }
}
