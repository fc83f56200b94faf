//! Canonical recipe shape and the serialized-text codecs for its structured
//! fields.
//!
//! Every creation path (direct entry, AI generation, OCR digitization) must
//! converge on [`RecipeContent`] before persistence. The structured fields are
//! stored as JSON text; encode/decode happens only at the persistence
//! boundary, through exactly one routine per field type, so the round-trip
//! law holds everywhere.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ingredient name -> quantity/description. Keys are unique; insertion order
/// is preserved for display.
pub type IngredientMap = IndexMap<String, String>;

/// Servings used whenever a creation path does not supply a usable value.
pub const DEFAULT_SERVINGS: i32 = 6;

fn default_servings() -> i32 {
    DEFAULT_SERVINGS
}

/// The canonical recipe shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeContent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_servings")]
    pub servings: i32,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub ingredients: IngredientMap,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RecipeContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            servings: DEFAULT_SERVINGS,
            ingredients: IngredientMap::new(),
            instructions: Vec::new(),
            notes: Vec::new(),
            tags: Vec::new(),
        }
    }
}

/// Decode a stored ingredients column into the ordered mapping.
///
/// An absent or empty column yields the empty mapping; so does malformed
/// stored text (stored values are written by [`encode_ingredients`] and are
/// always valid, but decoding must never fail).
pub fn decode_ingredients(stored: Option<&str>) -> IngredientMap {
    match stored {
        Some(s) if !s.is_empty() => serde_json::from_str(s).unwrap_or_default(),
        _ => IngredientMap::new(),
    }
}

pub fn encode_ingredients(ingredients: &IngredientMap) -> String {
    serde_json::to_string(ingredients).unwrap_or_else(|_| "{}".to_string())
}

/// Decode a stored string-sequence column (instructions, notes, tags).
pub fn decode_steps(stored: Option<&str>) -> Vec<String> {
    match stored {
        Some(s) if !s.is_empty() => serde_json::from_str(s).unwrap_or_default(),
        _ => Vec::new(),
    }
}

pub fn encode_steps(steps: &[String]) -> String {
    serde_json::to_string(steps).unwrap_or_else(|_| "[]".to_string())
}

/// Encode a sequence that is stored as NULL when empty (notes, tags).
pub fn encode_optional_steps(steps: &[String]) -> Option<String> {
    if steps.is_empty() {
        None
    } else {
        Some(encode_steps(steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ingredients() -> IngredientMap {
        let mut map = IngredientMap::new();
        map.insert("flour".to_string(), "2 cups".to_string());
        map.insert("eggs".to_string(), "3 large".to_string());
        map.insert("milk".to_string(), "250 ml".to_string());
        map
    }

    #[test]
    fn ingredients_round_trip_preserves_order() {
        let original = sample_ingredients();
        let encoded = encode_ingredients(&original);
        let decoded = decode_ingredients(Some(&encoded));
        assert_eq!(decoded, original);
        let keys: Vec<&String> = decoded.keys().collect();
        assert_eq!(keys, vec!["flour", "eggs", "milk"]);
    }

    #[test]
    fn steps_round_trip() {
        let steps = vec!["Preheat oven.".to_string(), "Mix batter.".to_string()];
        let encoded = encode_steps(&steps);
        assert_eq!(decode_steps(Some(&encoded)), steps);
    }

    #[test]
    fn absent_fields_decode_to_empty() {
        assert!(decode_ingredients(None).is_empty());
        assert!(decode_ingredients(Some("")).is_empty());
        assert!(decode_steps(None).is_empty());
        assert!(decode_steps(Some("")).is_empty());
    }

    #[test]
    fn empty_containers_round_trip() {
        let encoded = encode_ingredients(&IngredientMap::new());
        assert!(decode_ingredients(Some(&encoded)).is_empty());
        let encoded = encode_steps(&[]);
        assert!(decode_steps(Some(&encoded)).is_empty());
    }

    #[test]
    fn empty_optional_sequence_stores_null() {
        assert_eq!(encode_optional_steps(&[]), None);
        let notes = vec!["Keeps for a week.".to_string()];
        assert_eq!(
            encode_optional_steps(&notes).as_deref(),
            Some(r#"["Keeps for a week."]"#)
        );
    }

    #[test]
    fn malformed_stored_text_degrades_to_empty() {
        assert!(decode_ingredients(Some("not json")).is_empty());
        assert!(decode_steps(Some("{\"wrong\": \"shape\"}")).is_empty());
    }
}
