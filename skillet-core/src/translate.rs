//! Recipe translation assembly.
//!
//! The translation backend is an external collaborator behind [`Translator`].
//! This module owns the interesting part: flattening the canonical recipe
//! into translatable strings, batching them under a per-call character
//! budget, and reassembling the same structure from the translations. Tags
//! and servings are never translated.

use async_trait::async_trait;
use thiserror::Error;

use crate::recipe::{IngredientMap, RecipeContent};

/// Character budget per translation call (providers cap request size).
const MAX_BATCH_CHARS: usize = 4500;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Translation failed: {0}")]
    Provider(String),

    #[error("Translation provider not configured")]
    NotConfigured,

    #[error("Provider returned {got} translations for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },
}

/// External translation service boundary. Implementations must return one
/// translation per input, in order.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
    ) -> Result<Vec<String>, TranslateError>;
}

/// Translator used when no backend is configured.
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate_batch(
        &self,
        _texts: &[String],
        _target_lang: &str,
    ) -> Result<Vec<String>, TranslateError> {
        Err(TranslateError::NotConfigured)
    }
}

/// Where each flattened string goes back into the recipe.
enum Slot {
    Title,
    Description,
    Note(usize),
    IngredientKey(usize),
    IngredientValue(usize),
    Instruction(usize),
}

/// Translate every human-readable string of a recipe to `target_lang`.
///
/// Tags and servings are carried over untouched.
pub async fn translate_recipe(
    translator: &dyn Translator,
    recipe: &RecipeContent,
    target_lang: &str,
) -> Result<RecipeContent, TranslateError> {
    let mut texts: Vec<String> = Vec::new();
    let mut slots: Vec<Slot> = Vec::new();

    if !recipe.title.is_empty() {
        texts.push(recipe.title.clone());
        slots.push(Slot::Title);
    }
    if !recipe.description.is_empty() {
        texts.push(recipe.description.clone());
        slots.push(Slot::Description);
    }
    for (idx, note) in recipe.notes.iter().enumerate() {
        texts.push(note.clone());
        slots.push(Slot::Note(idx));
    }
    for (idx, (key, value)) in recipe.ingredients.iter().enumerate() {
        texts.push(key.clone());
        slots.push(Slot::IngredientKey(idx));
        texts.push(value.clone());
        slots.push(Slot::IngredientValue(idx));
    }
    for (idx, step) in recipe.instructions.iter().enumerate() {
        texts.push(step.clone());
        slots.push(Slot::Instruction(idx));
    }

    if texts.is_empty() {
        return Ok(recipe.clone());
    }

    // Translate in order, keeping each call under the character budget.
    let mut translations: Vec<String> = Vec::with_capacity(texts.len());
    let mut start = 0;
    while start < texts.len() {
        let mut end = start;
        let mut chars = 0;
        while end < texts.len() {
            let len = texts[end].len() + 1;
            if chars + len > MAX_BATCH_CHARS && end > start {
                break;
            }
            chars += len;
            end += 1;
        }

        let batch = &texts[start..end];
        let translated = translator.translate_batch(batch, target_lang).await?;
        if translated.len() != batch.len() {
            return Err(TranslateError::CountMismatch {
                expected: batch.len(),
                got: translated.len(),
            });
        }
        translations.extend(translated);
        start = end;
    }

    // Reassemble the canonical shape.
    let mut out = RecipeContent::new(recipe.title.clone());
    out.servings = recipe.servings;
    out.tags = recipe.tags.clone();
    out.notes = recipe.notes.clone();
    out.instructions = recipe.instructions.clone();

    let original_entries: Vec<(&String, &String)> = recipe.ingredients.iter().collect();
    let mut keys: Vec<String> = original_entries.iter().map(|(k, _)| (*k).clone()).collect();
    let mut values: Vec<String> = original_entries.iter().map(|(_, v)| (*v).clone()).collect();
    out.description = recipe.description.clone();

    for (slot, translated) in slots.into_iter().zip(translations) {
        match slot {
            Slot::Title => out.title = translated,
            Slot::Description => out.description = translated,
            Slot::Note(idx) => out.notes[idx] = translated,
            Slot::IngredientKey(idx) => keys[idx] = translated,
            Slot::IngredientValue(idx) => values[idx] = translated,
            Slot::Instruction(idx) => out.instructions[idx] = translated,
        }
    }

    let mut ingredients = IngredientMap::new();
    for (key, value) in keys.into_iter().zip(values) {
        ingredients.insert(key, value);
    }
    out.ingredients = ingredients;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Uppercases everything, so translated strings are easy to spot.
    struct ShoutingTranslator;

    #[async_trait]
    impl Translator for ShoutingTranslator {
        async fn translate_batch(
            &self,
            texts: &[String],
            _target_lang: &str,
        ) -> Result<Vec<String>, TranslateError> {
            Ok(texts.iter().map(|t| t.to_uppercase()).collect())
        }
    }

    fn recipe() -> RecipeContent {
        let mut r = RecipeContent::new("Lentil Soup");
        r.description = "Hearty and cheap".to_string();
        r.servings = 4;
        r.ingredients
            .insert("lentils".to_string(), "250 g, rinsed".to_string());
        r.ingredients
            .insert("carrot".to_string(), "1, diced".to_string());
        r.instructions = vec!["Sweat the carrot.".to_string(), "Add lentils.".to_string()];
        r.notes = vec!["Better the next day.".to_string()];
        r.tags = vec!["vegan".to_string(), "soup".to_string()];
        r
    }

    #[tokio::test]
    async fn everything_translated_except_tags_and_servings() {
        let translated = translate_recipe(&ShoutingTranslator, &recipe(), "es")
            .await
            .unwrap();

        assert_eq!(translated.title, "LENTIL SOUP");
        assert_eq!(translated.description, "HEARTY AND CHEAP");
        assert_eq!(translated.instructions[1], "ADD LENTILS.");
        assert_eq!(translated.notes[0], "BETTER THE NEXT DAY.");
        assert_eq!(
            translated.ingredients.get("LENTILS").map(String::as_str),
            Some("250 G, RINSED")
        );
        // Untouched:
        assert_eq!(translated.servings, 4);
        assert_eq!(translated.tags, vec!["vegan", "soup"]);
    }

    #[tokio::test]
    async fn ingredient_order_survives_translation() {
        let translated = translate_recipe(&ShoutingTranslator, &recipe(), "de")
            .await
            .unwrap();
        let keys: Vec<&String> = translated.ingredients.keys().collect();
        assert_eq!(keys, vec!["LENTILS", "CARROT"]);
    }

    #[tokio::test]
    async fn empty_recipe_is_returned_as_is() {
        let mut empty = RecipeContent::new("");
        empty.tags = vec!["kept".to_string()];
        let translated = translate_recipe(&ShoutingTranslator, &empty, "fr")
            .await
            .unwrap();
        assert_eq!(translated, empty);
    }

    #[tokio::test]
    async fn long_recipes_are_split_into_batches() {
        struct CountingTranslator(std::sync::atomic::AtomicUsize);

        #[async_trait]
        impl Translator for CountingTranslator {
            async fn translate_batch(
                &self,
                texts: &[String],
                _target_lang: &str,
            ) -> Result<Vec<String>, TranslateError> {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Ok(texts.to_vec())
            }
        }

        let mut big = RecipeContent::new("Epic");
        big.instructions = (0..20).map(|i| format!("Step {} {}", i, "x".repeat(400))).collect();

        let translator = CountingTranslator(std::sync::atomic::AtomicUsize::new(0));
        translate_recipe(&translator, &big, "es").await.unwrap();
        assert!(translator.0.load(std::sync::atomic::Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn count_mismatch_is_an_error() {
        struct DroppingTranslator;

        #[async_trait]
        impl Translator for DroppingTranslator {
            async fn translate_batch(
                &self,
                _texts: &[String],
                _target_lang: &str,
            ) -> Result<Vec<String>, TranslateError> {
                Ok(vec![])
            }
        }

        let err = translate_recipe(&DroppingTranslator, &recipe(), "es")
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::CountMismatch { .. }));
    }
}
