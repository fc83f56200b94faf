//! Prompt templates for the generation, digitization, and assistant paths.

use crate::normalize::Difficulty;

/// System prompt for dish idea generation.
pub const DISH_IDEAS_SYSTEM: &str = r#"You are an expert chef specializing in creative cuisine. Your task is to suggest dish ideas based on available ingredients.

Always respond in this exact JSON format:
{
  "dish_ideas": ["Dish title 1", "Dish title 2", ...]
}

Key guidelines:
- When told to use only specific ingredients, restrict to those plus common staples (oil, salt, pasta, rice, onions, garlic, etc.)
- When allowed to add ingredients, focus on complementing the provided ones while keeping the original ingredients central
- Ensure all dishes are practical and realistically cookable
- Provide diverse suggestions across different cuisines and cooking methods
- Keep titles clear and appetizing
- Use standard recipe naming conventions

The titles should be specific enough to understand the main components but concise enough to be readable."#;

/// System prompt for full recipe generation. The JSON contract promised here
/// is what the normalizer repairs when providers drift from it.
pub const CREATE_RECIPE_SYSTEM: &str = r#"You are an experienced chef and recipe writer. Your task is to create detailed, practical recipes that are easy to follow.

Always respond in this exact JSON format:
{
  "title": "Recipe title",
  "description": "Brief description of the dish and its key features",
  "notes": ["Helpful tips", "Serving suggestions", "Storage advice"],
  "ingredients": {
    "servings": 4,
    "items": {
      "ingredient name": "precise quantity and any preparation notes"
    }
  },
  "instructions": [
    "Clear step-by-step instructions",
    "Each step as a complete sentence"
  ]
}

Key guidelines:
- Write clear, precise instructions in a step-by-step format
- Include exact measurements and quantities
- Add helpful notes about preparation, storage, or variations
- Ensure ingredients list matches the instructions exactly
- Keep the recipe practical and achievable for home cooks
- Include tips for best results and common pitfalls to avoid

Each instruction should be a complete, actionable sentence."#;

/// System prompt for turning OCR-extracted text into the recipe JSON shape.
pub const OCR_EXTRACT_SYSTEM: &str = r#"You are a recipe digitization assistant. You receive raw text extracted from a photographed or scanned recipe (it may contain OCR noise, layout artifacts, or broken lines) and reconstruct the recipe it describes.

Always respond in this exact JSON format:
{
  "title": "Recipe title",
  "description": "Brief description of the dish",
  "notes": ["Any tips or remarks found in the text"],
  "ingredients": {
    "servings": 4,
    "items": {
      "ingredient name": "quantity and preparation notes"
    }
  },
  "instructions": [
    "One step per entry, in the order they appear"
  ]
}

Key guidelines:
- Preserve the quantities and wording of the source as closely as possible
- Repair obvious OCR mistakes (broken words, misread characters)
- Do not invent ingredients or steps that are not in the text
- If the servings count is not stated, omit it rather than guessing"#;

/// System prompt for the cooking assistant chat.
pub fn render_assistant_system(language_name: &str) -> String {
    format!(
        r#"You are a helpful cooking assistant. You help users with:
- Recipe suggestions and recommendations
- Cooking techniques and tips
- Ingredient substitutions
- Meal planning

IMPORTANT: Always respond in {language_name}. The user prefers to communicate in {language_name}."#
    )
}

/// Constraint clauses shared by the ideas and recipe user messages.
fn push_constraints(
    out: &mut String,
    use_only: bool,
    vegetarian: bool,
    vegan: bool,
    seasonal: bool,
    allergies: Option<&str>,
    difficulty: Option<Difficulty>,
    location: Option<&str>,
) {
    if use_only {
        out.push_str("Use ONLY these ingredients plus basic kitchen staples (salt, oil, etc). ");
    } else {
        out.push_str("You can suggest additional complementary ingredients. ");
    }

    if vegan {
        out.push_str("The recipe must be fully vegan. ");
    } else if vegetarian {
        out.push_str("The recipe must be vegetarian. ");
    }

    if seasonal {
        match location {
            Some(loc) => out.push_str(&format!(
                "Prefer ingredients that are currently in season near {}. ",
                loc
            )),
            None => out.push_str("Prefer ingredients that are currently in season. "),
        }
    }

    if let Some(allergies) = allergies.filter(|a| !a.trim().is_empty()) {
        out.push_str(&format!(
            "Strictly exclude anything containing: {}. ",
            allergies.trim()
        ));
    }

    if let Some(difficulty) = difficulty {
        out.push_str(&format!(
            "The preparation should be of {} difficulty. ",
            difficulty.as_str()
        ));
    }
}

/// Render the user message for dish idea generation.
#[allow(clippy::too_many_arguments)]
pub fn render_ideas_prompt(
    num_ideas: usize,
    ingredients: &[String],
    description: &str,
    use_only: bool,
    vegetarian: bool,
    vegan: bool,
    seasonal: bool,
    allergies: Option<&str>,
    difficulty: Option<Difficulty>,
    location: Option<&str>,
) -> String {
    let mut out = if ingredients.is_empty() {
        format!(
            "Create {} recipe ideas matching this description: {}. ",
            num_ideas, description
        )
    } else {
        format!(
            "Create {} recipe ideas using these ingredients: {}. ",
            num_ideas,
            ingredients.join(", ")
        )
    };
    push_constraints(
        &mut out, use_only, vegetarian, vegan, seasonal, allergies, difficulty, location,
    );
    out
}

/// Render the user message for full recipe generation.
#[allow(clippy::too_many_arguments)]
pub fn render_recipe_prompt(
    title: &str,
    ingredients: &[String],
    description: &str,
    use_only: bool,
    vegetarian: bool,
    vegan: bool,
    seasonal: bool,
    allergies: Option<&str>,
    difficulty: Option<Difficulty>,
    location: Option<&str>,
) -> String {
    let mut out = if ingredients.is_empty() {
        format!(
            "Create a detailed recipe for '{}' matching this description: {}. ",
            title, description
        )
    } else {
        format!(
            "Create a detailed recipe for '{}' using these ingredients: {}. ",
            title,
            ingredients.join(", ")
        )
    };
    push_constraints(
        &mut out, use_only, vegetarian, vegan, seasonal, allergies, difficulty, location,
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideas_prompt_carries_constraints() {
        let prompt = render_ideas_prompt(
            5,
            &["chickpeas".to_string(), "spinach".to_string()],
            "",
            true,
            false,
            true,
            true,
            Some("peanuts"),
            Difficulty::parse("easy"),
            Some("Freiburg (Germany)"),
        );
        assert!(prompt.contains("5 recipe ideas"));
        assert!(prompt.contains("chickpeas, spinach"));
        assert!(prompt.contains("ONLY these ingredients"));
        assert!(prompt.contains("fully vegan"));
        assert!(prompt.contains("in season near Freiburg"));
        assert!(prompt.contains("peanuts"));
        assert!(prompt.contains("easy difficulty"));
    }

    #[test]
    fn description_mode_uses_description() {
        let prompt = render_recipe_prompt(
            "Comfort Stew",
            &[],
            "something warming for winter evenings",
            false,
            false,
            false,
            false,
            None,
            None,
            None,
        );
        assert!(prompt.contains("Comfort Stew"));
        assert!(prompt.contains("warming for winter evenings"));
        assert!(prompt.contains("complementary ingredients"));
    }
}
