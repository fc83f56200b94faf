//! Cookbook document assembly.
//!
//! The PDF library is an external collaborator behind [`DocumentRenderer`];
//! core owns the document plan: a title page followed by one section per
//! recipe with description, ingredients, instructions, and notes.

use crate::recipe::RecipeContent;

/// One recipe's section of the cookbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSection {
    pub title: String,
    pub description: String,
    pub servings_line: String,
    /// "name — quantity" lines, in display order.
    pub ingredient_lines: Vec<String>,
    /// "1. step" lines, numbered in order.
    pub instruction_lines: Vec<String>,
    pub notes: Vec<String>,
    /// Filename of an attached image, if any.
    pub image: Option<String>,
}

/// The full document plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookbookOutline {
    pub title: String,
    pub recipe_count: usize,
    pub sections: Vec<RecipeSection>,
}

/// Build the document plan for a set of recipes with optional images.
pub fn cookbook_outline(title: &str, recipes: &[(RecipeContent, Option<String>)]) -> CookbookOutline {
    let sections = recipes
        .iter()
        .map(|(recipe, image)| RecipeSection {
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            servings_line: format!("Serves {}", recipe.servings),
            ingredient_lines: recipe
                .ingredients
                .iter()
                .map(|(name, quantity)| format!("{} — {}", name, quantity))
                .collect(),
            instruction_lines: recipe
                .instructions
                .iter()
                .enumerate()
                .map(|(i, step)| format!("{}. {}", i + 1, step))
                .collect(),
            notes: recipe.notes.clone(),
            image: image.clone(),
        })
        .collect();

    CookbookOutline {
        title: title.to_string(),
        recipe_count: recipes.len(),
        sections,
    }
}

/// External document rendering boundary.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, outline: &CookbookOutline) -> Vec<u8>;

    /// MIME type of the rendered output.
    fn content_type(&self) -> &'static str;

    /// File extension for downloads.
    fn file_extension(&self) -> &'static str;
}

/// Degenerate renderer producing a readable plain-text cookbook. Used in
/// tests and as the default when no PDF backend is wired up.
pub struct PlainTextRenderer;

impl DocumentRenderer for PlainTextRenderer {
    fn render(&self, outline: &CookbookOutline) -> Vec<u8> {
        let mut out = String::new();
        out.push_str(&outline.title);
        out.push('\n');
        out.push_str(&format!("{} recipes\n\n", outline.recipe_count));

        for section in &outline.sections {
            out.push_str(&format!("== {} ==\n", section.title));
            if !section.description.is_empty() {
                out.push_str(&section.description);
                out.push('\n');
            }
            out.push_str(&section.servings_line);
            out.push('\n');
            for line in &section.ingredient_lines {
                out.push_str(&format!("- {}\n", line));
            }
            for line in &section.instruction_lines {
                out.push_str(line);
                out.push('\n');
            }
            for note in &section.notes {
                out.push_str(&format!("Note: {}\n", note));
            }
            out.push('\n');
        }

        out.into_bytes()
    }

    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> RecipeContent {
        let mut r = RecipeContent::new("Focaccia");
        r.description = "Olive oil bread".to_string();
        r.servings = 8;
        r.ingredients
            .insert("flour".to_string(), "500 g".to_string());
        r.ingredients
            .insert("olive oil".to_string(), "60 ml".to_string());
        r.instructions = vec!["Mix the dough.".to_string(), "Bake at 220C.".to_string()];
        r.notes = vec!["Dimple generously.".to_string()];
        r
    }

    #[test]
    fn outline_has_one_section_per_recipe() {
        let outline = cookbook_outline(
            "My Cookbook",
            &[(recipe(), Some("focaccia.jpg".to_string())), (recipe(), None)],
        );
        assert_eq!(outline.recipe_count, 2);
        assert_eq!(outline.sections.len(), 2);
        assert_eq!(outline.sections[0].image.as_deref(), Some("focaccia.jpg"));
        assert_eq!(outline.sections[1].image, None);
    }

    #[test]
    fn sections_format_ingredients_and_number_steps() {
        let outline = cookbook_outline("Book", &[(recipe(), None)]);
        let section = &outline.sections[0];
        assert_eq!(section.servings_line, "Serves 8");
        assert_eq!(section.ingredient_lines[0], "flour — 500 g");
        assert_eq!(section.instruction_lines[1], "2. Bake at 220C.");
    }

    #[test]
    fn plain_text_renderer_outputs_every_section() {
        let outline = cookbook_outline("Book", &[(recipe(), None)]);
        let bytes = PlainTextRenderer.render(&outline);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("== Focaccia =="));
        assert!(text.contains("- olive oil — 60 ml"));
        assert!(text.contains("Note: Dimple generously."));
    }
}
