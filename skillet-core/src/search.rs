//! Search predicates over decoded recipe content.
//!
//! Both operations run as a full scan of the scoped collection: results must
//! reflect live decoded structured-field content, not indexed scalar columns,
//! so the caller loads the rows and applies these predicates.

use crate::recipe::RecipeContent;

/// Exact, case-sensitive tag containment.
pub fn has_tag(recipe: &RecipeContent, tag: &str) -> bool {
    recipe.tags.iter().any(|t| t == tag)
}

/// Case-insensitive substring match against every textual attribute,
/// short-circuiting at the first hit: title, description, tags, notes,
/// ingredient keys and values, instruction steps.
pub fn matches_text(recipe: &RecipeContent, query: &str) -> bool {
    let needle = query.to_lowercase();

    if recipe.title.to_lowercase().contains(&needle)
        || recipe.description.to_lowercase().contains(&needle)
    {
        return true;
    }

    if recipe
        .tags
        .iter()
        .chain(recipe.notes.iter())
        .any(|s| s.to_lowercase().contains(&needle))
    {
        return true;
    }

    if recipe
        .ingredients
        .iter()
        .any(|(k, v)| k.to_lowercase().contains(&needle) || v.to_lowercase().contains(&needle))
    {
        return true;
    }

    recipe
        .instructions
        .iter()
        .any(|s| s.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> RecipeContent {
        let mut r = RecipeContent::new("Shakshuka");
        r.description = "Poached eggs in tomato sauce".to_string();
        r.ingredients
            .insert("Eggs".to_string(), "4 large".to_string());
        r.ingredients
            .insert("tomatoes".to_string(), "1 can, crushed".to_string());
        r.instructions = vec!["Simmer the sauce.".to_string(), "Crack in the eggs.".to_string()];
        r.notes = vec!["Serve with bread.".to_string()];
        r.tags = vec!["vegetarian".to_string(), "breakfast".to_string()];
        r
    }

    #[test]
    fn tag_match_is_exact_and_case_sensitive() {
        let r = recipe();
        assert!(has_tag(&r, "vegetarian"));
        assert!(!has_tag(&r, "Vegetarian"));
        assert!(!has_tag(&r, "veget"));
    }

    #[test]
    fn text_match_is_case_insensitive_across_fields() {
        let r = recipe();
        assert!(matches_text(&r, "shak")); // title
        assert!(matches_text(&r, "TOMATO")); // description
        assert!(matches_text(&r, "bread")); // notes
        assert!(matches_text(&r, "crushed")); // ingredient value
        assert!(matches_text(&r, "simmer")); // instruction
        assert!(matches_text(&r, "breakfast")); // tag
    }

    #[test]
    fn ingredient_key_match() {
        // Only occurrence of "egg" besides instructions is the key "Eggs".
        let mut r = recipe();
        r.description.clear();
        r.instructions.clear();
        assert!(matches_text(&r, "egg"));
    }

    #[test]
    fn no_occurrence_means_no_match() {
        assert!(!matches_text(&recipe(), "chocolate"));
    }
}
