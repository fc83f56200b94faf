pub mod ai;
pub mod normalize;
pub mod ocr;
pub mod pdf;
pub mod recipe;
pub mod search;
pub mod season;
pub mod translate;

pub use normalize::{normalize_recipe, synthesize_tags, Difficulty, TagHints};
pub use recipe::{
    decode_ingredients, decode_steps, encode_ingredients, encode_optional_steps, encode_steps,
    IngredientMap, RecipeContent, DEFAULT_SERVINGS,
};
pub use search::{has_tag, matches_text};
pub use season::{season_for, Season};
