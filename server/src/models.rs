use chrono::{DateTime, Utc};
use diesel::prelude::*;
use skillet_core::{
    decode_ingredients, decode_steps, encode_ingredients, encode_optional_steps, encode_steps,
    RecipeContent,
};
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

/// A recipe row. The structured fields (ingredients, instructions, notes,
/// tags) are stored as JSON text and decoded through [`Recipe::content`].
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub servings: i32,
    pub ingredients: String,
    pub instructions: String,
    pub notes: Option<String>,
    pub tags: Option<String>,
    pub image_filename: Option<String>,
    pub is_public: bool,
    pub original_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Decode the stored row into the canonical in-memory shape. Absent or
    /// malformed stored text decodes to empty collections.
    pub fn content(&self) -> RecipeContent {
        RecipeContent {
            title: self.title.clone(),
            description: self.description.clone(),
            servings: self.servings,
            ingredients: decode_ingredients(Some(&self.ingredients)),
            instructions: decode_steps(Some(&self.instructions)),
            notes: decode_steps(self.notes.as_deref()),
            tags: decode_steps(self.tags.as_deref()),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe {
    pub user_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub servings: i32,
    pub ingredients: String,
    pub instructions: String,
    pub notes: Option<String>,
    pub tags: Option<String>,
    pub image_filename: Option<String>,
    pub is_public: bool,
    pub original_id: Option<Uuid>,
}

impl NewRecipe {
    /// Encode canonical content into a new row for `user_id`. The lineage
    /// column is left unset here; creation stamps it inside the insert
    /// transaction, and copying supplies the source's value.
    pub fn from_content(user_id: Uuid, content: &RecipeContent, is_public: bool) -> Self {
        NewRecipe {
            user_id: Some(user_id),
            title: content.title.clone(),
            description: content.description.clone(),
            servings: content.servings,
            ingredients: encode_ingredients(&content.ingredients),
            instructions: encode_steps(&content.instructions),
            notes: encode_optional_steps(&content.notes),
            tags: encode_optional_steps(&content.tags),
            image_filename: None,
            is_public,
            original_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_decodes_to_the_content_it_was_encoded_from() {
        let mut content = RecipeContent::new("Pan con Tomate");
        content.description = "Bread, tomato, oil, salt.".to_string();
        content.servings = 2;
        content
            .ingredients
            .insert("bread".to_string(), "4 slices".to_string());
        content
            .ingredients
            .insert("tomato".to_string(), "2, ripe".to_string());
        content.instructions = vec!["Toast.".to_string(), "Rub.".to_string()];
        content.tags = vec!["snack".to_string()];

        let user_id = Uuid::new_v4();
        let new = NewRecipe::from_content(user_id, &content, false);
        let row = Recipe {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            title: new.title,
            description: new.description,
            servings: new.servings,
            ingredients: new.ingredients,
            instructions: new.instructions,
            notes: new.notes,
            tags: new.tags,
            image_filename: None,
            is_public: false,
            original_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(row.content(), content);
    }

    #[test]
    fn empty_notes_and_tags_are_stored_as_null() {
        let content = RecipeContent::new("Plain");
        let new = NewRecipe::from_content(Uuid::new_v4(), &content, false);
        assert_eq!(new.notes, None);
        assert_eq!(new.tags, None);
    }
}
