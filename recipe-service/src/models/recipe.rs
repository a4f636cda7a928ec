use crate::error::RecipeError;
use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored recipe. Field names on disk match the JSON wire names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub recipe_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Recipe {
    pub fn new(recipe_name: String) -> Self {
        Self {
            id: ObjectId::new(),
            recipe_name,
            notes: None,
            resources: None,
            favorite: None,
            // BSON dates carry milliseconds; truncate so every backend
            // reports the same value.
            date_created: Utc::now().trunc_subsecs(3),
            photo: None,
        }
    }
}

/// Partial update: only the fields present in the payload change. The id
/// and `dateCreated` are not part of the patch and so can never change.
#[derive(Debug, Clone, Default, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    #[validate(length(min = 1, message = "recipeName cannot be empty"))]
    pub recipe_name: Option<String>,
    pub notes: Option<String>,
    pub resources: Option<String>,
    #[serde(default, deserialize_with = "crate::dtos::lenient_bool::deserialize")]
    pub favorite: Option<bool>,
    pub photo: Option<String>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self.recipe_name.is_none()
            && self.notes.is_none()
            && self.resources.is_none()
            && self.favorite.is_none()
            && self.photo.is_none()
    }

    /// Merges the present fields into `recipe`.
    pub fn apply(&self, recipe: &mut Recipe) {
        if let Some(recipe_name) = &self.recipe_name {
            recipe.recipe_name = recipe_name.clone();
        }
        if let Some(notes) = &self.notes {
            recipe.notes = Some(notes.clone());
        }
        if let Some(resources) = &self.resources {
            recipe.resources = Some(resources.clone());
        }
        if let Some(favorite) = self.favorite {
            recipe.favorite = Some(favorite);
        }
        if let Some(photo) = &self.photo {
            recipe.photo = Some(photo.clone());
        }
    }

    /// The `$set` body equivalent to [`RecipePatch::apply`].
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(recipe_name) = &self.recipe_name {
            set.insert("recipeName", recipe_name.as_str());
        }
        if let Some(notes) = &self.notes {
            set.insert("notes", notes.as_str());
        }
        if let Some(resources) = &self.resources {
            set.insert("resources", resources.as_str());
        }
        if let Some(favorite) = self.favorite {
            set.insert("favorite", favorite);
        }
        if let Some(photo) = &self.photo {
            set.insert("photo", photo.as_str());
        }
        set
    }
}

/// Parses a path segment as a store identifier.
pub fn parse_recipe_id(raw: &str) -> Result<ObjectId, RecipeError> {
    ObjectId::parse_str(raw).map_err(|_| RecipeError::MalformedIdentifier(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn sample() -> Recipe {
        Recipe {
            notes: Some("mix well".to_string()),
            resources: Some("https://example.com/tacos".to_string()),
            favorite: Some(false),
            photo: Some("https://example.com/tacos.jpg".to_string()),
            ..Recipe::new("tacos".to_string())
        }
    }

    #[test]
    fn apply_changes_only_present_fields() {
        let mut recipe = sample();
        let before = recipe.clone();

        let patch = RecipePatch {
            recipe_name: Some("breakfast tacos".to_string()),
            notes: Some("add avocado and hot sauce".to_string()),
            favorite: Some(true),
            ..Default::default()
        };
        patch.apply(&mut recipe);

        assert_eq!(recipe.recipe_name, "breakfast tacos");
        assert_eq!(recipe.notes.as_deref(), Some("add avocado and hot sauce"));
        assert_eq!(recipe.favorite, Some(true));
        assert_eq!(recipe.resources, before.resources);
        assert_eq!(recipe.photo, before.photo);
        assert_eq!(recipe.id, before.id);
        assert_eq!(recipe.date_created, before.date_created);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut recipe = sample();
        let before = recipe.clone();

        let patch = RecipePatch::default();
        assert!(patch.is_empty());
        patch.apply(&mut recipe);

        assert_eq!(recipe, before);
        assert!(patch.to_set_document().is_empty());
    }

    #[test]
    fn set_document_uses_wire_names() {
        let patch = RecipePatch {
            recipe_name: Some("soup".to_string()),
            favorite: Some(true),
            ..Default::default()
        };

        assert_eq!(
            patch.to_set_document(),
            doc! { "recipeName": "soup", "favorite": true }
        );
    }

    #[test]
    fn patch_rejects_empty_name() {
        let patch = RecipePatch {
            recipe_name: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        assert!(RecipePatch::default().validate().is_ok());
    }

    #[test]
    fn patch_ignores_immutable_fields() {
        let patch: RecipePatch = serde_json::from_value(serde_json::json!({
            "_id": "507f1f77bcf86cd799439011",
            "dateCreated": "2020-01-01T00:00:00Z",
            "notes": "new notes"
        }))
        .unwrap();

        assert_eq!(patch.notes.as_deref(), Some("new notes"));
        assert_eq!(patch.to_set_document(), doc! { "notes": "new notes" });
    }

    #[test]
    fn parses_well_formed_ids_only() {
        let id = ObjectId::new();
        assert_eq!(parse_recipe_id(&id.to_hex()).unwrap(), id);

        assert!(matches!(
            parse_recipe_id("12345"),
            Err(RecipeError::MalformedIdentifier(_))
        ));
        assert!(parse_recipe_id(&format!("{}wrongId", id.to_hex())).is_err());
    }

    #[test]
    fn new_recipe_dates_are_millisecond_precision() {
        let recipe = Recipe::new("bread".to_string());
        assert_eq!(recipe.date_created.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
