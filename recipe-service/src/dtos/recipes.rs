use crate::error::RecipeError;
use crate::models::Recipe;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/recipes`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    #[validate(
        required(message = "recipeName is required"),
        length(min = 1, message = "recipeName cannot be empty")
    )]
    pub recipe_name: Option<String>,
    pub notes: Option<String>,
    pub resources: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_bool::deserialize")]
    pub favorite: Option<bool>,
    #[serde(default, deserialize_with = "super::lenient_date::deserialize")]
    pub date_created: Option<DateTime<Utc>>,
    pub photo: Option<String>,
}

impl CreateRecipeRequest {
    /// Validates the payload and builds the recipe to insert.
    pub fn into_recipe(self) -> Result<Recipe, RecipeError> {
        self.validate()?;

        let recipe_name = self
            .recipe_name
            .ok_or_else(|| RecipeError::InvalidBody("recipeName is required".to_string()))?;

        let mut recipe = Recipe::new(recipe_name);
        recipe.notes = self.notes;
        recipe.resources = self.resources;
        recipe.favorite = self.favorite;
        recipe.photo = self.photo;
        if let Some(date_created) = self.date_created {
            recipe.date_created = date_created.trunc_subsecs(3);
        }

        Ok(recipe)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub recipe_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    pub date_created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.to_hex(),
            recipe_name: recipe.recipe_name,
            notes: recipe.notes,
            resources: recipe.resources,
            favorite: recipe.favorite,
            date_created: recipe.date_created.to_rfc3339(),
            photo: recipe.photo,
        }
    }
}
