pub mod recipe;

pub use recipe::{parse_recipe_id, Recipe, RecipePatch};
