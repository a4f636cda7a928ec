pub mod database;
pub mod metrics;
pub mod store;

pub use database::MongoRecipeStore;
pub use self::metrics::{get_metrics, init_metrics, record_recipe_operation};
pub use store::{InMemoryRecipeStore, RecipeStore};
