use crate::models::{Recipe, RecipePatch};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use tokio::sync::RwLock;

/// Persistence operations behind the recipe routes. Each call is a single
/// round trip touching at most one record; atomicity is the backend's.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Inserts a new recipe and returns it as stored.
    async fn create(&self, recipe: Recipe) -> Result<Recipe, AppError>;

    /// Every recipe, in the backend's natural order.
    async fn find_all(&self) -> Result<Vec<Recipe>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Recipe>, AppError>;

    /// Merges `patch` into the recipe and returns the post-update document,
    /// or `None` when no recipe has this id. The patch is validated by the
    /// caller.
    async fn find_by_id_and_update(
        &self,
        id: ObjectId,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>, AppError>;

    /// Removes the recipe and returns it, or `None` when no recipe has this id.
    async fn find_by_id_and_delete(&self, id: ObjectId) -> Result<Option<Recipe>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Process-local store kept in insertion order. Backs `STORAGE_BACKEND=memory`
/// and the HTTP tests.
#[derive(Default)]
pub struct InMemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.read().await.is_empty()
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn create(&self, recipe: Recipe) -> Result<Recipe, AppError> {
        let mut recipes = self.recipes.write().await;
        if recipes.iter().any(|r| r.id == recipe.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: recipe {} already exists",
                recipe.id
            )));
        }
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, AppError> {
        Ok(self.recipes.read().await.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Recipe>, AppError> {
        Ok(self
            .recipes
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_id_and_update(
        &self,
        id: ObjectId,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>, AppError> {
        let mut recipes = self.recipes.write().await;
        Ok(recipes.iter_mut().find(|r| r.id == id).map(|recipe| {
            patch.apply(recipe);
            recipe.clone()
        }))
    }

    async fn find_by_id_and_delete(&self, id: ObjectId) -> Result<Option<Recipe>, AppError> {
        let mut recipes = self.recipes.write().await;
        Ok(recipes
            .iter()
            .position(|r| r.id == id)
            .map(|index| recipes.remove(index)))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
