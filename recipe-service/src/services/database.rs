use crate::models::{Recipe, RecipePatch};
use crate::services::store::RecipeStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoRecipeStore {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoRecipeStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for recipe-service");

        // Newest-first listing by creation date
        let date_created_index = IndexModel::builder()
            .keys(doc! { "dateCreated": -1 })
            .options(
                IndexOptions::builder()
                    .name("date_created_idx".to_string())
                    .build(),
            )
            .build();

        self.recipes()
            .create_index(date_created_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create dateCreated index: {}", e);
                AppError::from(e)
            })?;

        tracing::info!(collection = %self.collection, "Created index on dateCreated");
        Ok(())
    }

    pub fn recipes(&self) -> Collection<Recipe> {
        self.db.collection(&self.collection)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl RecipeStore for MongoRecipeStore {
    async fn create(&self, recipe: Recipe) -> Result<Recipe, AppError> {
        self.recipes()
            .insert_one(&recipe, None)
            .await
            .map_err(|e| {
                tracing::error!(recipe_id = %recipe.id, "Failed to insert recipe: {}", e);
                AppError::from(e)
            })?;
        Ok(recipe)
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, AppError> {
        let cursor = self.recipes().find(None, None).await.map_err(|e| {
            tracing::error!("Failed to list recipes: {}", e);
            AppError::from(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect recipes: {}", e);
            AppError::from(e)
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Recipe>, AppError> {
        self.recipes()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(recipe_id = %id, "Failed to find recipe: {}", e);
                AppError::from(e)
            })
    }

    async fn find_by_id_and_update(
        &self,
        id: ObjectId,
        patch: &RecipePatch,
    ) -> Result<Option<Recipe>, AppError> {
        // MongoDB rejects an empty $set
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.recipes()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": patch.to_set_document() },
                options,
            )
            .await
            .map_err(|e| {
                tracing::error!(recipe_id = %id, "Failed to update recipe: {}", e);
                AppError::from(e)
            })
    }

    async fn find_by_id_and_delete(&self, id: ObjectId) -> Result<Option<Recipe>, AppError> {
        self.recipes()
            .find_one_and_delete(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(recipe_id = %id, "Failed to delete recipe: {}", e);
                AppError::from(e)
            })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
