//! Recipe routes under `/api`. Each handler performs exactly one store call.

use crate::dtos::{CreateRecipeRequest, RecipeResponse};
use crate::error::RecipeError;
use crate::extract::JsonBody;
use crate::models::{parse_recipe_id, RecipePatch};
use crate::services::record_recipe_operation;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::ErrorResponse;
use validator::Validate;

fn observe<T>(operation: &'static str, result: Result<T, RecipeError>) -> Result<T, RecipeError> {
    let outcome = match &result {
        Ok(_) => "success",
        Err(err) => err.outcome(),
    };
    record_recipe_operation(operation, outcome);
    result
}

/// POST /api/recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateRecipeRequest>,
) -> Result<Json<RecipeResponse>, RecipeError> {
    let result = async {
        let recipe = state.store.create(req.into_recipe()?).await?;
        tracing::info!(recipe_id = %recipe.id, "Recipe created");
        Ok::<_, RecipeError>(Json(RecipeResponse::from(recipe)))
    }
    .await;

    observe("create", result)
}

/// GET /api/recipes
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeResponse>>, RecipeError> {
    let result = async {
        let recipes = state.store.find_all().await?;
        tracing::debug!(count = recipes.len(), "Listed recipes");
        Ok::<_, RecipeError>(Json(
            recipes.into_iter().map(RecipeResponse::from).collect(),
        ))
    }
    .await;

    observe("list", result)
}

/// GET /api/recipes/:id
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<Json<RecipeResponse>, RecipeError> {
    let result = async {
        let id = parse_recipe_id(&recipe_id)?;
        let recipe = state
            .store
            .find_by_id(id)
            .await?
            .ok_or(RecipeError::NotFound(id))?;
        Ok::<_, RecipeError>(Json(RecipeResponse::from(recipe)))
    }
    .await;

    observe("get", result)
}

/// PUT /api/recipes/:id
///
/// The id is resolved before the body is looked at, so a malformed id is a
/// 404 whatever the payload.
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
    body: Result<JsonBody<RecipePatch>, RecipeError>,
) -> Result<Json<RecipeResponse>, RecipeError> {
    let result = async {
        let id = parse_recipe_id(&recipe_id)?;
        let JsonBody(patch) = body?;
        patch.validate()?;

        let recipe = state
            .store
            .find_by_id_and_update(id, &patch)
            .await?
            .ok_or(RecipeError::NotFound(id))?;
        tracing::info!(recipe_id = %recipe.id, "Recipe updated");
        Ok::<_, RecipeError>(Json(RecipeResponse::from(recipe)))
    }
    .await;

    observe("update", result)
}

/// DELETE /api/recipes/:id
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<StatusCode, RecipeError> {
    let result = async {
        let id = parse_recipe_id(&recipe_id)?;
        state
            .store
            .find_by_id_and_delete(id)
            .await?
            .ok_or(RecipeError::NotFound(id))?;
        tracing::info!(recipe_id = %id, "Recipe deleted");
        Ok::<_, RecipeError>(StatusCode::NO_CONTENT)
    }
    .await;

    observe("delete", result)
}

/// Fallback for unknown routes and unsupported methods on known ones.
pub async fn not_found() -> impl IntoResponse {
    ErrorResponse {
        error: "Not found".to_string(),
        details: None,
    }
    .into_response_with(StatusCode::NOT_FOUND)
}
