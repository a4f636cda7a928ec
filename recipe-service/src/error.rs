//! Error type for the recipe routes and its HTTP status mapping.
//!
//! | Variant               | Status |
//! |-----------------------|--------|
//! | `Validation`          | 400    |
//! | `InvalidBody`         | 400    |
//! | `NotFound`            | 404    |
//! | `MalformedIdentifier` | 404    |
//! | `Storage`             | per `AppError` (500 for database failures) |

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::ObjectId;
use service_core::error::{AppError, ErrorResponse};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Recipe {0} not found")]
    NotFound(ObjectId),

    #[error("Malformed recipe id: {0}")]
    MalformedIdentifier(String),

    #[error(transparent)]
    Storage(#[from] AppError),
}

impl From<JsonRejection> for RecipeError {
    fn from(rejection: JsonRejection) -> Self {
        RecipeError::InvalidBody(rejection.body_text())
    }
}

impl RecipeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecipeError::Validation(_) | RecipeError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            // A malformed id can never name a stored recipe, so callers see
            // the same 404 as for a missing one.
            RecipeError::NotFound(_) | RecipeError::MalformedIdentifier(_) => {
                StatusCode::NOT_FOUND
            }
            RecipeError::Storage(err) => err.status_code(),
        }
    }

    /// Short label used as the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            RecipeError::Validation(_) | RecipeError::InvalidBody(_) => "invalid",
            RecipeError::NotFound(_) | RecipeError::MalformedIdentifier(_) => "not_found",
            RecipeError::Storage(_) => "error",
        }
    }
}

impl IntoResponse for RecipeError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            RecipeError::Storage(err) => return err.into_response(),
            RecipeError::Validation(err) => ErrorResponse {
                error: "Validation error".to_string(),
                details: Some(err.to_string()),
            },
            RecipeError::InvalidBody(details) => ErrorResponse {
                error: "Invalid request body".to_string(),
                details: Some(details),
            },
            RecipeError::NotFound(_) | RecipeError::MalformedIdentifier(_) => ErrorResponse {
                error: "Recipe not found".to_string(),
                details: None,
            },
        };

        body.into_response_with(status)
    }
}
