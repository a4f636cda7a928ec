use crate::error::RecipeError;
use axum::extract::FromRequest;

/// `axum::Json` with rejections reported as [`RecipeError::InvalidBody`]
/// (400) instead of axum's mix of 400/415/422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(RecipeError))]
pub struct JsonBody<T>(pub T);
