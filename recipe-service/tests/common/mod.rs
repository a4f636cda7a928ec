#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use recipe_service::models::Recipe;
use recipe_service::services::{InMemoryRecipeStore, RecipeStore};
use recipe_service::startup::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

/// In-process app over an in-memory store; requests go through the full
/// router and middleware stack without a socket.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryRecipeStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }
}

impl TestApp {
    pub fn spawn() -> Self {
        let store = Arc::new(InMemoryRecipeStore::new());
        let router = build_router(AppState::new(store.clone()));
        TestApp { router, store }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse { status, body }
    }

    pub async fn post_recipe(&self, body: Value) -> TestResponse {
        self.request(Method::POST, "/api/recipes", Some(body)).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Stores a recipe directly, bypassing HTTP.
    pub async fn seed(&self, n: usize) -> Recipe {
        let mut recipe = Recipe::new(format!("recipe-{}", n));
        recipe.notes = Some(format!("notes for recipe {}", n));
        recipe.resources = Some(format!("https://example.com/recipes/{}", n));
        recipe.favorite = Some(n % 2 == 0);
        recipe.photo = Some(format!("https://example.com/photos/{}.jpg", n));
        self.store
            .create(recipe)
            .await
            .expect("Failed to seed recipe")
    }
}

/// A complete create payload.
pub fn recipe_payload(n: usize) -> Value {
    json!({
        "recipeName": format!("recipe-{}", n),
        "notes": format!("notes for recipe {}", n),
        "resources": format!("https://example.com/recipes/{}", n),
        "favorite": n % 2 == 0,
        "dateCreated": "2024-05-01T12:00:00.250Z",
        "photo": format!("https://example.com/photos/{}.jpg", n),
    })
}

/// Asserts the field presence and JSON types every recipe response carries.
pub fn assert_recipe_shape(value: &Value) {
    assert!(value["_id"].is_string(), "missing _id: {}", value);
    assert!(value["recipeName"].is_string(), "bad recipeName: {}", value);
    assert!(value["notes"].is_string(), "bad notes: {}", value);
    assert!(value["resources"].is_string(), "bad resources: {}", value);
    assert!(value["favorite"].is_boolean(), "bad favorite: {}", value);
    assert!(value["dateCreated"].is_string(), "bad dateCreated: {}", value);
    assert!(value["photo"].is_string(), "bad photo: {}", value);
}
