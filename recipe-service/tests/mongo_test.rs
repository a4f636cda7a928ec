//! Round trip against a real MongoDB.
//!
//! Run with `MONGODB_URI` pointing at a server and `cargo test -- --ignored`.

use mongodb::bson::oid::ObjectId;
use recipe_service::config::{RecipeConfig, StorageBackend};
use recipe_service::services::{MongoRecipeStore, RecipeStore};
use recipe_service::startup::Application;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
#[ignore = "Requires MongoDB (MONGODB_URI, default mongodb://localhost:27017)"]
async fn recipe_crud_against_mongodb() {
    // 1. Setup
    let mut config = RecipeConfig::load().expect("Failed to load configuration");
    config.common.port = 0; // Random port
    config.storage.backend = StorageBackend::Mongodb;
    config.mongodb.database = format!("recipe_test_{}", ObjectId::new().to_hex());

    let store = MongoRecipeStore::connect(
        &config.mongodb.uri,
        &config.mongodb.database,
        &config.mongodb.collection,
    )
    .await
    .expect("Failed to connect to MongoDB");
    store
        .initialize_indexes()
        .await
        .expect("Failed to create indexes");

    let app = Application::with_store(config, Arc::new(store.clone()))
        .await
        .expect("Failed to build application");
    let base = format!("http://127.0.0.1:{}/api/recipes", app.port());
    tokio::spawn(app.run_until_stopped());

    let client = reqwest::Client::new();

    // 2. Create
    let response = client
        .post(&base)
        .json(&json!({
            "recipeName": "tacos",
            "notes": "corn tortillas",
            "resources": "https://example.com/tacos",
            "favorite": false,
            "photo": "https://example.com/tacos.jpg"
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::OK);
    let created: Value = response.json().await.unwrap();
    let id = created["_id"].as_str().unwrap().to_string();

    // 3. Verify DB
    let oid = ObjectId::parse_str(&id).unwrap();
    let stored = store
        .find_by_id(oid)
        .await
        .unwrap()
        .expect("Recipe not found in DB");
    assert_eq!(stored.recipe_name, "tacos");

    // 4. Update
    let updated: Value = client
        .put(format!("{}/{}", base, id))
        .json(&json!({ "recipeName": "breakfast tacos", "favorite": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["recipeName"], "breakfast tacos");
    assert_eq!(updated["notes"], "corn tortillas");
    assert_eq!(updated["dateCreated"], created["dateCreated"]);

    // 5. List
    let all: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 1);

    // 6. Delete twice
    let first = client
        .delete(format!("{}/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    let second = client
        .delete(format!("{}/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    // 7. Malformed id
    let malformed = client.get(format!("{}/12345", base)).send().await.unwrap();
    assert_eq!(malformed.status(), StatusCode::NOT_FOUND);

    // Cleanup
    store
        .database()
        .drop(None)
        .await
        .expect("Failed to drop test database");
}
