//! recipe-service: HTTP CRUD over a single `Recipe` resource.
pub mod config;
pub mod dtos;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
