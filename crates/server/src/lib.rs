//! The legenda read-it-later article service.
//!
//! The binary wires a Postgres-backed store, an HTTP content fetcher, and
//! the article lifecycle controller into an axum REST surface. Everything
//! is constructed once at startup and injected; the library split exists so
//! integration tests can run the same router against in-memory doubles.

pub mod article;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod routes;
pub mod service;
pub mod store;
