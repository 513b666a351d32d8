/// Database location and server defaults.
pub mod config;
/// SQLite storage: schema, transactions, CRUD.
pub mod db;
/// tracing subscriber setup.
pub mod logging;
/// Data types: Restaurant, Pizza, RestaurantPizza, and their response views.
pub mod models;
/// Axum-based web server and router.
pub mod web;
