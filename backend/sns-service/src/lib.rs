/// SNS Service Library
///
/// Social feed backend: posts, comments attached to posts, and idempotent
/// likes whose per-post counter always matches the set of like rows.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `routes`: route table shared by the binary and the integration tests
/// - `models`: Data structures for posts, comments, likes and request bodies
/// - `services`: Business logic layer, owner of every transaction
/// - `db`: Repositories, constraint classification and migrations
/// - `validation`: Write body validation
/// - `id`: Prefixed random identifiers
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod id;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;

pub use config::Config;
pub use error::{AppError, Result};
