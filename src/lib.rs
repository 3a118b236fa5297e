//! Linkup Service Library
//!
//! Backend for the Linkup professional networking feed: account registration
//! and login, stateless session tokens, profile management, and the post /
//! like mutation surface behind a bearer-token guard.
//!
//! # Modules
//!
//! - `handlers`: HTTP request handlers
//! - `models`: Data structures for users and posts
//! - `services`: Business logic layer (post mutations, media storage)
//! - `db`: Database access layer and repositories
//! - `security`: Password hashing and session tokens
//! - `middleware`: Bearer-token authentication middleware
//! - `error`: Error types and handling
//! - `config`: Configuration management
//! - `metrics`: Observability and metrics collection
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
