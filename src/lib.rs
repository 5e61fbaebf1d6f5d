//! Headless content API: CRUD over a single `posts` table in SQLite, served as JSON.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use model::{Post, PostChanges, PostInput};
pub use routes::{app, post_routes};
pub use service::{PostService, PostValidator};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_schema};
