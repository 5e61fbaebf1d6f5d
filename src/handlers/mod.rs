//! HTTP handlers for the posts resource.

pub mod posts;
pub use posts::*;
