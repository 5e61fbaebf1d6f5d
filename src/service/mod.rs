//! PostService: store operations on the posts table. PostValidator: request checks.

mod crud;
mod validation;
pub use crud::PostService;
pub use validation::PostValidator;
