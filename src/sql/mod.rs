//! Parameterized SQL for the posts table: fixed statements plus the partial-update builder.

mod builder;
pub use builder::*;
