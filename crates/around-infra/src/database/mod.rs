//! PostgreSQL-backed content index.

mod connections;
pub mod entity;
mod postgres_index;

pub use connections::{DatabaseConfig, connect};
pub use postgres_index::PostgresContentIndex;
