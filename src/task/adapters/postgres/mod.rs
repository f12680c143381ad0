//! `PostgreSQL` adapters for task registry persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresTaskRepository;
