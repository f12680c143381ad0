//! `PostgreSQL` adapters for taxonomy persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTaxonomyRepository;
