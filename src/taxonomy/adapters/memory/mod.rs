//! In-memory adapters for taxonomy persistence.

mod repository;

pub use repository::InMemoryTaxonomyRepository;
