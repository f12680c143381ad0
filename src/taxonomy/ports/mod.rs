//! Port contracts for the taxonomy.

pub mod repository;

pub use repository::{TaxonomyRepository, TaxonomyRepositoryError, TaxonomyRepositoryResult};
